//! Simulation error types
//!
//! This module defines [`SimulationError`], which represents every error that can
//! occur while replaying instructions (as opposed to parse errors or I/O errors).
//!
//! All simulation errors are fatal for the run that raised them. An instruction
//! that fails validation leaves every stack untouched.

use crate::memory::AllocError;
use crate::parser::ast::Instruction;
use std::fmt;

/// Why an instruction cannot be applied to the current stacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionFault {
    /// Source stack number is not in `1..=count`
    SourceOutOfRange { stack: usize, count: usize },

    /// Destination stack number is not in `1..=count`
    DestinationOutOfRange { stack: usize, count: usize },

    /// The source stack holds fewer crates than requested
    NotEnoughCrates { requested: usize, available: usize },
}

impl fmt::Display for InstructionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstructionFault::SourceOutOfRange { stack, count } => {
                write!(f, "source stack {} does not exist ({} stacks)", stack, count)
            }
            InstructionFault::DestinationOutOfRange { stack, count } => {
                write!(
                    f,
                    "destination stack {} does not exist ({} stacks)",
                    stack, count
                )
            }
            InstructionFault::NotEnoughCrates {
                requested,
                available,
            } => write!(
                f,
                "cannot move {} crate{} from a stack of {}",
                requested,
                if *requested == 1 { "" } else { "s" },
                available
            ),
        }
    }
}

/// Errors that can occur during a simulation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// An instruction does not fit the current stacks
    InvalidInstruction {
        /// 1-based position in the instruction list
        step: usize,
        instruction: Instruction,
        fault: InstructionFault,
    },

    /// A stack could not grow
    OutOfMemory(AllocError),

    /// Snapshot history limit exceeded
    SnapshotLimitExceeded { current: usize, limit: usize },

    /// History navigation failed (already at an end of the recording)
    HistoryOperationFailed { message: String },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidInstruction {
                step,
                instruction,
                fault,
            } => write!(
                f,
                "Invalid instruction {} ({}): {}",
                step, instruction, fault
            ),
            SimulationError::OutOfMemory(err) => write!(f, "{}", err),
            SimulationError::SnapshotLimitExceeded { current, limit } => write!(
                f,
                "Snapshot memory limit exceeded: {} bytes used, limit is {}",
                current, limit
            ),
            SimulationError::HistoryOperationFailed { message } => {
                write!(f, "History operation failed: {}", message)
            }
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::OutOfMemory(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AllocError> for SimulationError {
    fn from(err: AllocError) -> Self {
        SimulationError::OutOfMemory(err)
    }
}
