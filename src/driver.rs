//! Top-level solving pipeline
//!
//! ```text
//! ByteSource → read_all → Parser → (fresh stacks per mode) → Crane → tops
//! ```
//!
//! The instruction block is parsed once; the diagram is parsed again for every
//! mode because a run consumes its stack collection. Results are only returned
//! once both modes have finished, so a failure in either produces no output.

use crate::engine::{Crane, MoveMode, Replay, SimulationError};
use crate::input::{self, ByteSource, ReadError};
use crate::parser::{ParseError, Parser};
use std::fmt;

/// Top-of-stacks read-out for both modes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub single: String,
    pub bulk: String,
}

impl Solution {
    /// Result for one mode
    pub fn for_mode(&self, mode: MoveMode) -> &str {
        match mode {
            MoveMode::Single => &self.single,
            MoveMode::Bulk => &self.bulk,
        }
    }
}

/// Any failure on the way from raw bytes to a solution
#[derive(Debug)]
pub enum SolveError {
    Read(ReadError),
    Parse(ParseError),
    Simulation {
        mode: MoveMode,
        error: SimulationError,
    },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::Read(err) => write!(f, "{}", err),
            SolveError::Parse(err) => write!(f, "{}", err),
            SolveError::Simulation { mode, error } => {
                write!(f, "Runtime error ({} mode): {}", mode, error)
            }
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolveError::Read(err) => Some(err),
            SolveError::Parse(err) => Some(err),
            SolveError::Simulation { error, .. } => Some(error),
        }
    }
}

impl From<ReadError> for SolveError {
    fn from(err: ReadError) -> Self {
        SolveError::Read(err)
    }
}

impl From<ParseError> for SolveError {
    fn from(err: ParseError) -> Self {
        SolveError::Parse(err)
    }
}

/// Parse `input` and run it in both modes.
pub fn solve(input: &[u8]) -> Result<Solution, SolveError> {
    let parser = Parser::new(input)?;
    let instructions = parser.parse_instructions()?;

    let mut tops = [String::new(), String::new()];
    for (slot, mode) in tops.iter_mut().zip(MoveMode::ALL) {
        let mut stacks = parser.parse_stacks()?;
        Crane::new(mode)
            .run(&mut stacks, &instructions)
            .map_err(|error| SolveError::Simulation { mode, error })?;
        *slot = stacks.tops();
    }

    let [single, bulk] = tops;
    Ok(Solution { single, bulk })
}

/// Read `source` to the end, then [`solve`] it.
pub fn solve_source<S: ByteSource + ?Sized>(source: &mut S) -> Result<Solution, SolveError> {
    let data = input::read_all(source)?;
    solve(&data)
}

/// Record one [`Replay`] per mode, in [`MoveMode::ALL`] order.
///
/// Instruction failures do not abort recording; they are kept on the replay
/// so the viewer can show the history up to the failing step.
pub fn record_replays(input: &[u8], snapshot_limit: usize) -> Result<[Replay; 2], SolveError> {
    let parser = Parser::new(input)?;
    let instructions = parser.parse_instructions()?;

    let record = |mode: MoveMode| -> Result<Replay, SolveError> {
        let stacks = parser.parse_stacks()?;
        Replay::record(stacks, &instructions, mode, snapshot_limit)
            .map_err(|error| SolveError::Simulation { mode, error })
    };

    Ok([record(MoveMode::Single)?, record(MoveMode::Bulk)?])
}
