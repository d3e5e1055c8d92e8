//! Recorded simulation runs with time-travel navigation
//!
//! [`Replay::record`] runs every instruction once and keeps a [`Snapshot`] of the
//! yard before the first instruction and after each one. Navigation afterwards
//! only moves a cursor over that history; nothing is re-simulated.
//!
//! ```text
//! snapshot:     0        1        2   ...   n
//! state:     initial  after #1  after #2   after #n
//! ```
//!
//! If an instruction fails, recording stops and the history up to the failing
//! instruction is kept; the error is available from [`Replay::failure`].

use super::crane::{Crane, MoveMode, Relocation};
use super::errors::SimulationError;
use crate::memory::{Container, StackCollection};
use crate::parser::ast::Instruction;
use crate::snapshot::{LastMove, Snapshot, SnapshotManager, Transcript, TranscriptLine};

/// A fully recorded run in one mode
#[derive(Debug)]
pub struct Replay {
    mode: MoveMode,
    instructions: Container<Instruction>,
    snapshots: SnapshotManager,
    transcript: Transcript,
    history_position: usize,
    failure: Option<SimulationError>,
}

impl Replay {
    /// Run `instructions` over `stacks` and record every intermediate state.
    ///
    /// # Errors
    /// Only when the initial snapshot cannot be stored. Failures of individual
    /// instructions end the recording early and are reported by
    /// [`Replay::failure`].
    pub fn record(
        mut stacks: StackCollection,
        instructions: &[Instruction],
        mode: MoveMode,
        snapshot_limit: usize,
    ) -> Result<Self, SimulationError> {
        let mut replay = Replay {
            mode,
            instructions: Container::try_from_slice(instructions)?,
            snapshots: SnapshotManager::new(snapshot_limit),
            transcript: Transcript::new(),
            history_position: 0,
            failure: None,
        };

        let census = stacks.census();
        replay.take_snapshot(&stacks, 0, None)?;

        let crane = Crane::new(mode);
        for (i, instruction) in instructions.iter().enumerate() {
            let step = i + 1;
            let outcome = match crane.apply(&mut stacks, instruction, step) {
                Ok(relocation) => {
                    replay.log_move(&stacks, instruction, relocation, step);
                    let moved = relocation.source != relocation.destination;
                    let last_move = moved.then_some(LastMove {
                        source: relocation.source,
                        destination: relocation.destination,
                        quantity: relocation.quantity,
                    });
                    replay.take_snapshot(&stacks, step, last_move)
                }
                Err(err) => Err(err),
            };
            if let Err(err) = outcome {
                replay.failure = Some(err);
                break;
            }
        }

        if replay.failure.is_none() {
            debug_assert_eq!(census, stacks.census(), "relocation changed the set of crates");
        }
        Ok(replay)
    }

    fn take_snapshot(
        &mut self,
        stacks: &StackCollection,
        step: usize,
        last_move: Option<LastMove>,
    ) -> Result<(), SimulationError> {
        let snapshot = Snapshot {
            stacks: stacks.try_clone()?,
            step,
            transcript_len: self.transcript.len(),
            last_move,
        };

        // Report the usage the rejected snapshot would have brought
        let size = snapshot.estimated_size();
        self.snapshots
            .push(snapshot)
            .map_err(|_| SimulationError::SnapshotLimitExceeded {
                current: self.snapshots.memory_usage() + size,
                limit: self.snapshots.memory_limit(),
            })
    }

    fn log_move(
        &mut self,
        stacks: &StackCollection,
        instruction: &Instruction,
        relocation: Relocation,
        step: usize,
    ) {
        if relocation.source == relocation.destination {
            self.transcript
                .record(format!("{}: nothing moved", instruction), step);
            return;
        }
        let landed: String = stacks
            .stack(relocation.destination)
            .and_then(|stack| {
                stack
                    .as_slice()
                    .get(stack.len().saturating_sub(relocation.quantity)..)
            })
            .map(|run| run.iter().map(|&id| char::from(id)).collect())
            .unwrap_or_default();
        self.transcript.record(
            format!("{}: {} -> stack {}", instruction, landed, instruction.destination),
            step,
        );
    }

    // ========== Navigation ==========

    /// Move to the next recorded state
    pub fn step_forward(&mut self) -> Result<(), SimulationError> {
        if self.history_position + 1 >= self.snapshots.len() {
            return Err(SimulationError::HistoryOperationFailed {
                message: "No more snapshots available (run finished)".to_string(),
            });
        }
        self.history_position += 1;
        Ok(())
    }

    /// Move to the previous recorded state
    pub fn step_backward(&mut self) -> Result<(), SimulationError> {
        if self.history_position == 0 {
            return Err(SimulationError::HistoryOperationFailed {
                message: "Already at the beginning of the run".to_string(),
            });
        }
        self.history_position -= 1;
        Ok(())
    }

    /// Jump to an absolute position in the history
    pub fn jump_to(&mut self, position: usize) -> Result<(), SimulationError> {
        if position >= self.snapshots.len() {
            return Err(SimulationError::HistoryOperationFailed {
                message: format!(
                    "Snapshot {} not recorded ({} available)",
                    position,
                    self.snapshots.len()
                ),
            });
        }
        self.history_position = position;
        Ok(())
    }

    pub fn rewind_to_start(&mut self) {
        self.history_position = 0;
    }

    pub fn jump_to_end(&mut self) {
        self.history_position = self.snapshots.len().saturating_sub(1);
    }

    // ========== Getter methods for UI ==========

    pub fn mode(&self) -> MoveMode {
        self.mode
    }

    pub fn history_position(&self) -> usize {
        self.history_position
    }

    pub fn total_snapshots(&self) -> usize {
        self.snapshots.len()
    }

    pub fn memory_usage(&self) -> usize {
        self.snapshots.memory_usage()
    }

    /// Snapshot at the current position
    pub fn current(&self) -> Option<&Snapshot> {
        self.snapshots.get(self.history_position)
    }

    /// Stacks at the current position
    pub fn stacks(&self) -> Option<&StackCollection> {
        self.current().map(|snapshot| &snapshot.stacks)
    }

    pub fn instructions(&self) -> &[Instruction] {
        self.instructions.as_slice()
    }

    /// The instruction whose effect the current snapshot shows
    pub fn current_instruction(&self) -> Option<&Instruction> {
        self.history_position
            .checked_sub(1)
            .and_then(|i| self.instructions.get(i))
    }

    /// The instruction a step forward would show
    pub fn next_instruction(&self) -> Option<&Instruction> {
        self.instructions.get(self.history_position)
    }

    /// Transcript lines up to the current position
    pub fn transcript_lines(&self) -> &[TranscriptLine] {
        let len = self.current().map_or(0, |snapshot| snapshot.transcript_len);
        &self.transcript.lines[..len.min(self.transcript.len())]
    }

    /// The error that stopped recording early, if any
    pub fn failure(&self) -> Option<&SimulationError> {
        self.failure.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// Top crates after the last recorded state
    pub fn final_tops(&self) -> Option<String> {
        self.snapshots.last().map(|snapshot| snapshot.stacks.tops())
    }
}
