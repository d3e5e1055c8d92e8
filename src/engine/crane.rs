//! Instruction replay over a stack collection
//!
//! A [`Crane`] applies instructions in input order, in one of two modes:
//!
//! ```text
//! move 3 from 1 to 2, stack 1 = A B C D (D on top)
//!
//! Single:  pop D, push D; pop C, push C; pop B, push B   → stack 2 gets D C B
//! Bulk:    copy run B C D onto stack 2, truncate stack 1 → stack 2 gets B C D
//! ```
//!
//! Each instruction is validated against the current stacks before anything is
//! touched, and all growth happens before the first crate moves, so an
//! instruction either applies completely or not at all.

use super::errors::{InstructionFault, SimulationError};
use crate::memory::{AllocError, Stack, StackCollection};
use crate::parser::ast::Instruction;
use std::fmt;
use std::str::FromStr;

/// How a crane relocates a group of crates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveMode {
    /// One crate at a time; the moved run ends up reversed
    Single,
    /// The whole run at once; order is preserved
    Bulk,
}

impl MoveMode {
    /// Both modes, in reporting order
    pub const ALL: [MoveMode; 2] = [MoveMode::Single, MoveMode::Bulk];

    pub fn name(self) -> &'static str {
        match self {
            MoveMode::Single => "single",
            MoveMode::Bulk => "bulk",
        }
    }

    /// The other mode
    pub fn toggle(self) -> Self {
        match self {
            MoveMode::Single => MoveMode::Bulk,
            MoveMode::Bulk => MoveMode::Single,
        }
    }
}

impl fmt::Display for MoveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MoveMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(MoveMode::Single),
            "bulk" => Ok(MoveMode::Bulk),
            other => Err(format!(
                "Unknown move mode '{}' (expected 'single' or 'bulk')",
                other
            )),
        }
    }
}

/// Validated, 0-based form of an instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocation {
    pub quantity: usize,
    pub source: usize,
    pub destination: usize,
}

/// Applies instructions to a stack collection in a fixed mode
#[derive(Debug, Clone, Copy)]
pub struct Crane {
    mode: MoveMode,
}

impl Crane {
    pub fn new(mode: MoveMode) -> Self {
        Crane { mode }
    }

    pub fn mode(&self) -> MoveMode {
        self.mode
    }

    /// Replay `instructions` in order, stopping at the first error.
    pub fn run(
        &self,
        stacks: &mut StackCollection,
        instructions: &[Instruction],
    ) -> Result<(), SimulationError> {
        for (i, instruction) in instructions.iter().enumerate() {
            self.apply(stacks, instruction, i + 1)?;
        }
        Ok(())
    }

    /// Apply a single instruction. `step` is its 1-based position, used only
    /// for error reporting.
    pub fn apply(
        &self,
        stacks: &mut StackCollection,
        instruction: &Instruction,
        step: usize,
    ) -> Result<Relocation, SimulationError> {
        let relocation = validate(stacks, instruction).map_err(|fault| {
            SimulationError::InvalidInstruction {
                step,
                instruction: *instruction,
                fault,
            }
        })?;

        // Same-stack moves net out to nothing in both modes.
        let Some((source, destination)) =
            stacks.pair_mut(relocation.source, relocation.destination)
        else {
            return Ok(relocation);
        };

        match self.mode {
            MoveMode::Single => move_one_at_a_time(source, destination, relocation.quantity)?,
            MoveMode::Bulk => move_as_block(source, destination, relocation.quantity)?,
        }
        Ok(relocation)
    }
}

/// Check an instruction against the current stacks and convert it to indices.
pub fn validate(
    stacks: &StackCollection,
    instruction: &Instruction,
) -> Result<Relocation, InstructionFault> {
    let count = stacks.len();
    let source = instruction
        .source_index()
        .filter(|&i| i < count)
        .ok_or(InstructionFault::SourceOutOfRange {
            stack: instruction.source,
            count,
        })?;
    let destination = instruction
        .destination_index()
        .filter(|&i| i < count)
        .ok_or(InstructionFault::DestinationOutOfRange {
            stack: instruction.destination,
            count,
        })?;

    let available = stacks.stack(source).map_or(0, |s| s.len());
    if instruction.quantity > available {
        return Err(InstructionFault::NotEnoughCrates {
            requested: instruction.quantity,
            available,
        });
    }

    Ok(Relocation {
        quantity: instruction.quantity,
        source,
        destination,
    })
}

/// Pop from `source` and push onto `destination`, `quantity` times.
fn move_one_at_a_time(
    source: &mut Stack,
    destination: &mut Stack,
    quantity: usize,
) -> Result<(), AllocError> {
    destination.reserve(quantity)?;
    for _ in 0..quantity {
        match source.pop_take() {
            Some(id) => destination.push(id)?,
            None => break,
        }
    }
    Ok(())
}

/// Append the top `quantity` crates of `source` to `destination` in their
/// current order, then drop them from `source`.
fn move_as_block(
    source: &mut Stack,
    destination: &mut Stack,
    quantity: usize,
) -> Result<(), AllocError> {
    let start = source.len() - quantity;
    destination.try_extend_from_slice(&source[start..])?;
    source.truncate(start);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StackCollection {
        StackCollection::from_piles(&[b"ZN", b"MCD", b"P"]).unwrap()
    }

    fn pile(stacks: &StackCollection, index: usize) -> &[u8] {
        stacks.stack(index).unwrap().as_slice()
    }

    #[test]
    fn test_single_mode_reverses_run() {
        let mut stacks = StackCollection::from_piles(&[b"ABCD", b""]).unwrap();
        Crane::new(MoveMode::Single)
            .apply(&mut stacks, &Instruction::new(3, 1, 2), 1)
            .unwrap();
        assert_eq!(pile(&stacks, 0), b"A");
        assert_eq!(pile(&stacks, 1), b"DCB");
    }

    #[test]
    fn test_bulk_mode_preserves_run() {
        let mut stacks = StackCollection::from_piles(&[b"ABCD", b"X"]).unwrap();
        Crane::new(MoveMode::Bulk)
            .apply(&mut stacks, &Instruction::new(3, 1, 2), 1)
            .unwrap();
        assert_eq!(pile(&stacks, 0), b"A");
        assert_eq!(pile(&stacks, 1), b"XBCD");
    }

    #[test]
    fn test_run_sample_in_both_modes() {
        let instructions = [
            Instruction::new(1, 2, 1),
            Instruction::new(3, 1, 3),
            Instruction::new(2, 2, 1),
            Instruction::new(1, 1, 2),
        ];

        let mut single = sample();
        Crane::new(MoveMode::Single).run(&mut single, &instructions).unwrap();
        assert_eq!(single.tops(), "CMZ");

        let mut bulk = sample();
        Crane::new(MoveMode::Bulk).run(&mut bulk, &instructions).unwrap();
        assert_eq!(bulk.tops(), "MCD");
    }

    #[test]
    fn test_quantity_one_is_mode_independent() {
        let instructions = [
            Instruction::new(1, 2, 1),
            Instruction::new(1, 1, 3),
            Instruction::new(1, 2, 3),
        ];
        let mut single = sample();
        let mut bulk = sample();
        for (i, instruction) in instructions.iter().enumerate() {
            Crane::new(MoveMode::Single).apply(&mut single, instruction, i + 1).unwrap();
            Crane::new(MoveMode::Bulk).apply(&mut bulk, instruction, i + 1).unwrap();
            assert_eq!(single, bulk);
        }
    }

    #[test]
    fn test_too_many_crates_leaves_stacks_untouched() {
        for mode in MoveMode::ALL {
            let mut stacks = sample();
            let err = Crane::new(mode)
                .apply(&mut stacks, &Instruction::new(3, 1, 2), 4)
                .unwrap_err();
            assert_eq!(
                err,
                SimulationError::InvalidInstruction {
                    step: 4,
                    instruction: Instruction::new(3, 1, 2),
                    fault: InstructionFault::NotEnoughCrates {
                        requested: 3,
                        available: 2
                    },
                }
            );
            assert_eq!(stacks, sample());
        }
    }

    #[test]
    fn test_stack_numbers_out_of_range() {
        let stacks = sample();
        assert_eq!(
            validate(&stacks, &Instruction::new(1, 4, 1)),
            Err(InstructionFault::SourceOutOfRange { stack: 4, count: 3 })
        );
        assert_eq!(
            validate(&stacks, &Instruction::new(1, 1, 0)),
            Err(InstructionFault::DestinationOutOfRange { stack: 0, count: 3 })
        );
    }

    #[test]
    fn test_same_stack_is_noop() {
        for mode in MoveMode::ALL {
            let mut stacks = sample();
            Crane::new(mode)
                .apply(&mut stacks, &Instruction::new(2, 2, 2), 1)
                .unwrap();
            assert_eq!(stacks, sample());
        }
    }

    #[test]
    fn test_out_of_memory_is_atomic() {
        for mode in MoveMode::ALL {
            let mut stacks = StackCollection::with_count(2).unwrap();
            stacks.stack_mut(0).unwrap().try_extend_from_slice(b"ABCDEF").unwrap();
            *stacks.stack_mut(1).unwrap() = Stack::with_max_capacity(4);
            stacks.stack_mut(1).unwrap().try_extend_from_slice(b"XY").unwrap();
            let before = stacks.clone();

            let err = Crane::new(mode)
                .apply(&mut stacks, &Instruction::new(3, 1, 2), 1)
                .unwrap_err();
            assert!(matches!(err, SimulationError::OutOfMemory(_)));
            assert_eq!(stacks, before);
        }
    }

    #[test]
    fn test_mode_names() {
        assert_eq!("bulk".parse::<MoveMode>(), Ok(MoveMode::Bulk));
        assert!("crane".parse::<MoveMode>().is_err());
        assert_eq!(MoveMode::Single.toggle(), MoveMode::Bulk);
        assert_eq!(MoveMode::Bulk.to_string(), "bulk");
    }
}
