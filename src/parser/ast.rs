// Parsed forms of the puzzle input

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A relocation command: move `quantity` crates from stack `source` to stack
/// `destination`.
///
/// Stack numbers are 1-based as written in the input. Use
/// [`Instruction::source_index`] and [`Instruction::destination_index`] to get
/// collection indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub quantity: usize,
    pub source: usize,
    pub destination: usize,
}

impl Instruction {
    pub fn new(quantity: usize, source: usize, destination: usize) -> Self {
        Instruction {
            quantity,
            source,
            destination,
        }
    }

    /// 0-based index of the source stack (`None` for stack 0)
    pub fn source_index(&self) -> Option<usize> {
        self.source.checked_sub(1)
    }

    /// 0-based index of the destination stack (`None` for stack 0)
    pub fn destination_index(&self) -> Option<usize> {
        self.destination.checked_sub(1)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "move {} from {} to {}",
            self.quantity, self.source, self.destination
        )
    }
}
