//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct, the [`ParseError`] type and the
//! [`Manifest`] produced by a full parse.
//!
//! # Input Layout
//!
//! ```text
//!     [D]            ┐
//! [N] [C]            │ crate rows (top of pile first)
//! [Z] [M] [P]        ┘
//!  1   2   3         ← label line
//!                    ← first empty line
//! move 1 from 2 to 1 ┐
//! move 3 from 1 to 3 ┘ instruction block
//! ```
//!
//! # Implementation
//!
//! [`Parser::new`] splits the input into lines once and locates the empty line.
//! The two halves are parsed by `impl Parser` blocks in sibling modules:
//! - `diagram`: label offsets and the [`StackCollection`]
//! - `instructions`: the instruction block
//!
//! Stacks can be parsed any number of times from the same parser, which is how
//! each simulation mode gets a fresh collection.

use crate::memory::{AllocError, Container, StackCollection};
use crate::parser::ast::{Instruction, SourceLocation};
use crate::parser::lexer::{LexError, Slice, Tokenizer};
use std::fmt;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input does not have the expected shape
    Malformed {
        message: String,
        location: SourceLocation,
    },

    /// A container could not grow while parsing
    OutOfMemory(AllocError),
}

impl ParseError {
    pub(crate) fn malformed(message: impl Into<String>, location: SourceLocation) -> Self {
        ParseError::Malformed {
            message: message.into(),
            location,
        }
    }

    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            ParseError::Malformed { location, .. } => Some(*location),
            ParseError::OutOfMemory(_) => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Malformed { message, location } => write!(
                f,
                "Parse error at line {}, column {}: {}",
                location.line, location.column, message
            ),
            ParseError::OutOfMemory(err) => write!(f, "Parse error: {}", err),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::OutOfMemory(err) => Some(err),
            ParseError::Malformed { .. } => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::Malformed {
            message: err.message,
            location: err.location,
        }
    }
}

impl From<AllocError> for ParseError {
    fn from(err: AllocError) -> Self {
        ParseError::OutOfMemory(err)
    }
}

/// Everything a simulation run needs
#[derive(Debug)]
pub struct Manifest {
    pub stacks: StackCollection,
    pub instructions: Container<Instruction>,
}

/// Line-oriented parser over a borrowed input buffer
pub struct Parser<'a> {
    pub(crate) lines: Container<Slice<'a>>,
    /// Index of the first empty line
    pub(crate) separator: usize,
}

impl<'a> Parser<'a> {
    /// Split `input` into lines and locate the diagram/instruction boundary.
    ///
    /// # Errors
    /// - no empty line anywhere in the input
    /// - the empty line is the first line (no label line above it)
    pub fn new(input: &'a [u8]) -> Result<Self, ParseError> {
        let mut lines = Container::new();
        for line in Tokenizer::lines(input) {
            lines.push(line)?;
        }

        let separator = lines
            .iter()
            .position(|line| line.is_empty())
            .ok_or_else(|| {
                ParseError::malformed(
                    "Missing empty line after the crate diagram",
                    SourceLocation::new(lines.len().max(1), 1),
                )
            })?;

        if separator == 0 {
            return Err(ParseError::malformed(
                "Missing stack label line before the empty line",
                SourceLocation::new(1, 1),
            ));
        }

        Ok(Parser { lines, separator })
    }

    /// Parse the diagram and the instruction block
    pub fn parse_manifest(&self) -> Result<Manifest, ParseError> {
        Ok(Manifest {
            stacks: self.parse_stacks()?,
            instructions: self.parse_instructions()?,
        })
    }

    /// Number of input lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// 1-based line number of the first instruction
    pub fn first_instruction_line(&self) -> usize {
        self.separator + 2
    }

    /// The raw instruction lines, in order.
    ///
    /// Empty lines at the end of the input are not part of the block; an
    /// empty line between two instructions still is.
    pub fn instruction_lines(&self) -> &[Slice<'a>] {
        let block = self
            .lines
            .as_slice()
            .get(self.separator + 1..)
            .unwrap_or(&[]);
        let end = block
            .iter()
            .rposition(|line| !line.is_empty())
            .map_or(0, |last| last + 1);
        &block[..end]
    }

    /// The crate rows above the label line, top of pile first
    pub(crate) fn diagram_rows(&self) -> &[Slice<'a>] {
        &self.lines[..self.separator - 1]
    }

    /// The label line directly above the empty line
    pub(crate) fn label_line(&self) -> Slice<'a> {
        self.lines[self.separator - 1]
    }
}
