//! Puzzle input parser
//!
//! This module transforms the raw input bytes into simulation inputs:
//! - [`lexer`]: separator tokenizer producing borrowed [`lexer::Slice`]s, and integer scanning
//! - [`parse`]: [`Parser`] coordinator, [`ParseError`] and [`Manifest`]
//! - [`ast`]: [`Instruction`] and [`SourceLocation`]
//! - `diagram`: column offsets and the stack collection (an `impl Parser` block)
//! - `instructions`: the `move N from S to D` block (an `impl Parser` block)
//!
//! # Parser Implementation
//!
//! Hand-written and line oriented. Lines are views into the input buffer, so
//! the buffer must outlive the [`Parser`]; the parsed collections own their data
//! and do not borrow it.

pub mod ast;
pub mod diagram;
pub mod instructions;
pub mod lexer;
pub mod parse;

pub use ast::{Instruction, SourceLocation};
pub use parse::{Manifest, ParseError, Parser};
