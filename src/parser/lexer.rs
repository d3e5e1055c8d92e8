//! Byte tokenizer and integer scanning
//!
//! [`Tokenizer`] walks a byte buffer and yields [`Slice`] views between
//! occurrences of a single separator byte. It is used twice: once with `\n` to
//! split the input into lines, and once with a space to split an instruction
//! line into fields. Nothing is copied; every slice borrows the buffer.
//!
//! # Segment Rules
//!
//! ```text
//! "a\nb\n"  →  "a", "b"
//! "a\nb"    →  "a", "b"        final unterminated segment is kept
//! "a\n\nb"  →  "a", "", "b"
//! ""        →  (nothing)
//! ```

use super::ast::SourceLocation;
use std::fmt;
use std::iter::FusedIterator;

/// Non-owning view into a tokenized buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice<'a> {
    pub bytes: &'a [u8],
    /// Position of the first byte within the tokenized buffer
    pub offset: usize,
}

impl<'a> Slice<'a> {
    pub fn new(bytes: &'a [u8], offset: usize) -> Self {
        Slice { bytes, offset }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lossy text form for messages and display
    pub fn text(&self) -> String {
        String::from_utf8_lossy(self.bytes).into_owned()
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for LexError {}

/// Forward-only cursor splitting a buffer on one separator byte
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    data: &'a [u8],
    index: usize,
    separator: u8,
}

impl<'a> Tokenizer<'a> {
    pub fn new(data: &'a [u8], separator: u8) -> Self {
        Tokenizer {
            data,
            index: 0,
            separator,
        }
    }

    /// Tokenizer over the lines of `data`.
    pub fn lines(data: &'a [u8]) -> Self {
        Self::new(data, b'\n')
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> &'a [u8] {
        self.data.get(self.index..).unwrap_or(&[])
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Slice<'a>;

    fn next(&mut self) -> Option<Slice<'a>> {
        if self.index >= self.data.len() {
            return None;
        }
        let start = self.index;
        let rest = &self.data[start..];
        let len = rest
            .iter()
            .position(|&b| b == self.separator)
            .unwrap_or(rest.len());
        // Skip past the separator; at end of buffer this lands one past len.
        self.index = start + len + 1;
        Some(Slice::new(&rest[..len], start))
    }
}

impl FusedIterator for Tokenizer<'_> {}

/// Parse a base-10 unsigned integer spanning the whole slice.
///
/// `line` is only used to locate errors; the column comes from the slice offset.
pub fn parse_int(slice: Slice<'_>, line: usize) -> Result<usize, LexError> {
    let location = SourceLocation::new(line, slice.offset + 1);
    if slice.is_empty() {
        return Err(LexError {
            message: "Expected a number".to_string(),
            location,
        });
    }

    let mut value: usize = 0;
    for (i, &b) in slice.bytes.iter().enumerate() {
        if !b.is_ascii_digit() {
            return Err(LexError {
                message: format!("Invalid digit '{}' in '{}'", char::from(b), slice.text()),
                location: SourceLocation::new(line, slice.offset + i + 1),
            });
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(usize::from(b - b'0')))
            .ok_or_else(|| LexError {
                message: format!("Number '{}' is out of range", slice.text()),
                location,
            })?;
    }
    Ok(value)
}
