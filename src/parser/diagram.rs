//! Crate diagram parsing
//!
//! Turns the block above the empty line into a [`StackCollection`]:
//!
//! 1. The label line (` 1   2   3 `) gives one column offset per maximal run of
//!    non-whitespace bytes. Runs must read `1`, `2`, ... left to right.
//! 2. One empty [`Stack`](crate::memory::Stack) is created per offset.
//! 3. Crate rows are walked from the one just above the label line up to the
//!    first line, so every stack is filled bottom to top. A non-whitespace byte
//!    at a stack's column is a crate.
//!
//! Rows may be shorter than the label line; a column past the end of a row is
//! treated as empty.

use crate::memory::{AllocError, Container, StackCollection};
use crate::parser::ast::SourceLocation;
use crate::parser::lexer::{parse_int, Slice};
use crate::parser::parse::{ParseError, Parser};

impl<'a> Parser<'a> {
    /// Build a fresh stack collection from the diagram.
    pub fn parse_stacks(&self) -> Result<StackCollection, ParseError> {
        // The label line sits directly above the separator, so its 1-based
        // number equals the separator index.
        let offsets = column_offsets(self.label_line(), self.separator)?;
        Ok(fill_stacks(self.diagram_rows(), &offsets)?)
    }
}

/// Byte column of every stack label, stack 1 first
pub(crate) fn column_offsets(label_line: Slice<'_>, line: usize) -> Result<Container<usize>, ParseError> {
    let bytes = label_line.bytes;
    let mut offsets = Container::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i].is_ascii_whitespace() {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let label = Slice::new(&bytes[start..i], start);
        let expected = offsets.len() + 1;
        match parse_int(label, line) {
            Ok(n) if n == expected => {}
            _ => {
                return Err(ParseError::malformed(
                    format!("Expected stack label {}, found '{}'", expected, label.text()),
                    SourceLocation::new(line, start + 1),
                ));
            }
        }
        offsets.push(start)?;
    }

    if offsets.is_empty() {
        return Err(ParseError::malformed(
            "Stack label line has no labels",
            SourceLocation::new(line, 1),
        ));
    }
    Ok(offsets)
}

/// Create one stack per offset and stack crates from the bottom row upward.
///
/// `rows` are in input order, i.e. top of pile first.
pub(crate) fn fill_stacks(rows: &[Slice<'_>], offsets: &[usize]) -> Result<StackCollection, AllocError> {
    let mut stacks = StackCollection::with_count(offsets.len())?;
    for row in rows.iter().rev() {
        for (index, &offset) in offsets.iter().enumerate() {
            if let Some(&id) = row.bytes.get(offset) {
                if !id.is_ascii_whitespace() {
                    stacks.push_crate(index, id)?;
                }
            }
        }
    }
    Ok(stacks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slices<'a>(lines: &[&'a str]) -> Vec<Slice<'a>> {
        lines.iter().map(|l| Slice::new(l.as_bytes(), 0)).collect()
    }

    #[test]
    fn test_column_offsets() {
        let offsets = column_offsets(Slice::new(b" 1   2   3 ", 0), 4).unwrap();
        assert_eq!(offsets.as_slice(), &[1, 5, 9]);
    }

    #[test]
    fn test_column_offsets_multi_digit_labels() {
        let line = " 1   2   3   4   5   6   7   8   9  10 ";
        let offsets = column_offsets(Slice::new(line.as_bytes(), 0), 1).unwrap();
        assert_eq!(offsets.len(), 10);
        assert_eq!(offsets[8], 33);
        assert_eq!(offsets[9], 36);
    }

    #[test]
    fn test_column_offsets_rejects_bad_labels() {
        let err = column_offsets(Slice::new(b" 1   3 ", 0), 4).unwrap_err();
        assert_eq!(
            err,
            ParseError::Malformed {
                message: "Expected stack label 2, found '3'".to_string(),
                location: SourceLocation::new(4, 6),
            }
        );
        assert!(column_offsets(Slice::new(b"[A] [B]", 0), 1).is_err());
        assert!(column_offsets(Slice::new(b"   ", 0), 1).is_err());
    }

    #[test]
    fn test_fill_stacks_bottom_to_top() {
        let rows = slices(&["    [D]    ", "[N] [C]    ", "[Z] [M] [P]"]);
        let stacks = fill_stacks(&rows, &[1, 5, 9]).unwrap();
        assert_eq!(stacks.stack(0).unwrap().as_slice(), b"ZN");
        assert_eq!(stacks.stack(1).unwrap().as_slice(), b"MCD");
        assert_eq!(stacks.stack(2).unwrap().as_slice(), b"P");
    }

    #[test]
    fn test_fill_stacks_short_rows_and_empty_columns() {
        let rows = slices(&["[A]", "[B]"]);
        let stacks = fill_stacks(&rows, &[1, 5]).unwrap();
        assert_eq!(stacks.stack(0).unwrap().as_slice(), b"BA");
        assert!(stacks.stack(1).unwrap().is_empty());
    }
}
