//! Instruction block parsing
//!
//! Every line after the empty line must read exactly
//!
//! ```text
//! move <quantity> from <source> to <destination>
//! ```
//!
//! with single spaces between fields and positive base-10 numbers. The first
//! line that does not match fails the whole parse.

use crate::memory::Container;
use crate::parser::ast::{Instruction, SourceLocation};
use crate::parser::lexer::{parse_int, Slice, Tokenizer};
use crate::parser::parse::{ParseError, Parser};

/// Keyword preceding each number, with what the number means
const FIELDS: [(&[u8], &str); 3] = [
    (b"move", "quantity"),
    (b"from", "source stack"),
    (b"to", "destination stack"),
];

impl<'a> Parser<'a> {
    /// Parse every line of the instruction block, in order.
    pub fn parse_instructions(&self) -> Result<Container<Instruction>, ParseError> {
        let lines = self.instruction_lines();
        let first = self.first_instruction_line();

        let mut instructions = Container::new();
        instructions.reserve(lines.len())?;
        for (i, &line) in lines.iter().enumerate() {
            instructions.push(parse_instruction(line, first + i)?)?;
        }
        Ok(instructions)
    }
}

/// Parse one `move N from S to D` line.
pub fn parse_instruction(line: Slice<'_>, line_no: usize) -> Result<Instruction, ParseError> {
    let end = SourceLocation::new(line_no, line.len() + 1);
    let at = |slice: Slice<'_>| SourceLocation::new(line_no, slice.offset + 1);

    let mut fields = Tokenizer::new(line.bytes, b' ');
    let mut numbers = [0usize; 3];

    for (slot, (keyword, meaning)) in numbers.iter_mut().zip(FIELDS) {
        let expected = String::from_utf8_lossy(keyword);
        match fields.next() {
            Some(word) if word.bytes == keyword => {}
            Some(word) => {
                return Err(ParseError::malformed(
                    format!("Expected '{}', found '{}'", expected, word.text()),
                    at(word),
                ));
            }
            None => {
                return Err(ParseError::malformed(format!("Expected '{}'", expected), end));
            }
        }

        let field = fields.next().ok_or_else(|| {
            ParseError::malformed(format!("Missing {} after '{}'", meaning, expected), end)
        })?;
        let value = parse_int(field, line_no)?;
        if value == 0 {
            return Err(ParseError::malformed(
                format!("The {} must be positive", meaning),
                at(field),
            ));
        }
        *slot = value;
    }

    if let Some(extra) = fields.next() {
        return Err(ParseError::malformed(
            format!("Unexpected trailing text '{}'", extra.text()),
            at(extra),
        ));
    }

    Ok(Instruction::new(numbers[0], numbers[1], numbers[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Instruction, ParseError> {
        parse_instruction(Slice::new(text.as_bytes(), 0), 7)
    }

    #[test]
    fn test_parse_instruction() {
        assert_eq!(parse("move 1 from 2 to 1"), Ok(Instruction::new(1, 2, 1)));
        assert_eq!(parse("move 12 from 9 to 10"), Ok(Instruction::new(12, 9, 10)));
    }

    #[test]
    fn test_missing_quantity() {
        let err = parse("move from 2 to 1").unwrap_err();
        assert_eq!(err.location(), Some(SourceLocation::new(7, 6)));
    }

    #[test]
    fn test_wrong_keyword() {
        let err = parse("move 1 form 2 to 1").unwrap_err();
        assert!(err.to_string().contains("Expected 'from', found 'form'"));
    }

    #[test]
    fn test_truncated_line() {
        let err = parse("move 1 from 2").unwrap_err();
        assert_eq!(err.location(), Some(SourceLocation::new(7, 14)));
        assert!(parse("move 1 from 2 to").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn test_zero_and_trailing_text() {
        assert!(parse("move 0 from 1 to 2").unwrap_err().to_string().contains("positive"));
        assert!(parse("move 1 from 0 to 2").is_err());
        assert!(parse("move 1 from 1 to 2 now").is_err());
    }

    #[test]
    fn test_double_space_is_rejected() {
        assert!(parse("move  1 from 2 to 1").is_err());
    }

    #[test]
    fn test_parse_block_reports_line_number() {
        let input = b"[A]\n 1 \n\nmove 1 from 1 to 1\nmove x from 1 to 1\n";
        let parser = Parser::new(input).unwrap();
        let err = parser.parse_instructions().unwrap_err();
        assert_eq!(err.location().map(|l| l.line), Some(5));
    }

    #[test]
    fn test_last_line_without_newline() {
        let input = b"[A]\n 1 \n\nmove 1 from 1 to 1";
        let parser = Parser::new(input).unwrap();
        assert_eq!(parser.parse_instructions().unwrap().len(), 1);
    }
}
