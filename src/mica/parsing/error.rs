//! Parse error types and source-context formatting

use crate::mica::lexing::{LexError, Token};
use crate::mica::source::{Position, SourceBuffer};
use std::error::Error;
use std::fmt;

/// Errors that can occur while parsing a mica buffer
#[derive(Debug)]
pub enum ParseError {
    /// A token appeared where the grammar demands something else
    UnexpectedToken {
        found: Token,
        expected: String,
        at: Position,
        source_context: String,
    },
    /// Input ended mid-construct
    UnexpectedEof { expected: String },
    /// An integer literal does not fit in 64 bits
    IntOutOfRange { text: String, at: Position },
    /// Tokenization failed
    Lex(LexError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken {
                found,
                expected,
                at,
                source_context,
            } => {
                writeln!(f, "parse error: expected {}, found {} at {}", expected, found, at)?;
                writeln!(f)?;
                write!(f, "{}", source_context)
            }
            ParseError::UnexpectedEof { expected } => {
                write!(f, "parse error: unexpected end of input, expected {}", expected)
            }
            ParseError::IntOutOfRange { text, at } => {
                write!(f, "parse error: integer literal {} out of range at {}", text, at)
            }
            ParseError::Lex(err) => write!(f, "{}", err),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseError::Lex(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::Lex(err)
    }
}

/// Format source code context around an error position
///
/// Shows up to 2 lines before the error, the error line with a >> marker,
/// and up to 2 lines after. All lines are numbered for easy reference.
pub fn format_source_context(buffer: &SourceBuffer, at: Position) -> String {
    let first = at.line.saturating_sub(2).max(1);
    let last = (at.line + 2).min(buffer.line_count());

    let mut context = String::new();
    for line_num in first..=last {
        let marker = if line_num == at.line { ">>" } else { "  " };
        if let Some(text) = buffer.line(line_num) {
            context.push_str(&format!("{} {:3} | {}\n", marker, line_num, text));
        }
    }
    context
}
