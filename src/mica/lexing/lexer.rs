//! The lexer capability seam
//!
//! Tokenization is reached through the [`Lexer`] trait so callers choose
//! the lexing behavior when they build a parser. [`StandardLexer`] is the
//! plain logos pass; the explanation mode in
//! [`explanation`](super::explanation) wraps any lexer and narrates it.
//! Nothing selects lexer behavior through shared global state.

use super::tokens::Token;
use crate::mica::source::{Position, SourceBuffer};
use logos::Logos;
use std::error::Error;
use std::fmt;
use std::io;
use std::ops::Range as ByteRange;

/// One lexed token with the byte span it was read from
pub type SpannedToken = (Token, ByteRange<usize>);

/// Errors that can occur during tokenization
#[derive(Debug)]
pub enum LexError {
    /// Input contained a byte sequence no token rule accepts
    UnknownToken { text: String, at: Position },
    /// The explanation writer failed
    Explanation(io::Error),
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnknownToken { text, at } => {
                write!(f, "unrecognized token {:?} at {}", text, at)
            }
            LexError::Explanation(err) => write!(f, "failed to write token explanation: {}", err),
        }
    }
}

impl Error for LexError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LexError::UnknownToken { .. } => None,
            LexError::Explanation(err) => Some(err),
        }
    }
}

/// A tokenizer for mica source buffers
pub trait Lexer {
    /// Tokenizes the whole buffer into spanned tokens
    fn lex(&mut self, buffer: &SourceBuffer) -> Result<Vec<SpannedToken>, LexError>;

    /// Short human name, used in the runner's status line
    fn describe(&self) -> &'static str;
}

/// The plain logos tokenization pass
#[derive(Debug, Default)]
pub struct StandardLexer;

impl StandardLexer {
    pub fn new() -> Self {
        Self
    }
}

impl Lexer for StandardLexer {
    fn lex(&mut self, buffer: &SourceBuffer) -> Result<Vec<SpannedToken>, LexError> {
        let mut lexer = Token::lexer(buffer.text());
        let mut tokens = Vec::new();
        while let Some(result) = lexer.next() {
            let span = lexer.span();
            match result {
                Ok(token) => tokens.push((token, span)),
                Err(()) => {
                    return Err(LexError::UnknownToken {
                        text: lexer.slice().to_string(),
                        at: buffer.decompose(span.start),
                    });
                }
            }
        }
        log::debug!("lexed {} tokens from {}", tokens.len(), buffer.name());
        Ok(tokens)
    }

    fn describe(&self) -> &'static str {
        "standard"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<SpannedToken> {
        let buffer = SourceBuffer::new("(test)", source);
        StandardLexer::new().lex(&buffer).expect("lex failed")
    }

    #[test]
    fn test_spans_cover_token_text() {
        let tokens = lex("foo = 42");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0], (Token::Ident, 0..3));
        assert_eq!(tokens[1], (Token::Eq, 4..5));
        assert_eq!(tokens[2], (Token::Int, 6..8));
    }

    #[test]
    fn test_string_span_includes_quotes() {
        let tokens = lex("\"hi\"");
        assert_eq!(tokens, vec![(Token::Str, 0..4)]);
    }

    #[test]
    fn test_unknown_token_reports_position() {
        let buffer = SourceBuffer::new("(test)", "x = 1\ny ? 2");
        let err = StandardLexer::new().lex(&buffer).unwrap_err();
        match err {
            LexError::UnknownToken { text, at } => {
                assert_eq!(text, "?");
                assert_eq!(at, Position::new(2, 2));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(lex(""), vec![]);
    }

    #[test]
    fn test_describe() {
        assert_eq!(StandardLexer::new().describe(), "standard");
    }
}
