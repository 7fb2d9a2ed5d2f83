//! Tokenizer explanation mode
//!
//! [`ExplainingLexer`] wraps any [`Lexer`] and writes one line per token
//! describing what was read and where, then yields the unchanged token
//! vector. The `-E` flag of the `mica-parse` binary builds its parser over
//! one of these instead of a bare [`StandardLexer`].

use super::lexer::{LexError, Lexer, SpannedToken};
use crate::mica::source::SourceBuffer;
use std::io::Write;

/// A lexer decorator that narrates every token it produces
pub struct ExplainingLexer<L, W> {
    inner: L,
    out: W,
}

impl<L: Lexer, W: Write> ExplainingLexer<L, W> {
    pub fn new(inner: L, out: W) -> Self {
        Self { inner, out }
    }
}

impl<L: Lexer, W: Write> Lexer for ExplainingLexer<L, W> {
    fn lex(&mut self, buffer: &SourceBuffer) -> Result<Vec<SpannedToken>, LexError> {
        let tokens = self.inner.lex(buffer)?;
        for (token, span) in &tokens {
            let slice = &buffer.text()[span.clone()];
            let start = buffer.decompose(span.start);
            let end = buffer.decompose(span.end);
            writeln!(
                self.out,
                "read {:<8} {:?} at {}..{}",
                token.name(),
                slice,
                start,
                end
            )
            .map_err(LexError::Explanation)?;
        }
        Ok(tokens)
    }

    fn describe(&self) -> &'static str {
        "explaining"
    }
}
