//! Tokenization for mica source text
//!
//! Lexing is one logos pass producing `(Token, byte span)` pairs. Token
//! spans feed the parser's source maps, so their integrity matters more
//! than the kinds themselves: every span must slice back out of the buffer
//! to exactly the text the token was read from. The [`Lexer`] trait is the
//! seam that lets the `-E` explanation mode decorate tokenization without
//! any global switches.

pub mod explanation;
pub mod lexer;
pub mod tokens;

pub use explanation::ExplainingLexer;
pub use lexer::{LexError, Lexer, SpannedToken, StandardLexer};
pub use tokens::Token;
