//! Token definitions for the mica language
//!
//! Tokens are defined with the logos derive macro. Spaces, tabs, and `#`
//! comments are skipped; newlines are significant because they terminate
//! statements, so they lex as ordinary tokens.

use logos::Logos;
use std::fmt;

/// All possible tokens in a mica program
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t]+")]
#[logos(skip r"#[^\n]*")]
pub enum Token {
    // Keywords
    #[token("def")]
    KwDef,
    #[token("if")]
    KwIf,
    #[token("then")]
    KwThen,
    #[token("else")]
    KwElse,
    #[token("end")]
    KwEnd,

    // Literals and names
    #[regex("[0-9]+")]
    Int,
    #[regex(r#""[^"\n]*""#)]
    Str,
    #[regex("[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,

    // Statement separator
    #[token("\n")]
    Newline,

    // Operators ('==' must outrank '=' by length, which logos handles)
    #[token("==")]
    EqEq,
    #[token("=")]
    Eq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
}

impl Token {
    /// Short lowercase class name, used by the tokenizer explanation mode
    pub fn name(&self) -> &'static str {
        match self {
            Token::KwDef => "kw_def",
            Token::KwIf => "kw_if",
            Token::KwThen => "kw_then",
            Token::KwElse => "kw_else",
            Token::KwEnd => "kw_end",
            Token::Int => "int",
            Token::Str => "str",
            Token::Ident => "ident",
            Token::LParen => "lparen",
            Token::RParen => "rparen",
            Token::Comma => "comma",
            Token::Semi => "semi",
            Token::Newline => "newline",
            Token::EqEq => "eq_eq",
            Token::Eq => "eq",
            Token::Plus => "plus",
            Token::Minus => "minus",
            Token::Star => "star",
            Token::Slash => "slash",
            Token::Lt => "lt",
            Token::Gt => "gt",
        }
    }

    /// Check if this token separates statements
    pub fn is_separator(&self) -> bool {
        matches!(self, Token::Newline | Token::Semi)
    }

    /// Check if this token is a binary operator
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            Token::EqEq
                | Token::Plus
                | Token::Minus
                | Token::Star
                | Token::Slash
                | Token::Lt
                | Token::Gt
        )
    }
}

impl fmt::Display for Token {
    /// How the token reads in parse error messages
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Token::KwDef => "'def'",
            Token::KwIf => "'if'",
            Token::KwThen => "'then'",
            Token::KwElse => "'else'",
            Token::KwEnd => "'end'",
            Token::Int => "integer",
            Token::Str => "string",
            Token::Ident => "identifier",
            Token::LParen => "'('",
            Token::RParen => "')'",
            Token::Comma => "','",
            Token::Semi => "';'",
            Token::Newline => "newline",
            Token::EqEq => "'=='",
            Token::Eq => "'='",
            Token::Plus => "'+'",
            Token::Minus => "'-'",
            Token::Star => "'*'",
            Token::Slash => "'/'",
            Token::Lt => "'<'",
            Token::Gt => "'>'",
        };
        f.write_str(text)
    }
}
