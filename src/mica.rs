//! The mica language toolchain: lexing, parsing, and location rendering

pub mod ast;
pub mod lexing;
pub mod locate;
pub mod parsing;
pub mod runner;
pub mod source;
