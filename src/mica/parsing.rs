//! Parsing mica buffers into located node trees

pub mod error;
pub mod parser;

pub use error::{format_source_context, ParseError};
pub use parser::Parser;
