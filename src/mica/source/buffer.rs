//! Source buffer with line-aware position resolution
//!
//! A [`SourceBuffer`] owns one unit of mica input (a file or an `-e`
//! snippet) together with a precomputed table of line start offsets, so
//! byte offsets can be resolved to line/column positions without rescanning
//! the text. It is also the only factory for [`SourceRange`] values, which
//! keeps every range's derived attributes consistent with the text they
//! came from.

use super::range::{Position, SourceRange};
use std::fs;
use std::io;
use std::ops::Range as ByteRange;
use std::path::Path;

/// An immutable named piece of source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBuffer {
    name: String,
    text: String,
    /// Byte offset of the first char of each line
    line_starts: Vec<usize>,
}

impl SourceBuffer {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(offset + 1);
            }
        }
        Self {
            name: name.into(),
            text,
            line_starts,
        }
    }

    /// Reads a buffer from disk, named after its path
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Ok(Self::new(path.display().to_string(), text))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the text of a 1-based line without its trailing newline,
    /// or `None` when the buffer has no such line
    pub fn line(&self, line: usize) -> Option<&str> {
        if line == 0 || line > self.line_starts.len() {
            return None;
        }
        let start = self.line_starts[line - 1];
        let end = match self.line_starts.get(line) {
            Some(next_start) => next_start - 1,
            None => self.text.len(),
        };
        self.text.get(start..end)
    }

    /// Resolves a byte offset to a 1-based line and 0-based char column
    pub fn decompose(&self, offset: usize) -> Position {
        let line_idx = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|insert| insert - 1);
        let line_start = self.line_starts[line_idx];
        let column = self.text[line_start..offset].chars().count();
        Position::new(line_idx + 1, column)
    }

    /// Derives a [`SourceRange`] for a byte span of this buffer
    pub fn range(&self, span: ByteRange<usize>) -> SourceRange {
        let start = self.decompose(span.start);
        let length = self.text[span.clone()].chars().count();
        SourceRange::new(span, start, length)
    }
}
