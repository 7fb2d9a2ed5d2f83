//! Position and range tracking for mica source code
//!
//! This module defines the value types for talking about locations in a
//! source buffer:
//!
//! - [`Position`] - a line:column position
//! - [`SourceRange`] - a half-open byte span with derived display attributes
//!
//! ## Key Design
//!
//! - **1-based lines**: positions print as `line:column` and feed
//!   [`SourceBuffer::line`](super::buffer::SourceBuffer::line), which counts
//!   from 1 the way editors and diagnostics do.
//! - **Char columns**: `column` and `length` are counted in chars, not
//!   bytes, because annotation bands align on terminal cells.
//! - **Derived once**: line/column/length are computed by
//!   [`SourceBuffer::range`](super::buffer::SourceBuffer::range) when the
//!   range is built and stored alongside the byte span; a range is a plain
//!   value afterwards and never reaches back into the buffer.
//! - **Multiline lengths**: `length` counts every char in the span,
//!   newlines included, so a range may logically extend past the end of its
//!   starting line. The renderer detects exactly that to decide truncation.

use serde::Serialize;
use std::fmt;
use std::ops::Range as ByteRange;

/// A position in source code (1-based line, 0-based char column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open span over the original text, with derived attributes
///
/// `span` is the byte range into the buffer the range was derived from;
/// `line`/`column` locate its first char and `len` counts its chars. The
/// renderer never mutates source text through a range; this is a read-only
/// view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SourceRange {
    pub span: ByteRange<usize>,
    #[serde(flatten)]
    start: Position,
    length: usize,
}

impl SourceRange {
    pub fn new(span: ByteRange<usize>, start: Position, length: usize) -> Self {
        Self {
            span,
            start,
            length,
        }
    }

    /// 1-based line number of the start position
    pub fn line(&self) -> usize {
        self.start.line
    }

    /// 0-based char offset of the start within its line
    pub fn column(&self) -> usize {
        self.start.column
    }

    pub fn start(&self) -> Position {
        self.start
    }

    /// Span length in chars; newlines count, so this may extend past the
    /// end of the starting line
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.start, self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_display() {
        assert_eq!(format!("{}", Position::new(5, 10)), "5:10");
    }

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(1, 5) < Position::new(2, 3));
        assert!(Position::new(2, 3) < Position::new(2, 4));
        assert_eq!(Position::new(1, 5), Position::new(1, 5));
    }

    #[test]
    fn test_range_accessors() {
        let range = SourceRange::new(4..9, Position::new(2, 1), 5);
        assert_eq!(range.line(), 2);
        assert_eq!(range.column(), 1);
        assert_eq!(range.len(), 5);
        assert!(!range.is_empty());
    }

    #[test]
    fn test_empty_range() {
        let range = SourceRange::new(3..3, Position::new(1, 3), 0);
        assert!(range.is_empty());
        assert_eq!(range.len(), 0);
    }

    #[test]
    fn test_range_display() {
        let range = SourceRange::new(4..9, Position::new(2, 1), 5);
        assert_eq!(format!("{range}"), "2:1+5");
    }
}
