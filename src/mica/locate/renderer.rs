//! The range-to-band layout core
//!
//! Given one node's named source ranges, the renderer prints each source
//! line the ranges touch followed by one or more annotation bands:
//!
//! ```text
//! foo = bar + 1
//!     ~ operator
//! ~~~~~~~~~~~~~ expression
//! ```
//!
//! ## Layout rules
//!
//! - Ranges render in ascending line order; among ranges on one line the
//!   `expression` range goes last, since it is the widest and fares best
//!   when the narrower annotations are already placed.
//! - An annotation occupies the column interval from its begin column to
//!   the end of its label, extended one column left when the begin column
//!   is positive: that leading cell is written as a blank separator and is
//!   part of the collision check, so a band that would touch the previous
//!   payload's last character collides instead of abutting it.
//! - On collision the current band is flushed as-is (including any blank
//!   padding the failed attempt grew it by) and the same range is retried
//!   on a fresh band, which always succeeds. Overlapping ranges therefore
//!   stack bands instead of corrupting each other.
//! - A range reaching past the end of its starting line is truncated:
//!   tildes run to the end of the line and `...` marks the spill.
//!
//! The renderer holds only a [`Palette`]; everything else lives in a
//! per-call [`RenderState`], so rendering one node never affects the next.

use super::colors::Palette;
use super::slot::AnnotationSlot;
use crate::mica::source::{SourceBuffer, SourceMap, SourceRange};
use owo_colors::OwoColorize;
use std::error::Error;
use std::fmt;
use std::io::{self, Write};

const NO_LOCATION: &str = "[no location info]";
const EMPTY_LOCATION: &str = "[location info present but empty]";

/// Errors that can occur while rendering one node's ranges
#[derive(Debug)]
pub enum RenderError {
    Io(io::Error),
    /// A range names a line the buffer does not have
    LineOutOfBounds { line: usize },
    /// A range begins past the end of its line
    ColumnOutOfBounds { line: usize, column: usize },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Io(err) => write!(f, "failed to write visualization: {}", err),
            RenderError::LineOutOfBounds { line } => {
                write!(f, "source map references line {} outside the buffer", line)
            }
            RenderError::ColumnOutOfBounds { line, column } => {
                write!(
                    f,
                    "source map references column {} past the end of line {}",
                    column, line
                )
            }
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RenderError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> Self {
        RenderError::Io(err)
    }
}

/// Per-invocation layout state; nothing survives across nodes
struct RenderState<'a> {
    current_line: Option<usize>,
    source_line: &'a str,
    slot: AnnotationSlot,
}

/// Renders one node's source map as annotation bands
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    palette: Palette,
}

impl Renderer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Visualizes one node's ranges
    ///
    /// `map: None` prints the "no location info" marker; a map whose
    /// `expression` range is missing or empty prints the "present but
    /// empty" marker. Everything else lays out annotation bands.
    pub fn render<W: Write>(
        &self,
        map: Option<&SourceMap>,
        buffer: &SourceBuffer,
        out: &mut W,
    ) -> Result<(), RenderError> {
        let Some(map) = map else {
            writeln!(out, "{}", NO_LOCATION.style(self.palette.marker))?;
            return Ok(());
        };
        if map.expression().map_or(true, SourceRange::is_empty) {
            writeln!(out, "{}", EMPTY_LOCATION.style(self.palette.marker))?;
            return Ok(());
        }

        let mut ranges: Vec<(&'static str, &SourceRange)> = map
            .entries()
            .iter()
            .filter_map(|(label, range)| range.map(|range| (*label, range)))
            .collect();
        ranges.sort_by_key(|(label, range)| (range.line(), *label == "expression"));

        let mut state = RenderState {
            current_line: None,
            source_line: "",
            slot: AnnotationSlot::new(),
        };
        for (label, range) in ranges {
            self.place(label, range, buffer, &mut state, out)?;
        }
        self.flush(&mut state.slot, out)
    }

    /// Lays out one annotation, flushing and retrying on collision
    fn place<'a, W: Write>(
        &self,
        label: &str,
        range: &SourceRange,
        buffer: &'a SourceBuffer,
        state: &mut RenderState<'a>,
        out: &mut W,
    ) -> Result<(), RenderError> {
        if state.current_line != Some(range.line()) {
            self.flush(&mut state.slot, out)?;
            let line = range.line();
            let text = buffer
                .line(line)
                .ok_or(RenderError::LineOutOfBounds { line })?;
            writeln!(out, "{}", text.style(self.palette.source))?;
            state.source_line = text;
            state.current_line = Some(line);
        }

        let source_len = state.source_line.chars().count();
        let beg_col = range.column();
        if beg_col > source_len {
            return Err(RenderError::ColumnOutOfBounds {
                line: range.line(),
                column: beg_col,
            });
        }

        // A range reaching past this line truncates to the line end plus a
        // three-char ellipsis
        let multiline = beg_col + range.len() > source_len;
        let underline = if multiline {
            format!("{}...", "~".repeat(source_len - beg_col))
        } else {
            "~".repeat(range.len())
        };
        let end_col = beg_col + underline.chars().count() + 1 + label.len();
        let (start_col, payload) = if beg_col > 0 {
            (beg_col - 1, format!(" {} {}", underline, label))
        } else {
            (beg_col, format!("{} {}", underline, label))
        };

        loop {
            state.slot.grow_to(end_col);
            if state.slot.is_blank(start_col..end_col) {
                state.slot.write(start_col..end_col, &payload);
                return Ok(());
            }
            // Collision with an already placed annotation: flush this band
            // (as grown) and retry on a fresh one
            self.flush(&mut state.slot, out)?;
        }
    }

    /// Prints a non-empty band with highlighting and resets it
    fn flush<W: Write>(&self, slot: &mut AnnotationSlot, out: &mut W) -> Result<(), RenderError> {
        if !slot.is_empty() {
            writeln!(out, "{}", self.palette.highlight(&slot.as_text()))?;
            slot.clear();
        }
        Ok(())
    }
}
