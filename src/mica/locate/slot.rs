//! The annotation band under assembly
//!
//! One [`AnnotationSlot`] is a growable array of character cells for a
//! single band line. The renderer grows it, queries whether a column
//! interval is still blank, and writes payloads that exactly fill their
//! interval. Cells are chars, not bytes: columns are terminal cells.

use std::ops::Range;

/// A column-indexed char buffer for one annotation band
#[derive(Debug, Default)]
pub struct AnnotationSlot {
    cells: Vec<char>,
}

impl AnnotationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when nothing has been placed since the last clear; flushing an
    /// empty slot prints nothing
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Pads with blanks on the right up to `len`; never shrinks
    pub fn grow_to(&mut self, len: usize) {
        if len > self.cells.len() {
            self.cells.resize(len, ' ');
        }
    }

    /// Whether every cell in the interval is whitespace. The interval must
    /// be in bounds; callers grow first.
    pub fn is_blank(&self, interval: Range<usize>) -> bool {
        self.cells[interval].iter().all(|cell| cell.is_whitespace())
    }

    /// Writes a payload that exactly fills the interval
    pub fn write(&mut self, interval: Range<usize>, payload: &str) {
        let chars: Vec<char> = payload.chars().collect();
        assert_eq!(
            chars.len(),
            interval.len(),
            "payload must exactly fill its interval"
        );
        self.cells[interval].copy_from_slice(&chars);
    }

    pub fn as_text(&self) -> String {
        self.cells.iter().collect()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grow_pads_with_blanks() {
        let mut slot = AnnotationSlot::new();
        slot.grow_to(4);
        assert_eq!(slot.len(), 4);
        assert_eq!(slot.as_text(), "    ");
        assert!(slot.is_blank(0..4));
    }

    #[test]
    fn test_grow_never_shrinks() {
        let mut slot = AnnotationSlot::new();
        slot.grow_to(6);
        slot.grow_to(2);
        assert_eq!(slot.len(), 6);
    }

    #[test]
    fn test_write_exact_fit() {
        let mut slot = AnnotationSlot::new();
        slot.grow_to(11);
        slot.write(0..11, "~~~ keyword");
        assert_eq!(slot.as_text(), "~~~ keyword");
    }

    #[test]
    fn test_written_cells_are_not_blank() {
        let mut slot = AnnotationSlot::new();
        slot.grow_to(8);
        slot.write(2..5, "~~~");
        assert!(!slot.is_blank(0..8));
        assert!(!slot.is_blank(4..5));
        assert!(slot.is_blank(0..2));
        assert!(slot.is_blank(5..8));
    }

    #[test]
    fn test_clear_empties_the_slot() {
        let mut slot = AnnotationSlot::new();
        slot.grow_to(3);
        slot.write(0..3, "~ a");
        assert!(!slot.is_empty());
        slot.clear();
        assert!(slot.is_empty());
        assert_eq!(slot.as_text(), "");
    }

    #[test]
    #[should_panic(expected = "payload must exactly fill its interval")]
    fn test_write_rejects_wrong_length() {
        let mut slot = AnnotationSlot::new();
        slot.grow_to(5);
        slot.write(0..5, "~~");
    }
}
