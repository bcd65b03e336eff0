//! Framebuffer of raw cell patterns
//!
//! One row per display cell, one byte per segment column. This is the
//! image that gets loaded into the controller's CGRAM.

use vfdmeter_protocol::{Cell, NUM_CELLS, SEGMENTS_PER_CELL};

/// Fixed `NUM_CELLS` x `SEGMENTS_PER_CELL` grid of segment patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    cells: [Cell; NUM_CELLS],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    /// Create a blank framebuffer
    pub const fn new() -> Self {
        Self {
            cells: [[0; SEGMENTS_PER_CELL]; NUM_CELLS],
        }
    }

    /// Read one segment byte
    pub fn get(&self, cell: usize, segment: usize) -> Option<u8> {
        self.cells.get(cell)?.get(segment).copied()
    }

    /// Write one segment byte
    ///
    /// Out-of-range coordinates are ignored; returns whether the write landed.
    pub fn set(&mut self, cell: usize, segment: usize, value: u8) -> bool {
        match self.cells.get_mut(cell).and_then(|c| c.get_mut(segment)) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Get one cell's pattern
    pub fn cell(&self, cell: usize) -> Option<&Cell> {
        self.cells.get(cell)
    }

    /// All cells in display order
    pub fn cells(&self) -> &[Cell; NUM_CELLS] {
        &self.cells
    }

    /// Flat row-major view (cell 0 segment 0 first)
    pub fn as_bytes(&self) -> &[u8] {
        self.cells.as_flattened()
    }

    /// Blank every segment
    pub fn clear(&mut self) {
        self.cells = [[0; SEGMENTS_PER_CELL]; NUM_CELLS];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_blank() {
        let fb = Framebuffer::new();
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(fb.as_bytes().len(), NUM_CELLS * SEGMENTS_PER_CELL);
    }

    #[test]
    fn test_set_get() {
        let mut fb = Framebuffer::new();
        assert!(fb.set(3, 2, 0x7F));
        assert_eq!(fb.get(3, 2), Some(0x7F));
        assert_eq!(fb.cell(3), Some(&[0, 0, 0x7F, 0, 0]));
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut fb = Framebuffer::new();
        assert!(!fb.set(NUM_CELLS, 0, 1));
        assert!(!fb.set(0, SEGMENTS_PER_CELL, 1));
        assert_eq!(fb.get(NUM_CELLS, 0), None);
        assert_eq!(fb.get(0, SEGMENTS_PER_CELL), None);
        assert_eq!(fb, Framebuffer::new());
    }

    #[test]
    fn test_row_major_bytes() {
        let mut fb = Framebuffer::new();
        fb.set(1, 0, 0xAA);
        assert_eq!(fb.as_bytes()[SEGMENTS_PER_CELL], 0xAA);

        fb.clear();
        assert_eq!(fb.get(1, 0), Some(0));
    }
}
