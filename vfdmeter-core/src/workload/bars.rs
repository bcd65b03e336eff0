//! Bar animation
//!
//! Every column runs its own triangle wave through the bar levels:
//! `0, 1, ..., 7, 6, ..., 1, 0, 1, ...`. Columns are either laid out one per
//! segment slot, or packed several to a cell using the distribution table.

use heapless::Vec;
use vfdmeter_hal::Transport;
use vfdmeter_protocol::{NUM_CELLS, SEGMENTS_PER_CELL};

use super::Workload;
use crate::display::Display;
use crate::framebuffer::Framebuffer;
use crate::glyph::{bar_glyph, distribution, EMPTY, LEVELS};

/// Most columns the display can hold (one per segment slot)
pub const MAX_COLUMNS: usize = NUM_CELLS * SEGMENTS_PER_CELL;

/// Phase period of the triangle wave
pub const PERIOD: u8 = 2 * (LEVELS as u8 - 1);

/// Column placement policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Layout {
    /// Column `i` drives segment slot `i % 5` of cell `i / 5`
    Simple,
    /// Columns share cells, spread by the distribution table
    #[default]
    Packed,
}

/// Level shown for a phase value
pub fn level_for_phase(phase: u8) -> u8 {
    let phase = phase % PERIOD;
    if (phase as usize) < LEVELS {
        phase
    } else {
        PERIOD - phase
    }
}

/// Whether every column gets a slot in the packed layout
///
/// Up to `NUM_CELLS` columns take one cell each; past that the count must be
/// a whole number of columns per cell or the trailing columns are dropped.
pub fn packs_evenly(columns: usize) -> bool {
    columns <= NUM_CELLS || (columns <= MAX_COLUMNS && columns % NUM_CELLS == 0)
}

#[cfg(feature = "defmt")]
fn warn_if_uneven(columns: usize, layout: Layout) {
    if layout == Layout::Packed && !packs_evenly(columns) {
        defmt::warn!("{} packed bar columns do not fill the cells evenly", columns);
    }
}

/// Independently animated bar columns
#[derive(Debug, Clone)]
pub struct BarAnimation {
    phases: Vec<u8, MAX_COLUMNS>,
    layout: Layout,
}

impl BarAnimation {
    /// Create with explicit starting phases (reduced modulo the period)
    ///
    /// Phases past `MAX_COLUMNS` are dropped.
    pub fn with_phases(phases: &[u8], layout: Layout) -> Self {
        let phases = phases
            .iter()
            .take(MAX_COLUMNS)
            .map(|p| p % PERIOD)
            .collect();
        Self { phases, layout }
    }

    /// Create `columns` bars starting at scattered levels
    pub fn seeded(columns: usize, layout: Layout, seed: u32) -> Self {
        // xorshift32 must not start at zero
        let mut state = seed | 1;
        let mut phases = Vec::new();
        for _ in 0..columns.min(MAX_COLUMNS) {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let _ = phases.push((state % LEVELS as u32) as u8);
        }
        #[cfg(feature = "defmt")]
        warn_if_uneven(columns, layout);
        Self { phases, layout }
    }

    /// Number of animated columns
    pub fn columns(&self) -> usize {
        self.phases.len()
    }

    /// Placement policy
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Move every column one phase forward
    pub fn advance(&mut self) {
        for phase in self.phases.iter_mut() {
            *phase = (*phase + 1) % PERIOD;
        }
    }

    /// Current level of each column
    pub fn levels(&self) -> impl Iterator<Item = u8> + '_ {
        self.phases.iter().map(|&p| level_for_phase(p))
    }

    /// Columns per cell for the packed layout
    fn columns_per_cell(&self) -> usize {
        (self.phases.len() / NUM_CELLS).clamp(1, SEGMENTS_PER_CELL)
    }

    /// Draw the current levels into the framebuffer
    pub fn render(&self, fb: &mut Framebuffer) {
        match self.layout {
            Layout::Simple => {
                for (column, level) in self.levels().enumerate() {
                    fb.set(
                        column / SEGMENTS_PER_CELL,
                        column % SEGMENTS_PER_CELL,
                        bar_glyph(level),
                    );
                }
            }
            Layout::Packed => {
                let per_cell = self.columns_per_cell();
                let slots = distribution(per_cell);

                for (column, level) in self.levels().enumerate() {
                    let cell = column / per_cell;
                    if cell >= NUM_CELLS {
                        break;
                    }
                    let sub = (column % per_cell) as u8;

                    for (slot, owner) in slots.iter().enumerate() {
                        match owner {
                            None => {
                                fb.set(cell, slot, EMPTY);
                            }
                            Some(owner) if *owner == sub => {
                                fb.set(cell, slot, bar_glyph(level));
                            }
                            Some(_) => {}
                        }
                    }
                }
            }
        }
    }
}

impl<T: Transport> Workload<T> for BarAnimation {
    fn execute(&mut self, display: &mut Display<T>) {
        self.advance();
        self.render(display.framebuffer_mut());

        let _ = display.flush_framebuffer();
        let _ = display.show_all_cells();
    }
}
