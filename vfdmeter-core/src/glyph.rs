//! Glyph tables for the bar animation

use vfdmeter_protocol::SEGMENTS_PER_CELL;

/// Number of bar levels (empty through full)
pub const LEVELS: usize = 8;

/// Column patterns filling a 7-dot column from the bottom up
///
/// Index 0 is empty, index `LEVELS - 1` is full.
pub const BAR_GLYPHS: [u8; LEVELS] = [0x00, 0x40, 0x60, 0x70, 0x78, 0x7C, 0x7E, 0x7F];

/// Empty column pattern
pub const EMPTY: u8 = BAR_GLYPHS[0];

/// Space character in the controller's character ROM
pub const SPACE: u8 = b' ';

/// Column pattern for a level, saturating at full
pub fn bar_glyph(level: u8) -> u8 {
    BAR_GLYPHS[(level as usize).min(LEVELS - 1)]
}

/// Which sub-column drives each segment slot, indexed by columns per cell
///
/// `None` slots are forced to [`EMPTY`] so that bars sharing a cell keep a
/// visible gap between them.
pub static DISTRIBUTION: [[Option<u8>; SEGMENTS_PER_CELL]; SEGMENTS_PER_CELL + 1] = [
    [None, None, None, None, None],
    [Some(0), Some(0), Some(0), Some(0), Some(0)],
    [Some(0), Some(0), None, Some(1), Some(1)],
    [Some(0), None, Some(1), None, Some(2)],
    [Some(0), Some(1), Some(2), Some(3), None],
    [Some(0), Some(1), Some(2), Some(3), Some(4)],
];

/// Slot assignment for a columns-per-cell value (clamped to the table)
pub fn distribution(columns_per_cell: usize) -> &'static [Option<u8>; SEGMENTS_PER_CELL] {
    &DISTRIBUTION[columns_per_cell.min(SEGMENTS_PER_CELL)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_glyphs_fill_monotonically() {
        for pair in BAR_GLYPHS.windows(2) {
            // Each level adds exactly one dot to the previous one
            assert_eq!(pair[1] & pair[0], pair[0]);
            assert_eq!((pair[1] ^ pair[0]).count_ones(), 1);
        }
        assert_eq!(bar_glyph(0), 0x00);
        assert_eq!(bar_glyph(7), 0x7F);
        assert_eq!(bar_glyph(200), 0x7F);
    }

    #[test]
    fn test_distribution_table() {
        assert_eq!(distribution(0), &[None; 5]);
        assert_eq!(distribution(1), &[Some(0); 5]);
        assert_eq!(distribution(2), &[Some(0), Some(0), None, Some(1), Some(1)]);
        assert_eq!(distribution(3), &[Some(0), None, Some(1), None, Some(2)]);
        assert_eq!(distribution(4), &[Some(0), Some(1), Some(2), Some(3), None]);
        assert_eq!(
            distribution(5),
            &[Some(0), Some(1), Some(2), Some(3), Some(4)]
        );
    }

    #[test]
    fn test_three_per_cell_slots() {
        let assigned: heapless::Vec<usize, 5> = distribution(3)
            .iter()
            .enumerate()
            .filter_map(|(slot, sub)| sub.map(|_| slot))
            .collect();
        assert_eq!(&assigned[..], &[0, 2, 4]);
    }

    #[test]
    fn test_every_sub_column_is_reachable() {
        for cpc in 1..=SEGMENTS_PER_CELL {
            for sub in 0..cpc as u8 {
                assert!(distribution(cpc).contains(&Some(sub)));
            }
        }
    }
}
