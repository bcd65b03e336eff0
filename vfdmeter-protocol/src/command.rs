//! Command encoding for the VFD controller.
//!
//! Every command is a single chip-select transaction:
//! - OPCODE (1 byte): command, with the start cell folded into the low bits
//!   for RAM writes
//! - DATA (0-40 bytes): command-specific payload
//!
//! RAM writes are clamped to the display rather than rejected: the start
//! cell is pinned to the last cell and the payload is cut at the display
//! edge.

use heapless::Vec;

use crate::{Cell, MAX_CELL_INDEX, NUM_CELLS, SEGMENTS_PER_CELL};

/// DCRAM write base (select pattern per cell)
pub const ADDRESS_WINDOW_BASE: u8 = 0x20;

/// CGRAM write base (load raw cell patterns)
pub const GRID_WRITE_BASE: u8 = 0x40;

/// Dimming command
pub const DIMMING: u8 = 0xE0;

/// Lightness command
pub const LIGHTNESS: u8 = 0xE4;

/// Show (commit) command
pub const SHOW: u8 = 0xE8;

/// Mode-set command and its argument
pub const MODE_SET: [u8; 2] = [0x20, 0x30];

/// Largest command: opcode plus a full CGRAM image
pub const MAX_COMMAND_LEN: usize = 1 + NUM_CELLS * SEGMENTS_PER_CELL;

/// An encoded command buffer
pub type Command = Vec<u8, MAX_COMMAND_LEN>;

/// Clamp a start cell and a requested count to the display
///
/// Returns `(begin, count)` with `begin <= MAX_CELL_INDEX` and
/// `begin + count <= NUM_CELLS`.
fn clamp_window(begin: u8, count: usize) -> (usize, usize) {
    let begin = (begin as usize).min(MAX_CELL_INDEX);
    let count = count.min(NUM_CELLS - begin);
    (begin, count)
}

/// Encode a DCRAM write: show pattern `addrs[i]` at cell `begin + i`
pub fn address_window(begin: u8, addrs: &[u8]) -> Command {
    let (begin, len) = clamp_window(begin, addrs.len());

    let mut cmd = Command::new();
    // Capacity is MAX_COMMAND_LEN; clamped payload is at most NUM_CELLS bytes
    let _ = cmd.push(ADDRESS_WINDOW_BASE + begin as u8);
    let _ = cmd.extend_from_slice(&addrs[..len]);
    cmd
}

/// Encode a CGRAM write: load `cells[i]` into pattern slot `begin + i`
pub fn grid_write(begin: u8, cells: &[Cell]) -> Command {
    let (begin, count) = clamp_window(begin, cells.len());

    let mut cmd = Command::new();
    let _ = cmd.push(GRID_WRITE_BASE + begin as u8);
    for cell in &cells[..count] {
        let _ = cmd.extend_from_slice(cell);
    }
    cmd
}

/// Encode a dimming command
pub fn dimming(level: u8) -> Command {
    two_byte(DIMMING, level)
}

/// Encode a lightness command
pub fn lightness(level: u8) -> Command {
    two_byte(LIGHTNESS, level)
}

/// Encode the show (commit) command
pub fn show() -> Command {
    let mut cmd = Command::new();
    let _ = cmd.push(SHOW);
    cmd
}

/// Encode the mode-set command
pub fn mode_set() -> Command {
    let mut cmd = Command::new();
    let _ = cmd.extend_from_slice(&MODE_SET);
    cmd
}

fn two_byte(opcode: u8, arg: u8) -> Command {
    let mut cmd = Command::new();
    let _ = cmd.extend_from_slice(&[opcode, arg]);
    cmd
}
