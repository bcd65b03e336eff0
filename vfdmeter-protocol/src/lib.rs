//! VFD Wire Protocol
//!
//! This crate defines the command bytes understood by 8-digit 5x7 dot-matrix
//! VFD controllers and the encoders that turn display data into command
//! buffers. It performs no I/O.
//!
//! # Memory model
//!
//! The controller keeps two memories:
//! ```text
//! ┌──────────────┐  address   ┌──────────────────────────────┐
//! │ DCRAM        │ ─────────► │ character ROM (ASCII) or     │
//! │ 1 byte/cell  │            │ CGRAM (user patterns 0..7)   │
//! └──────────────┘            └──────────────────────────────┘
//! ```
//! - **DCRAM** (`0x20 + begin`) selects which pattern each cell shows.
//! - **CGRAM** (`0x40 + begin`) loads raw 5-byte column patterns.
//!
//! The two spaces must never be mixed: writing patterns through the DCRAM
//! command shows garbage characters, and the reverse corrupts user glyphs.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;

pub use command::{
    address_window, dimming, grid_write, lightness, mode_set, show, Command, ADDRESS_WINDOW_BASE,
    GRID_WRITE_BASE, MAX_COMMAND_LEN,
};

/// Number of character cells on the display
pub const NUM_CELLS: usize = 8;

/// Column bytes per cell (5x7 matrix, one byte per column)
pub const SEGMENTS_PER_CELL: usize = 5;

/// Highest valid cell index
pub const MAX_CELL_INDEX: usize = NUM_CELLS - 1;

/// Raw segment pattern of one cell
pub type Cell = [u8; SEGMENTS_PER_CELL];
