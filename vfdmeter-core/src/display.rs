//! Display context
//!
//! Owns the framebuffer and the transport for the lifetime of the firmware.
//! Workloads receive it by `&mut` and go through it for every write, so the
//! protocol encoder is the only thing that ever produces wire bytes.

use embedded_hal::delay::DelayNs;
use vfdmeter_hal::Transport;
use vfdmeter_protocol::{self as protocol, Cell, NUM_CELLS};

use crate::config::DisplaySettings;
use crate::framebuffer::Framebuffer;
use crate::glyph::SPACE;

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Transport rejected the command buffer
    Communication,
}

/// DCRAM addresses of the user patterns, in cell order
const CGRAM_SLOTS: [u8; NUM_CELLS] = [0, 1, 2, 3, 4, 5, 6, 7];

/// Framebuffer plus the transport it is pushed through
pub struct Display<T> {
    transport: T,
    framebuffer: Framebuffer,
    send_failures: u32,
}

impl<T: Transport> Display<T> {
    /// Wrap an opened and configured transport
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            framebuffer: Framebuffer::new(),
            send_failures: 0,
        }
    }

    /// Current framebuffer
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Mutable framebuffer (for workloads)
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Number of command buffers the transport has rejected so far
    pub fn send_failures(&self) -> u32 {
        self.send_failures
    }

    /// Send one encoded command
    ///
    /// Failures are counted and reported, never retried.
    fn send(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        match self.transport.send(bytes) {
            Ok(()) => Ok(()),
            Err(_) => {
                self.send_failures = self.send_failures.wrapping_add(1);
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "VFD send failed (opcode {=u8:#x}, {} bytes)",
                    bytes.first().copied().unwrap_or(0),
                    bytes.len()
                );
                Err(DisplayError::Communication)
            }
        }
    }

    /// Show pattern `addrs[i]` at cell `begin + i` (clamped to the display)
    pub fn write_addresses(&mut self, begin: u8, addrs: &[u8]) -> Result<(), DisplayError> {
        let cmd = protocol::address_window(begin, addrs);
        self.send(&cmd)
    }

    /// Load raw patterns into CGRAM starting at `begin` (clamped to the display)
    pub fn write_grid(&mut self, begin: u8, cells: &[Cell]) -> Result<(), DisplayError> {
        let cmd = protocol::grid_write(begin, cells);
        self.send(&cmd)
    }

    /// Show a single pattern at one cell
    pub fn show_at(&mut self, index: u8, address: u8) -> Result<(), DisplayError> {
        self.write_addresses(index, &[address])
    }

    /// Show ASCII text starting at a cell
    pub fn show_text(&mut self, index: u8, text: &str) -> Result<(), DisplayError> {
        self.write_addresses(index, text.as_bytes())
    }

    /// Point every cell at its own user pattern
    pub fn show_all_cells(&mut self) -> Result<(), DisplayError> {
        self.write_addresses(0, &CGRAM_SLOTS)
    }

    /// Load the whole framebuffer into CGRAM
    pub fn flush_framebuffer(&mut self) -> Result<(), DisplayError> {
        let cmd = protocol::grid_write(0, self.framebuffer.cells());
        self.send(&cmd)
    }

    /// Show spaces on every cell
    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.write_addresses(0, &[SPACE; NUM_CELLS])
    }

    /// Set dimming level
    pub fn set_dimming(&mut self, level: u8) -> Result<(), DisplayError> {
        self.send(&protocol::dimming(level))
    }

    /// Set lightness level
    pub fn set_lightness(&mut self, level: u8) -> Result<(), DisplayError> {
        self.send(&protocol::lightness(level))
    }

    /// Commit pending settings
    pub fn show(&mut self) -> Result<(), DisplayError> {
        self.send(&protocol::show())
    }

    /// Run the power-on sequence and greet
    ///
    /// Dimming, lightness, mode-set, show, greeting text, then a fixed pause.
    /// Individual send failures do not abort the sequence.
    pub fn startup<D: DelayNs>(&mut self, settings: &DisplaySettings, delay: &mut D) {
        let _ = self.set_dimming(settings.dimming);
        let _ = self.set_lightness(settings.lightness);
        let _ = self.send(&protocol::mode_set());
        let _ = self.show();
        let _ = self.show_text(0, settings.greeting.as_str());

        delay.delay_ms(settings.greeting_pause_ms);
    }
}
