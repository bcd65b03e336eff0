//! SPI transport abstraction
//!
//! The display only ever receives data, so the transport is write-only:
//! one call frames one chip-select assertion.

/// Byte transport to the display controller
///
/// Opening a transport is board specific (taking ownership of the SPI
/// peripheral and pins) and happens in the board crate's constructor.
pub trait Transport {
    /// Error type for transport operations
    type Error;

    /// Apply bus settings
    ///
    /// Called once at startup. A failure here is fatal to the firmware.
    fn configure(&mut self, config: &TransportConfig) -> Result<(), Self::Error>;

    /// Send one command buffer
    ///
    /// Chip select is asserted for the whole buffer and released afterwards.
    fn send(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn configure(&mut self, config: &TransportConfig) -> Result<(), Self::Error> {
        T::configure(self, config)
    }

    fn send(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        T::send(self, bytes)
    }
}

/// Transport configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransportConfig {
    /// Clock frequency in Hz
    pub frequency_hz: u32,
    /// Clock polarity and phase
    pub mode: Mode,
    /// Bit order on the wire
    pub bit_order: BitOrder,
    /// Delay between asserting chip select and the first clock (µs)
    pub cs_setup_us: u16,
    /// Delay between the last clock and releasing chip select (µs)
    pub cs_hold_us: u16,
}

impl Default for TransportConfig {
    fn default() -> Self {
        // Same as the CH347 USB bridge setup: mode 3, clock index 3 (7.5 MHz),
        // LSB first, 2 us chip-select setup and hold
        Self {
            frequency_hz: 7_500_000,
            mode: Mode::Mode3,
            bit_order: BitOrder::LsbFirst,
            cs_setup_us: 2,
            cs_hold_us: 2,
        }
    }
}

/// Bit order of each transferred byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    /// Most significant bit first
    MsbFirst,
    /// Least significant bit first (VFD controllers)
    #[default]
    LsbFirst,
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    #[default]
    Mode3,
}

impl Mode {
    /// Mode from its conventional number (0-3)
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            0 => Some(Mode::Mode0),
            1 => Some(Mode::Mode1),
            2 => Some(Mode::Mode2),
            3 => Some(Mode::Mode3),
            _ => None,
        }
    }
}

impl From<Mode> for (Polarity, Phase) {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Mode0 => (Polarity::IdleLow, Phase::CaptureOnFirstTransition),
            Mode::Mode1 => (Polarity::IdleLow, Phase::CaptureOnSecondTransition),
            Mode::Mode2 => (Polarity::IdleHigh, Phase::CaptureOnFirstTransition),
            Mode::Mode3 => (Polarity::IdleHigh, Phase::CaptureOnSecondTransition),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_number() {
        assert_eq!(Mode::from_number(0), Some(Mode::Mode0));
        assert_eq!(Mode::from_number(3), Some(Mode::Mode3));
        assert_eq!(Mode::from_number(4), None);
    }

    #[test]
    fn test_mode3_polarity_phase() {
        let (pol, pha): (Polarity, Phase) = Mode::Mode3.into();
        assert_eq!(pol, Polarity::IdleHigh);
        assert_eq!(pha, Phase::CaptureOnSecondTransition);
    }

    #[test]
    fn test_default_matches_bridge_settings() {
        let cfg = TransportConfig::default();
        assert_eq!(cfg.frequency_hz, 7_500_000);
        assert_eq!(cfg.mode, Mode::Mode3);
        assert_eq!(cfg.bit_order, BitOrder::LsbFirst);
        assert_eq!(cfg.cs_setup_us, 2);
        assert_eq!(cfg.cs_hold_us, 2);
    }
}
