//! Blocking SPI transport to the VFD controller
//!
//! The RP2040 SPI block only shifts MSB first, so LSB-first wiring is
//! handled by reversing each byte before it goes out. Chip select is a plain
//! GPIO so setup and hold times can be honoured around every buffer.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::spi::{self, Blocking, Spi};
use embassy_time::{block_for, Duration};
use heapless::Vec;

use vfdmeter_hal::{BitOrder, Phase, Polarity, Transport, TransportConfig};
use vfdmeter_protocol::MAX_COMMAND_LEN;

/// Lowest clock the SPI prescalers reach from a 125 MHz peripheral clock
pub const MIN_FREQUENCY_HZ: u32 = 2_000;

/// Highest clock the SPI block supports (clk_peri / 2)
pub const MAX_FREQUENCY_HZ: u32 = 62_500_000;

/// Transport errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum TransportError {
    /// Requested clock outside the supported range
    UnsupportedFrequency,
    /// The SPI peripheral reported a failure
    Bus,
}

/// SPI peripheral plus chip-select pin
pub struct SpiTransport<'d, T: spi::Instance> {
    spi: Spi<'d, T, Blocking>,
    cs: Output<'d>,
    config: TransportConfig,
}

impl<'d, T: spi::Instance> SpiTransport<'d, T> {
    /// Take ownership of an initialized SPI and an idle-high CS pin
    pub fn new(spi: Spi<'d, T, Blocking>, cs: Output<'d>) -> Self {
        Self {
            spi,
            cs,
            config: TransportConfig::default(),
        }
    }

    /// Write bytes in the configured bit order
    fn write_ordered(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        match self.config.bit_order {
            BitOrder::MsbFirst => self
                .spi
                .blocking_write(bytes)
                .map_err(|_| TransportError::Bus),
            BitOrder::LsbFirst => {
                for chunk in bytes.chunks(MAX_COMMAND_LEN) {
                    let reversed: Vec<u8, MAX_COMMAND_LEN> =
                        chunk.iter().map(|b| b.reverse_bits()).collect();
                    self.spi
                        .blocking_write(&reversed)
                        .map_err(|_| TransportError::Bus)?;
                }
                Ok(())
            }
        }
    }
}

/// Translate bus settings into the SPI block's configuration
fn spi_config(config: &TransportConfig) -> Result<spi::Config, TransportError> {
    if !(MIN_FREQUENCY_HZ..=MAX_FREQUENCY_HZ).contains(&config.frequency_hz) {
        return Err(TransportError::UnsupportedFrequency);
    }

    let (polarity, phase) = config.mode.into();

    let mut cfg = spi::Config::default();
    cfg.frequency = config.frequency_hz;
    cfg.polarity = match polarity {
        Polarity::IdleLow => spi::Polarity::IdleLow,
        Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    cfg.phase = match phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    Ok(cfg)
}

impl<T: spi::Instance> Transport for SpiTransport<'_, T> {
    type Error = TransportError;

    fn configure(&mut self, config: &TransportConfig) -> Result<(), Self::Error> {
        let cfg = spi_config(config)?;
        self.spi.set_config(&cfg);
        self.config = *config;
        debug!("SPI configured: {}", config);
        Ok(())
    }

    fn send(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        if bytes.is_empty() {
            return Ok(());
        }

        self.cs.set_low();
        block_for(Duration::from_micros(self.config.cs_setup_us as u64));

        let result = self.write_ordered(bytes);

        block_for(Duration::from_micros(self.config.cs_hold_us as u64));
        self.cs.set_high();

        if result.is_err() {
            trace!("SPI write of {} bytes failed", bytes.len());
        }
        result
    }
}
