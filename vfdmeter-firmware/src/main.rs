//! vfdmeter - VFD bar-meter firmware
//!
//! Drives an 8-cell 5x7 vacuum fluorescent display from an RP2040 over a
//! write-only SPI link. After a short greeting, a worklist of animations
//! (bars, blank, blinking text) runs forever.
//!
//! Wiring: SPI0 SCK on GPIO18, MOSI on GPIO19, chip select on GPIO17.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::spi::{self, Spi};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use vfdmeter_core::config::{parse_config, MeterConfig};
use vfdmeter_core::scheduler::Scheduler;
use vfdmeter_core::workload::build_worklist;
use vfdmeter_core::Display;
use vfdmeter_hal::Transport;

use crate::transport::SpiTransport;

mod transport;

/// Embedded configuration (compiled into firmware)
/// Edit display.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../display.toml");

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("vfdmeter firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Chip select idles high; the bus is reconfigured from display.toml below
    let cs = Output::new(p.PIN_17, Level::High);
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi::Config::default());
    let mut transport = SpiTransport::new(spi, cs);

    if let Err(e) = transport.configure(&config.transport) {
        defmt::panic!("Failed to configure display transport: {}", e);
    }
    info!(
        "SPI ready: {} Hz, {}, {}",
        config.transport.frequency_hz, config.transport.mode, config.transport.bit_order
    );

    let mut display = Display::new(transport);
    let mut delay = Delay;

    display.startup(&config.display, &mut delay);
    info!("Display initialized");

    let worklist = unwrap!(build_worklist(&config));
    let mut scheduler = unwrap!(Scheduler::new(worklist));
    info!("Running {} jobs", scheduler.worklist().len());

    scheduler.run(&mut display, &mut delay)
}

/// Parse the embedded display.toml
///
/// build.rs validates the file, so a parse failure here means the two
/// validators disagree. Fall back to built-in defaults rather than halt.
fn load_config() -> MeterConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            for job in config.jobs.iter() {
                debug!(
                    "job {}: {} x{} every {} ms, then {} ms",
                    job.name.as_str(),
                    job.kind,
                    job.repeat,
                    job.inter_delay_ms,
                    job.post_delay_ms
                );
            }
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {}", e);
            error!("Using built-in defaults");
            MeterConfig::default()
        }
    }
}
