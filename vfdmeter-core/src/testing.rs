//! Host test doubles

use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use vfdmeter_hal::{Transport, TransportConfig};

/// Transport that records every buffer it is asked to send
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub sent: Vec<Vec<u8>>,
    fail: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose every send fails (nothing is recorded)
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl Transport for RecordingTransport {
    type Error = ();

    fn configure(&mut self, _config: &TransportConfig) -> Result<(), Self::Error> {
        Ok(())
    }

    fn send(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(());
        }
        self.sent.push(bytes.to_vec());
        Ok(())
    }
}

/// Delay that returns immediately and records requested milliseconds
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub calls: Vec<u32>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all requested delays
    pub fn total_ms(&self) -> u64 {
        self.calls.iter().map(|&ms| ms as u64).sum()
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls.push(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls.push(ms);
    }
}
