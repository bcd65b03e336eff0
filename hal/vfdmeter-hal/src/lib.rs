//! vfdmeter Hardware Abstraction Layer
//!
//! This crate defines the byte transport the display core talks through.
//! Board crates implement it on top of their SPI peripheral; host tests
//! implement it with a recording buffer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  vfdmeter-core (display, scheduler)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  vfdmeter-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  RP2040 SPI0  │       │  test doubles │
//! │  (firmware)   │       │  (host)       │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`spi::Transport`] - configure + send bytes

#![no_std]
#![deny(unsafe_code)]

pub mod spi;

// Re-export key types at crate root for convenience
pub use spi::{BitOrder, Mode, Phase, Polarity, Transport, TransportConfig};
