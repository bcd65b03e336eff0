//! Board-agnostic core logic for the VFD bar meter
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Framebuffer of raw cell patterns
//! - Glyph tables for the bar animation
//! - Display context (framebuffer + transport + protocol encoding)
//! - Workloads (bar animation, blank, blinking text)
//! - Worklist scheduler
//! - Configuration types and parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod display;
pub mod framebuffer;
pub mod glyph;
pub mod scheduler;
pub mod workload;

#[cfg(test)]
pub(crate) mod testing;

pub use display::{Display, DisplayError};
pub use framebuffer::Framebuffer;
