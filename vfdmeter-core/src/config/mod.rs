//! Configuration types
//!
//! Board-agnostic configuration structures plus the parser for the
//! embedded `display.toml`.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
