//! Trainer configuration
//!
//! Board-agnostic settings plus a small parser for the TOML subset the
//! firmware embeds.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
