//! Dashboard configuration
//!
//! The firmware embeds a small TOML file; [`parse_config`] reads it with a
//! no_std parser and validates the result. Missing keys keep their
//! defaults.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
