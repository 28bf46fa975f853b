//! Configuration types
//!
//! Board-agnostic configuration structures and the parser for the
//! firmware's embedded `saber.toml`.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
