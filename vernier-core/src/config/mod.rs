//! Configuration types
//!
//! Board-agnostic sampler configuration, written by hand in TOML and
//! parsed without an allocator.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError, ParseErrorKind};
pub use types::*;
