//! Board-agnostic core logic for Vernier analog sampling
//!
//! This crate contains everything about an ADS1x15 converter that does
//! not depend on a concrete bus or board:
//!
//! - Device model (chip variants, gain, input multiplexer)
//! - Config register encoding
//! - Conversion results and their voltage scaling
//! - The sampler trait and its error type
//! - Report formatting
//! - Sampler configuration and its TOML parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod chip;
pub mod config;
pub mod gain;
pub mod mux;
pub mod reading;
pub mod register;
pub mod report;
pub mod traits;

pub use chip::Chip;
pub use gain::{lsb_size, Gain};
pub use mux::InputMux;
pub use reading::Reading;
pub use register::{ConfigWord, Mode};
pub use traits::{AnalogSampler, SampleError};
