//! Analog-to-digital converter drivers

pub mod ads1x15;
pub mod analog_in;

#[cfg(test)]
pub(crate) mod mock;

pub use ads1x15::{Ads1x15, DEFAULT_ADDRESS, MAX_READY_POLLS};
pub use analog_in::AnalogIn;
