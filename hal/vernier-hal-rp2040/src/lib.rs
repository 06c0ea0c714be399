//! RP2040-specific HAL helpers for the Vernier firmware
//!
//! This crate provides RP2040-specific glue for the shared `vernier-hal`
//! types:
//!
//! - I2C controller and pin-function tables
//! - Pin validation for config-driven bus setup
//! - Conversion of `vernier-hal` bus settings to embassy-rp config

#![no_std]

pub mod i2c;

// Re-export shared types from vernier-hal for convenience
pub use vernier_hal::{I2cBus, I2cConfig};
