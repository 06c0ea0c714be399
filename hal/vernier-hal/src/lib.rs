//! Vernier Hardware Abstraction Layer
//!
//! This crate defines the bus seam that converter drivers are written
//! against. Any `embedded-hal` 1.0 I2C implementation is a valid bus, so
//! the same driver code runs on the RP2040 firmware and on host-side mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (vernier-firmware, tests)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  vernier-drivers (ADS1x15)              │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  vernier-hal (this crate - bus traits)  │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  embassy-rp   │       │   host mocks  │
//! │  blocking I2C │       │               │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C bus operations
//! - [`shared::SharedI2c`] - Mutex-serialized access to one bus

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;
pub mod shared;

// Re-export key types at crate root for convenience
pub use i2c::{BusFault, I2cBus, I2cConfig};
pub use shared::{SharedBusError, SharedI2c, SharedI2cDevice};
