//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in vernier-core:
//!
//! - ADS1015 / ADS1115 I2C converters
//! - Channel-bound analog inputs on those converters

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
