//! Vernier - single-shot analog sampler firmware
//!
//! Main firmware binary for RP2040 boards with an ADS1015/ADS1115 on I2C.
//! Opens the configured bus, takes one reading of the configured input
//! and logs it over defmt:
//!
//! ```text
//! ADS1015 Analog Input:
//!   raw	    v
//!  1024	2.048
//! ```

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::i2c::I2c;
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use vernier_hal_rp2040::i2c::{controller_config, validate_pins, I2cBlock};

mod config;
mod sample;

/// Embedded configuration (compiled into firmware)
/// Edit sampler.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../sampler.toml");

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Vernier firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load(EMBEDDED_CONFIG);
    let bus = config.bus;

    let block = match I2cBlock::from_index(bus.block)
        .and_then(|b| validate_pins(b, bus.sda_pin, bus.scl_pin).map(|_| b))
    {
        Ok(block) => block,
        Err(e) => {
            error!(
                "Bad I2C wiring: I2C{} SDA=GP{} SCL=GP{} ({})",
                bus.block, bus.sda_pin, bus.scl_pin, e
            );
            idle().await
        }
    };

    let i2c_config = controller_config(bus.i2c);
    info!(
        "Opening I2C{} SDA=GP{} SCL=GP{} at {} Hz",
        block.index(),
        bus.sda_pin,
        bus.scl_pin,
        bus.i2c.frequency
    );

    // embassy-rp pins are distinct types, so each pair validate_pins
    // accepts gets its own arm
    let result = match (block, bus.sda_pin, bus.scl_pin) {
        (I2cBlock::I2c0, 0, 1) => {
            let i2c = I2c::new_blocking(p.I2C0, p.PIN_1, p.PIN_0, i2c_config);
            sample::run(i2c, &config).await
        }
        (I2cBlock::I2c0, 4, 5) => {
            let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);
            sample::run(i2c, &config).await
        }
        (I2cBlock::I2c0, 8, 9) => {
            let i2c = I2c::new_blocking(p.I2C0, p.PIN_9, p.PIN_8, i2c_config);
            sample::run(i2c, &config).await
        }
        (I2cBlock::I2c0, 12, 13) => {
            let i2c = I2c::new_blocking(p.I2C0, p.PIN_13, p.PIN_12, i2c_config);
            sample::run(i2c, &config).await
        }
        (I2cBlock::I2c0, 16, 17) => {
            let i2c = I2c::new_blocking(p.I2C0, p.PIN_17, p.PIN_16, i2c_config);
            sample::run(i2c, &config).await
        }
        (I2cBlock::I2c0, 20, 21) => {
            let i2c = I2c::new_blocking(p.I2C0, p.PIN_21, p.PIN_20, i2c_config);
            sample::run(i2c, &config).await
        }
        (I2cBlock::I2c0, 24, 25) => {
            let i2c = I2c::new_blocking(p.I2C0, p.PIN_25, p.PIN_24, i2c_config);
            sample::run(i2c, &config).await
        }
        (I2cBlock::I2c0, 28, 29) => {
            let i2c = I2c::new_blocking(p.I2C0, p.PIN_29, p.PIN_28, i2c_config);
            sample::run(i2c, &config).await
        }
        (I2cBlock::I2c1, 2, 3) => {
            let i2c = I2c::new_blocking(p.I2C1, p.PIN_3, p.PIN_2, i2c_config);
            sample::run(i2c, &config).await
        }
        (I2cBlock::I2c1, 6, 7) => {
            let i2c = I2c::new_blocking(p.I2C1, p.PIN_7, p.PIN_6, i2c_config);
            sample::run(i2c, &config).await
        }
        (I2cBlock::I2c1, 10, 11) => {
            let i2c = I2c::new_blocking(p.I2C1, p.PIN_11, p.PIN_10, i2c_config);
            sample::run(i2c, &config).await
        }
        (I2cBlock::I2c1, 14, 15) => {
            let i2c = I2c::new_blocking(p.I2C1, p.PIN_15, p.PIN_14, i2c_config);
            sample::run(i2c, &config).await
        }
        (I2cBlock::I2c1, 18, 19) => {
            let i2c = I2c::new_blocking(p.I2C1, p.PIN_19, p.PIN_18, i2c_config);
            sample::run(i2c, &config).await
        }
        (I2cBlock::I2c1, 22, 23) => {
            let i2c = I2c::new_blocking(p.I2C1, p.PIN_23, p.PIN_22, i2c_config);
            sample::run(i2c, &config).await
        }
        (I2cBlock::I2c1, 26, 27) => {
            let i2c = I2c::new_blocking(p.I2C1, p.PIN_27, p.PIN_26, i2c_config);
            sample::run(i2c, &config).await
        }
        _ => {
            error!(
                "No wiring for I2C{} SDA=GP{} SCL=GP{}",
                block.index(),
                bus.sda_pin,
                bus.scl_pin
            );
            idle().await
        }
    };

    match result {
        Ok(reading) => sample::report(&reading),
        Err(e) => error!("Sample failed: {}", e),
    }

    idle().await
}

/// Nothing left to do; keep running so RTT logs stay readable
async fn idle() -> ! {
    loop {
        Timer::after(Duration::from_secs(60)).await;
    }
}
