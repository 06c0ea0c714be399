//! One-shot sampling
//!
//! Builds the converter on whichever bus main opened, takes one reading
//! and logs the report.

use defmt::*;
use embassy_time::{Duration, Timer};

use vernier_core::config::SamplerConfig;
use vernier_core::report::Report;
use vernier_core::{Mode, Reading, SampleError};
use vernier_drivers::adc::{Ads1x15, AnalogIn};
use vernier_hal_rp2040::I2cBus;

/// Configure the converter and take one reading
pub async fn run<I2C: I2cBus>(i2c: I2C, config: &SamplerConfig) -> Result<Reading, SampleError> {
    let mut adc = Ads1x15::new(i2c, config.adc.chip).with_address(config.adc.address);
    adc.set_gain(config.adc.gain);
    adc.set_data_rate(config.adc.effective_data_rate())?;
    let mux = config.input.mux()?;

    info!(
        "Sampling {} at {=u8:#x}: {}, gain {}, {} SPS, {}",
        config.adc.chip,
        adc.address(),
        mux,
        adc.gain(),
        adc.data_rate(),
        config.adc.mode
    );

    match config.adc.mode {
        Mode::Single => AnalogIn::from_mux(&mut adc, mux).read(),
        Mode::Continuous => {
            adc.start_continuous(mux)?;
            Timer::after(settle_time(adc.data_rate())).await;
            let reading = adc.latest();
            adc.stop(mux)?;
            reading
        }
    }
}

/// Two conversion periods, enough for the first result after a config write
fn settle_time(sps: u16) -> Duration {
    Duration::from_micros(2_000_000 / sps.max(1) as u64 + 100)
}

/// Log the three report lines
pub fn report(reading: &Reading) {
    match Report::new(reading) {
        Ok(report) => {
            for line in report.lines() {
                info!("{=str}", line);
            }
        }
        Err(_) => warn!(
            "Report overflowed; raw={} mV={}",
            reading.raw,
            reading.millivolts()
        ),
    }
}
