//! Sampler configuration types
//!
//! These types describe which bus to open, which converter to talk to and
//! which input to measure.

use vernier_hal::I2cConfig;

use crate::chip::Chip;
use crate::gain::Gain;
use crate::mux::InputMux;
use crate::register::Mode;
use crate::traits::SampleError;

/// First address of the ADS1x15 range (ADDR pin tied to GND)
pub const ADS1X15_ADDRESS_MIN: u8 = 0x48;

/// Last address of the ADS1x15 range (ADDR pin tied to SCL)
pub const ADS1X15_ADDRESS_MAX: u8 = 0x4B;

/// Number of RP2040 user GPIOs
pub const GPIO_COUNT: u8 = 30;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Address outside 0x48-0x4B
    InvalidAddress(u8),
    /// Clock frequency zero or above fast-mode plus
    InvalidFrequency(u32),
    /// Bus controller index unknown
    InvalidBlock(u8),
    /// SDA and SCL on the same pin
    PinConflict(u8),
    /// SDA/SCL (in that order) are not an adjacent pair routed to the block
    UnsupportedWiring(u8, u8),
    /// Input or data rate rejected by the device model
    Device(SampleError),
}

impl From<SampleError> for ConfigError {
    fn from(e: SampleError) -> Self {
        ConfigError::Device(e)
    }
}

/// Bus configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    /// I2C controller index (0 or 1 on RP2040)
    pub block: u8,
    /// SDA GPIO
    pub sda_pin: u8,
    /// SCL GPIO
    pub scl_pin: u8,
    /// Bus clock
    pub i2c: I2cConfig,
}

impl BusConfig {
    /// True when SDA/SCL are an adjacent pin pair of the selected block
    ///
    /// RP2040 GPIOs carry I2C in groups of four: 4n/4n+1 are I2C0
    /// SDA/SCL, 4n+2/4n+3 are I2C1 SDA/SCL. The firmware opens only
    /// such pairs.
    pub fn is_routable(&self) -> bool {
        self.sda_pin % 2 == 0
            && self.scl_pin == self.sda_pin + 1
            && self.scl_pin < GPIO_COUNT
            && (self.sda_pin / 2) % 2 == self.block
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        // Raspberry Pi Pico default I2C0 pins
        Self {
            block: 0,
            sda_pin: 4,
            scl_pin: 5,
            i2c: I2cConfig::STANDARD,
        }
    }
}

/// Converter configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcConfig {
    /// Chip variant
    pub chip: Chip,
    /// 7-bit I2C address
    pub address: u8,
    /// PGA gain
    pub gain: Gain,
    /// Samples per second (`None` = chip default)
    pub data_rate: Option<u16>,
    /// Conversion mode
    pub mode: Mode,
}

impl Default for AdcConfig {
    fn default() -> Self {
        Self {
            chip: Chip::Ads1015,
            address: ADS1X15_ADDRESS_MIN,
            gain: Gain::One,
            data_rate: None,
            mode: Mode::Single,
        }
    }
}

impl AdcConfig {
    /// Sample rate that will actually be used
    pub fn effective_data_rate(&self) -> u16 {
        self.data_rate
            .unwrap_or_else(|| self.chip.default_data_rate())
    }
}

/// Which input to measure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputConfig {
    /// One pin against ground
    Single(u8),
    /// Pin pair (positive, negative)
    Differential(u8, u8),
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig::Single(0)
    }
}

impl InputConfig {
    /// Resolve to a multiplexer setting
    pub fn mux(&self) -> Result<InputMux, SampleError> {
        match *self {
            InputConfig::Single(ch) => InputMux::single_ended(ch),
            InputConfig::Differential(p, n) => InputMux::differential(p, n),
        }
    }
}

/// Complete sampler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SamplerConfig {
    /// Bus to open
    pub bus: BusConfig,
    /// Converter on that bus
    pub adc: AdcConfig,
    /// Input to measure
    pub input: InputConfig,
}

impl SamplerConfig {
    /// Check every field against the device model
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bus.block > 1 {
            return Err(ConfigError::InvalidBlock(self.bus.block));
        }
        if self.bus.sda_pin == self.bus.scl_pin {
            return Err(ConfigError::PinConflict(self.bus.sda_pin));
        }
        if !self.bus.is_routable() {
            return Err(ConfigError::UnsupportedWiring(
                self.bus.sda_pin,
                self.bus.scl_pin,
            ));
        }
        if !self.bus.i2c.is_valid() {
            return Err(ConfigError::InvalidFrequency(self.bus.i2c.frequency));
        }
        if !(ADS1X15_ADDRESS_MIN..=ADS1X15_ADDRESS_MAX).contains(&self.adc.address) {
            return Err(ConfigError::InvalidAddress(self.adc.address));
        }
        if let Some(rate) = self.adc.data_rate {
            if self.adc.chip.rate_bits(rate).is_none() {
                return Err(SampleError::InvalidDataRate(rate).into());
            }
        }
        self.input.mux()?;
        Ok(())
    }
}
