//! I2C controller management
//!
//! RP2040 has two I2C controllers. Every GPIO can carry one I2C signal,
//! following a fixed pattern of four:
//!
//! - GPIO 4n:   I2C0 SDA
//! - GPIO 4n+1: I2C0 SCL
//! - GPIO 4n+2: I2C1 SDA
//! - GPIO 4n+3: I2C1 SCL

use vernier_hal::I2cConfig;

/// Number of user GPIOs
const GPIO_COUNT: u8 = 30;

/// I2C controller identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBlock {
    /// I2C0
    I2c0,
    /// I2C1
    I2c1,
}

/// I2C signal a GPIO can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cSignal {
    /// Data line
    Sda,
    /// Clock line
    Scl,
}

/// Error when assigning bus pins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Controller index out of range (0-1 valid)
    InvalidBlock,
    /// Pin cannot carry the requested signal
    WrongSignal,
    /// Pin belongs to the other controller
    WrongBlock,
    /// SCL is not the pin right after SDA
    NotAdjacent,
}

impl I2cBlock {
    /// Get controller from index
    pub fn from_index(index: u8) -> Result<Self, PinError> {
        match index {
            0 => Ok(I2cBlock::I2c0),
            1 => Ok(I2cBlock::I2c1),
            _ => Err(PinError::InvalidBlock),
        }
    }

    /// Controller index
    pub fn index(&self) -> u8 {
        match self {
            I2cBlock::I2c0 => 0,
            I2cBlock::I2c1 => 1,
        }
    }
}

/// Controller and signal a GPIO is wired to
pub fn pin_function(gpio: u8) -> Option<(I2cBlock, I2cSignal)> {
    if gpio >= GPIO_COUNT {
        return None;
    }
    let block = if (gpio / 2) % 2 == 0 {
        I2cBlock::I2c0
    } else {
        I2cBlock::I2c1
    };
    let signal = if gpio % 2 == 0 {
        I2cSignal::Sda
    } else {
        I2cSignal::Scl
    };
    Some((block, signal))
}

/// Check that `sda` and `scl` are an adjacent SDA/SCL pair on `block`
///
/// These are the pairs the firmware can open.
pub fn validate_pins(block: I2cBlock, sda: u8, scl: u8) -> Result<(), PinError> {
    for (gpio, wanted) in [(sda, I2cSignal::Sda), (scl, I2cSignal::Scl)] {
        let (pin_block, signal) = pin_function(gpio).ok_or(PinError::InvalidPin)?;
        if signal != wanted {
            return Err(PinError::WrongSignal);
        }
        if pin_block != block {
            return Err(PinError::WrongBlock);
        }
    }
    if scl != sda + 1 {
        return Err(PinError::NotAdjacent);
    }
    Ok(())
}

/// Build the embassy-rp controller config
///
/// The board is expected to carry external pull-ups (every ADS1x15
/// breakout does); the internal ones are too weak above 100 kHz.
pub fn controller_config(config: I2cConfig) -> embassy_rp::i2c::Config {
    let mut c = embassy_rp::i2c::Config::default();
    c.frequency = config.frequency;
    c
}
