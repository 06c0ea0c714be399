//! Input multiplexer selection
//!
//! The ADS1x15 has four analog pins. The multiplexer connects either one
//! pin against ground, or one of four fixed pin pairs.

use crate::traits::SampleError;

/// Number of single-ended inputs (AIN0-AIN3)
pub const SINGLE_ENDED_CHANNELS: u8 = 4;

/// Multiplexer setting (config bits 14:12)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputMux {
    /// AIN0 - AIN1
    Diff01,
    /// AIN0 - AIN3
    Diff03,
    /// AIN1 - AIN3
    Diff13,
    /// AIN2 - AIN3
    Diff23,
    /// AIN0 - GND
    Ain0,
    /// AIN1 - GND
    Ain1,
    /// AIN2 - GND
    Ain2,
    /// AIN3 - GND
    Ain3,
}

impl InputMux {
    /// Single-ended input on `channel`
    pub fn single_ended(channel: u8) -> Result<Self, SampleError> {
        match channel {
            0 => Ok(InputMux::Ain0),
            1 => Ok(InputMux::Ain1),
            2 => Ok(InputMux::Ain2),
            3 => Ok(InputMux::Ain3),
            _ => Err(SampleError::InvalidChannel(channel)),
        }
    }

    /// Differential input measuring `positive - negative`
    pub fn differential(positive: u8, negative: u8) -> Result<Self, SampleError> {
        match (positive, negative) {
            (0, 1) => Ok(InputMux::Diff01),
            (0, 3) => Ok(InputMux::Diff03),
            (1, 3) => Ok(InputMux::Diff13),
            (2, 3) => Ok(InputMux::Diff23),
            _ => Err(SampleError::InvalidPair(positive, negative)),
        }
    }

    /// MUX field value (unshifted)
    pub const fn mux_bits(self) -> u16 {
        match self {
            InputMux::Diff01 => 0b000,
            InputMux::Diff03 => 0b001,
            InputMux::Diff13 => 0b010,
            InputMux::Diff23 => 0b011,
            InputMux::Ain0 => 0b100,
            InputMux::Ain1 => 0b101,
            InputMux::Ain2 => 0b110,
            InputMux::Ain3 => 0b111,
        }
    }

    /// True for pin-pair settings
    pub const fn is_differential(self) -> bool {
        self.mux_bits() < 0b100
    }

    /// Positive pin number
    pub const fn positive(self) -> u8 {
        match self {
            InputMux::Diff01 | InputMux::Diff03 | InputMux::Ain0 => 0,
            InputMux::Diff13 | InputMux::Ain1 => 1,
            InputMux::Diff23 | InputMux::Ain2 => 2,
            InputMux::Ain3 => 3,
        }
    }

    /// Negative pin number, `None` for ground
    pub const fn negative(self) -> Option<u8> {
        match self {
            InputMux::Diff01 => Some(1),
            InputMux::Diff03 | InputMux::Diff13 | InputMux::Diff23 => Some(3),
            _ => None,
        }
    }
}
