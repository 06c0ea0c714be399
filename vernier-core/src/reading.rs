//! Conversion results

use crate::chip::Chip;
use crate::gain::{lsb_size, Gain};

/// One conversion result
///
/// Only the code is stored. The voltage is derived from the code, the chip
/// and the gain that was in effect for this conversion, so a `Reading`
/// can never hold a raw value and a voltage that disagree.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Signed conversion code (12-bit range on ADS1015, 16-bit on ADS1115)
    pub raw: i16,
    /// Chip that produced the code
    pub chip: Chip,
    /// Gain in effect for the conversion
    pub gain: Gain,
}

impl Reading {
    /// Create a reading from an already-decoded code
    pub const fn new(raw: i16, chip: Chip, gain: Gain) -> Self {
        Self { raw, chip, gain }
    }

    /// Decode the big-endian conversion register
    ///
    /// The arithmetic shift keeps the sign of left-aligned 12-bit codes.
    pub fn from_register(chip: Chip, gain: Gain, bytes: [u8; 2]) -> Self {
        let raw = i16::from_be_bytes(bytes) >> chip.shift();
        Self { raw, chip, gain }
    }

    /// Volts per code step for this reading
    pub fn lsb_size(&self) -> f32 {
        lsb_size(self.chip, self.gain)
    }

    /// Measured voltage: `raw * lsb_size`
    pub fn voltage(&self) -> f32 {
        self.raw as f32 * self.lsb_size()
    }

    /// Measured voltage in whole millivolts, rounded toward zero
    ///
    /// Integer-only path for targets without an FPU; uses the full-scale
    /// range in microvolts.
    pub fn millivolts(&self) -> i32 {
        let fsr_uv = match self.gain {
            Gain::TwoThirds => 6_144_000i64,
            Gain::One => 4_096_000,
            Gain::Two => 2_048_000,
            Gain::Four => 1_024_000,
            Gain::Eight => 512_000,
            Gain::Sixteen => 256_000,
        };
        let steps = 1i64 << (self.chip.bits() - 1);
        (self.raw as i64 * fsr_uv / steps / 1000) as i32
    }
}
