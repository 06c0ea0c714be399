//! Programmable gain amplifier settings
//!
//! The PGA selects the full-scale range of the converter, and with it the
//! size of one code step (LSB).

use crate::chip::Chip;

/// PGA gain
///
/// Named after the multiplier the Adafruit-style APIs use (2/3, 1, 2, ...)
/// rather than the full-scale voltage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gain {
    /// ±6.144 V
    TwoThirds,
    /// ±4.096 V
    #[default]
    One,
    /// ±2.048 V
    Two,
    /// ±1.024 V
    Four,
    /// ±0.512 V
    Eight,
    /// ±0.256 V
    Sixteen,
}

impl Gain {
    /// Every gain, in PGA field order
    pub const ALL: [Gain; 6] = [
        Gain::TwoThirds,
        Gain::One,
        Gain::Two,
        Gain::Four,
        Gain::Eight,
        Gain::Sixteen,
    ];

    /// Full-scale range in volts (positive half)
    pub const fn full_scale_volts(self) -> f32 {
        match self {
            Gain::TwoThirds => 6.144,
            Gain::One => 4.096,
            Gain::Two => 2.048,
            Gain::Four => 1.024,
            Gain::Eight => 0.512,
            Gain::Sixteen => 0.256,
        }
    }

    /// PGA field value (config bits 11:9, unshifted)
    pub const fn pga_bits(self) -> u16 {
        match self {
            Gain::TwoThirds => 0b000,
            Gain::One => 0b001,
            Gain::Two => 0b010,
            Gain::Four => 0b011,
            Gain::Eight => 0b100,
            Gain::Sixteen => 0b101,
        }
    }

    /// Parse a multiplier string: "2/3", "1", "2", "4", "8", "16"
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "2/3" => Some(Gain::TwoThirds),
            "1" => Some(Gain::One),
            "2" => Some(Gain::Two),
            "4" => Some(Gain::Four),
            "8" => Some(Gain::Eight),
            "16" => Some(Gain::Sixteen),
            _ => None,
        }
    }

    /// Volts per code step on `chip`
    pub fn lsb_size(self, chip: Chip) -> f32 {
        lsb_size(chip, self)
    }
}

/// Volts represented by one code step
///
/// The signed code spans `-2^(bits-1) .. 2^(bits-1)` over the full-scale
/// range, so one step is `fsr / 2^(bits-1)`.
pub fn lsb_size(chip: Chip, gain: Gain) -> f32 {
    gain.full_scale_volts() / (1u32 << (chip.bits() - 1)) as f32
}
