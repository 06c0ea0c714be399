//! ADS1x15 register map
//!
//! Register pointers and the 16-bit config word:
//!
//! ```text
//!  15   14:12  11:9   8     7:5   4         3        2        1:0
//! ┌────┬──────┬─────┬─────┬─────┬─────────┬────────┬────────┬─────────┐
//! │ OS │ MUX  │ PGA │MODE │ DR  │COMP_MODE│COMP_POL│COMP_LAT│COMP_QUE │
//! └────┴──────┴─────┴─────┴─────┴─────────┴────────┴────────┴─────────┘
//! ```
//!
//! All registers are big-endian on the wire.

use crate::gain::Gain;
use crate::mux::InputMux;

/// Register pointers
pub mod reg {
    /// Conversion result (read-only)
    pub const CONVERSION: u8 = 0x00;
    /// Config
    pub const CONFIG: u8 = 0x01;
}

/// Config word bit positions
mod bits {
    pub const OS: u16 = 1 << 15;
    pub const MUX_SHIFT: u16 = 12;
    pub const PGA_SHIFT: u16 = 9;
    pub const MODE_SINGLE: u16 = 1 << 8;
    pub const DR_SHIFT: u16 = 5;
    /// COMP_QUE = 0b11 disables the comparator and parks ALERT/RDY high
    pub const COMP_QUE_DISABLE: u16 = 0b11;
}

/// Conversion mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Convert continuously; the conversion register always holds the latest result
    Continuous,
    /// One conversion per config write, then power down
    #[default]
    Single,
}

impl Mode {
    /// Parse "single" / "continuous"
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "single" => Some(Mode::Single),
            "continuous" => Some(Mode::Continuous),
            _ => None,
        }
    }
}

/// Config register value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigWord(u16);

impl ConfigWord {
    /// Build a config word with the comparator disabled
    ///
    /// In single-shot mode the OS bit is set, so writing the word starts a
    /// conversion. `rate_bits` is the chip-specific DR field value
    /// (see [`crate::Chip::rate_bits`]).
    pub fn new(mux: InputMux, gain: Gain, rate_bits: u16, mode: Mode) -> Self {
        let mut word = (mux.mux_bits() << bits::MUX_SHIFT)
            | (gain.pga_bits() << bits::PGA_SHIFT)
            | ((rate_bits & 0b111) << bits::DR_SHIFT)
            | bits::COMP_QUE_DISABLE;

        if mode == Mode::Single {
            word |= bits::OS | bits::MODE_SINGLE;
        }

        Self(word)
    }

    /// Wrap a value read back from the device
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Same settings with the OS bit cleared
    ///
    /// Writing this in single-shot mode powers the device down without
    /// starting a conversion.
    pub const fn without_start(self) -> Self {
        Self(self.0 & !bits::OS)
    }

    /// Raw register value
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Register value as sent on the wire
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Mode encoded in this word
    pub const fn mode(self) -> Mode {
        if self.0 & bits::MODE_SINGLE != 0 {
            Mode::Single
        } else {
            Mode::Continuous
        }
    }

    /// True when a read-back config word reports no conversion in progress
    pub const fn is_conversion_ready(self) -> bool {
        self.0 & bits::OS != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chip::Chip;
    use proptest::prelude::*;

    #[test]
    fn test_single_shot_ain0_default() {
        // AIN0, ±4.096 V, 1600 SPS, single-shot, comparator off
        let rate = Chip::Ads1015.rate_bits(1600).unwrap();
        let word = ConfigWord::new(InputMux::Ain0, Gain::One, rate, Mode::Single);

        assert_eq!(word.bits(), 0xC383);
        assert_eq!(word.to_be_bytes(), [0xC3, 0x83]);
        assert_eq!(word.mode(), Mode::Single);
    }

    #[test]
    fn test_continuous_has_no_os_bit() {
        let word = ConfigWord::new(InputMux::Diff01, Gain::Two, 4, Mode::Continuous);

        assert_eq!(word.bits(), 0x0483);
        assert_eq!(word.mode(), Mode::Continuous);
    }

    #[test]
    fn test_ready_bit() {
        assert!(ConfigWord::from_bits(0x8583).is_conversion_ready());
        assert!(!ConfigWord::from_bits(0x0583).is_conversion_ready());
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!(Mode::parse("single"), Some(Mode::Single));
        assert_eq!(Mode::parse("continuous"), Some(Mode::Continuous));
        assert_eq!(Mode::parse("burst"), None);
    }

    proptest! {
        #[test]
        fn prop_fields_do_not_overlap(ch in 0u8..4, gain in 0usize..6, rate in 0u16..8) {
            let mux = InputMux::single_ended(ch).unwrap();
            let gain = Gain::ALL[gain];
            let word = ConfigWord::new(mux, gain, rate, Mode::Single).bits();

            prop_assert_eq!((word >> 12) & 0b111, mux.mux_bits());
            prop_assert_eq!((word >> 9) & 0b111, gain.pga_bits());
            prop_assert_eq!((word >> 5) & 0b111, rate);
            prop_assert_eq!(word & 0b11, 0b11);
            prop_assert!(word & 0x8000 != 0);
        }
    }
}
