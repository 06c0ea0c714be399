//! ADS1x15 chip variants

/// Supported converter chips
///
/// Both parts share the register map and address range; they differ in
/// resolution and in the sample rates selected by the DR field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Chip {
    /// 12-bit, 128-3300 SPS
    #[default]
    Ads1015,
    /// 16-bit, 8-860 SPS
    Ads1115,
}

/// DR field value -> samples per second, indexed by the 3-bit field
const ADS1015_RATES: [u16; 8] = [128, 250, 490, 920, 1600, 2400, 3300, 3300];
const ADS1115_RATES: [u16; 8] = [8, 16, 32, 64, 128, 250, 475, 860];

impl Chip {
    /// Conversion resolution in bits
    pub const fn bits(self) -> u8 {
        match self {
            Chip::Ads1015 => 12,
            Chip::Ads1115 => 16,
        }
    }

    /// Right shift that turns the 16-bit conversion register into a code
    ///
    /// The ADS1015 left-aligns its 12-bit result.
    pub const fn shift(self) -> u8 {
        16 - self.bits()
    }

    /// Part name as printed on the package
    pub const fn name(self) -> &'static str {
        match self {
            Chip::Ads1015 => "ADS1015",
            Chip::Ads1115 => "ADS1115",
        }
    }

    /// Sample rates selectable through the DR field
    pub const fn data_rates(self) -> &'static [u16; 8] {
        match self {
            Chip::Ads1015 => &ADS1015_RATES,
            Chip::Ads1115 => &ADS1115_RATES,
        }
    }

    /// Power-on default sample rate
    pub const fn default_data_rate(self) -> u16 {
        match self {
            Chip::Ads1015 => 1600,
            Chip::Ads1115 => 128,
        }
    }

    /// DR field value for a sample rate, if the chip supports it
    pub fn rate_bits(self, sps: u16) -> Option<u16> {
        self.data_rates()
            .iter()
            .position(|&r| r == sps)
            .map(|i| i as u16)
    }

    /// Parse a part name ("ads1015", "ADS1115")
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("ads1015") {
            Some(Chip::Ads1015)
        } else if name.eq_ignore_ascii_case("ads1115") {
            Some(Chip::Ads1115)
        } else {
            None
        }
    }
}
