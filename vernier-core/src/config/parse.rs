//! Simple TOML parser for sampler configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! a sampler config. It does NOT support the full TOML grammar.
//!
//! Supported features:
//! - `[bus]`, `[adc]` and `[input]` section headers
//! - Key = value pairs (string, integer)
//! - Integers in decimal or `0x` hex, with `_` separators
//! - Comments (# ...)
//!
//! NOT supported:
//! - Arrays, inline tables, floats, booleans, datetimes
//! - Multi-line or escaped strings
//! - Dotted keys
//!
//! Example:
//!
//! ```toml
//! [bus]
//! block = 0
//! sda = 4
//! scl = 5
//! frequency = 100_000
//!
//! [adc]
//! chip = "ads1015"
//! address = 0x48
//! gain = "2/3"
//! data_rate = 1600
//! mode = "single"
//!
//! [input]
//! channel = 0          # or: positive = 0 / negative = 1
//! ```

use crate::chip::Chip;
use crate::gain::Gain;
use crate::register::Mode;

use super::types::{ConfigError, InputConfig, SamplerConfig};

/// What went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseErrorKind {
    /// Unknown or malformed section header
    InvalidSection,
    /// Line is neither a header nor `key = value`
    InvalidLine,
    /// Key not valid in the current section
    UnknownKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Both `channel` and a `positive`/`negative` pair given, or half a pair
    ConflictingInput,
    /// Parsed fine, but the result failed validation
    Invalid(ConfigError),
}

/// Parse error with the 1-based line it occurred on (0 = whole file)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseError {
    /// Line number, 0 for errors found after the last line
    pub line: usize,
    /// Error kind
    pub kind: ParseErrorKind,
}

impl ParseError {
    fn at(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Bus,
    Adc,
    Input,
}

/// Parsed right-hand side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Value<'a> {
    Int(i64),
    Str(&'a str),
}

impl<'a> Value<'a> {
    fn int<T: TryFrom<i64>>(self) -> Option<T> {
        match self {
            Value::Int(n) => T::try_from(n).ok(),
            Value::Str(_) => None,
        }
    }

    fn str(self) -> Option<&'a str> {
        match self {
            Value::Str(s) => Some(s),
            Value::Int(_) => None,
        }
    }
}

/// Input keys collected across the `[input]` section
#[derive(Default)]
struct InputKeys {
    channel: Option<u8>,
    positive: Option<u8>,
    negative: Option<u8>,
}

/// Parse TOML configuration into SamplerConfig
///
/// Missing sections and keys keep their defaults. The result is validated
/// before it is returned.
pub fn parse_config(input: &str) -> Result<SamplerConfig, ParseError> {
    let mut config = SamplerConfig::default();
    let mut section = Section::Root;
    let mut input_keys = InputKeys::default();

    for (idx, raw_line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = strip_comment(raw_line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        // Check for section header
        if let Some(header) = line.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or(ParseError::at(line_no, ParseErrorKind::InvalidSection))?;
            section = parse_section_header(name.trim())
                .ok_or(ParseError::at(line_no, ParseErrorKind::InvalidSection))?;
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or(ParseError::at(line_no, ParseErrorKind::InvalidLine))?;
        let key = key.trim();
        let value = parse_value(value.trim())
            .ok_or(ParseError::at(line_no, ParseErrorKind::InvalidValue))?;

        apply_key(section, key, value, &mut config, &mut input_keys)
            .map_err(|kind| ParseError::at(line_no, kind))?;
    }

    config.input = match (input_keys.channel, input_keys.positive, input_keys.negative) {
        (None, None, None) => InputConfig::default(),
        (Some(ch), None, None) => InputConfig::Single(ch),
        (None, Some(p), Some(n)) => InputConfig::Differential(p, n),
        _ => return Err(ParseError::at(0, ParseErrorKind::ConflictingInput)),
    };

    config
        .validate()
        .map_err(|e| ParseError::at(0, ParseErrorKind::Invalid(e)))?;

    Ok(config)
}

fn parse_section_header(name: &str) -> Option<Section> {
    match name {
        "bus" => Some(Section::Bus),
        "adc" => Some(Section::Adc),
        "input" => Some(Section::Input),
        _ => None,
    }
}

fn apply_key(
    section: Section,
    key: &str,
    value: Value<'_>,
    config: &mut SamplerConfig,
    input_keys: &mut InputKeys,
) -> Result<(), ParseErrorKind> {
    use ParseErrorKind::{InvalidValue, UnknownKey};

    match (section, key) {
        (Section::Bus, "block") => config.bus.block = value.int().ok_or(InvalidValue)?,
        (Section::Bus, "sda") => config.bus.sda_pin = value.int().ok_or(InvalidValue)?,
        (Section::Bus, "scl") => config.bus.scl_pin = value.int().ok_or(InvalidValue)?,
        (Section::Bus, "frequency") => {
            config.bus.i2c.frequency = value.int().ok_or(InvalidValue)?
        }

        (Section::Adc, "chip") => {
            config.adc.chip = value.str().and_then(Chip::from_name).ok_or(InvalidValue)?
        }
        (Section::Adc, "address") => config.adc.address = value.int().ok_or(InvalidValue)?,
        (Section::Adc, "gain") => config.adc.gain = parse_gain(value).ok_or(InvalidValue)?,
        (Section::Adc, "data_rate") => {
            config.adc.data_rate = Some(value.int().ok_or(InvalidValue)?)
        }
        (Section::Adc, "mode") => {
            config.adc.mode = value.str().and_then(Mode::parse).ok_or(InvalidValue)?
        }

        (Section::Input, "channel") => {
            input_keys.channel = Some(value.int().ok_or(InvalidValue)?)
        }
        (Section::Input, "positive") => {
            input_keys.positive = Some(value.int().ok_or(InvalidValue)?)
        }
        (Section::Input, "negative") => {
            input_keys.negative = Some(value.int().ok_or(InvalidValue)?)
        }

        _ => return Err(UnknownKey),
    }

    Ok(())
}

/// Gain as a string ("2/3") or a whole multiplier (4)
fn parse_gain(value: Value<'_>) -> Option<Gain> {
    match value {
        Value::Str(s) => Gain::parse(s),
        Value::Int(n) => match n {
            1 => Some(Gain::One),
            2 => Some(Gain::Two),
            4 => Some(Gain::Four),
            8 => Some(Gain::Eight),
            16 => Some(Gain::Sixteen),
            _ => None,
        },
    }
}

/// Cut a trailing comment, ignoring `#` inside quotes
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_value(s: &str) -> Option<Value<'_>> {
    if let Some(inner) = s.strip_prefix('"') {
        let inner = inner.strip_suffix('"')?;
        if inner.contains('"') {
            return None;
        }
        return Some(Value::Str(inner));
    }
    parse_int(s).map(Value::Int)
}

/// Decimal or `0x` hex integer with optional sign and `_` separators
fn parse_int(s: &str) -> Option<i64> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let (radix, digits) = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, digits),
    };

    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') {
        return None;
    }

    let mut value: i64 = 0;
    for c in digits.chars() {
        if c == '_' {
            continue;
        }
        let d = c.to_digit(radix)? as i64;
        value = value.checked_mul(radix as i64)?.checked_add(d)?;
    }

    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::ADS1X15_ADDRESS_MIN;
    use crate::traits::SampleError;

    #[test]
    fn test_empty_is_default() {
        assert_eq!(parse_config(""), Ok(SamplerConfig::default()));
        assert_eq!(
            parse_config("# nothing here\n\n"),
            Ok(SamplerConfig::default())
        );
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
            # Bench setup
            [bus]
            block = 1
            sda = 6
            scl = 7
            frequency = 400_000

            [adc]
            chip = "ADS1115"
            address = 0x49   # ADDR to VDD
            gain = "2/3"
            data_rate = 860
            mode = "continuous"

            [input]
            positive = 0
            negative = 1
        "#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.bus.block, 1);
        assert_eq!((config.bus.sda_pin, config.bus.scl_pin), (6, 7));
        assert_eq!(config.bus.i2c.frequency, 400_000);
        assert_eq!(config.adc.chip, Chip::Ads1115);
        assert_eq!(config.adc.address, 0x49);
        assert_eq!(config.adc.gain, Gain::TwoThirds);
        assert_eq!(config.adc.data_rate, Some(860));
        assert_eq!(config.adc.mode, Mode::Continuous);
        assert_eq!(config.input, InputConfig::Differential(0, 1));
    }

    #[test]
    fn test_integer_gain() {
        let config = parse_config("[adc]\ngain = 16\n").unwrap();
        assert_eq!(config.adc.gain, Gain::Sixteen);

        let err = parse_config("[adc]\ngain = 3\n").unwrap_err();
        assert_eq!(err, ParseError::at(2, ParseErrorKind::InvalidValue));
    }

    #[test]
    fn test_unknown_key_and_section() {
        let err = parse_config("[adc]\nvref = 5\n").unwrap_err();
        assert_eq!(err, ParseError::at(2, ParseErrorKind::UnknownKey));

        let err = parse_config("[display]\n").unwrap_err();
        assert_eq!(err, ParseError::at(1, ParseErrorKind::InvalidSection));

        // Keys before any section header have nowhere to go
        let err = parse_config("chip = \"ads1015\"\n").unwrap_err();
        assert_eq!(err, ParseError::at(1, ParseErrorKind::UnknownKey));
    }

    #[test]
    fn test_malformed_lines() {
        let err = parse_config("[bus\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidSection);

        let err = parse_config("[bus]\nsda 4\n").unwrap_err();
        assert_eq!(err, ParseError::at(2, ParseErrorKind::InvalidLine));

        let err = parse_config("[bus]\nsda = four\n").unwrap_err();
        assert_eq!(err, ParseError::at(2, ParseErrorKind::InvalidValue));

        let err = parse_config("[bus]\nsda = 300\n").unwrap_err();
        assert_eq!(err, ParseError::at(2, ParseErrorKind::InvalidValue));
    }

    #[test]
    fn test_conflicting_input() {
        let err = parse_config("[input]\nchannel = 0\npositive = 0\nnegative = 1\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ConflictingInput);

        let err = parse_config("[input]\npositive = 0\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ConflictingInput);
    }

    #[test]
    fn test_validation_runs() {
        let err = parse_config("[input]\nchannel = 7\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::at(
                0,
                ParseErrorKind::Invalid(ConfigError::Device(SampleError::InvalidChannel(7)))
            )
        );

        let err = parse_config("[adc]\naddress = 0x40\n").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::Invalid(ConfigError::InvalidAddress(0x40))
        );
    }

    #[test]
    fn test_wiring_checked() {
        let err = parse_config("[bus]\nsda = 0\nscl = 5\n").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::Invalid(ConfigError::UnsupportedWiring(0, 5))
        );

        let config = parse_config("[bus]\nsda = 28\nscl = 29\n").unwrap();
        assert_eq!((config.bus.sda_pin, config.bus.scl_pin), (28, 29));
    }

    #[test]
    fn test_hash_inside_string() {
        assert_eq!(strip_comment(r#"mode = "a#b" # c"#), r#"mode = "a#b" "#);
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("0x48"), Some(ADS1X15_ADDRESS_MIN as i64));
        assert_eq!(parse_int("1_000_000"), Some(1_000_000));
        assert_eq!(parse_int("-3"), Some(-3));
        assert_eq!(parse_int("0x"), None);
        assert_eq!(parse_int("_1"), None);
        assert_eq!(parse_int("12a"), None);
    }
}
