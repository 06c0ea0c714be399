//! Text report of a reading
//!
//! Three lines, matching the classic CircuitPython example output:
//!
//! ```text
//! ADS1015 Analog Input:
//!   raw	    v
//!  1024	2.048
//! ```

use core::fmt::{self, Write};

use heapless::String;

use crate::chip::Chip;
use crate::reading::Reading;

/// Maximum length of one report line
pub const MAX_LINE_LEN: usize = 32;

/// One line of report text
pub type ReportLine = String<MAX_LINE_LEN>;

/// Formatted report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    lines: [ReportLine; 3],
}

impl Report {
    /// Format `reading`
    pub fn new(reading: &Reading) -> Result<Self, fmt::Error> {
        Ok(Self {
            lines: [
                title(reading.chip)?,
                column_header()?,
                value_line(reading)?,
            ],
        })
    }

    /// The report lines, in output order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.as_str())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// "ADS1015 Analog Input:"
pub fn title(chip: Chip) -> Result<ReportLine, fmt::Error> {
    let mut line = ReportLine::new();
    write!(line, "{} Analog Input:", chip.name())?;
    Ok(line)
}

/// Column header, each column right-aligned to width 5
pub fn column_header() -> Result<ReportLine, fmt::Error> {
    let mut line = ReportLine::new();
    write!(line, "{:>5}\t{:>5}", "raw", "v")?;
    Ok(line)
}

/// Raw code and voltage, voltage to 3 decimal places
pub fn value_line(reading: &Reading) -> Result<ReportLine, fmt::Error> {
    let mut line = ReportLine::new();
    write!(line, "{:>5}\t{:>5.3}", reading.raw, reading.voltage())?;
    Ok(line)
}
