//! Simulated ADS1x15 for driver tests
//!
//! Models the register pointer, the config register's OS bit and a fixed
//! conversion result, and counts bus transactions.

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use vernier_core::register::reg;

const OS: u16 = 1 << 15;
const MODE_SINGLE: u16 = 1 << 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError(pub ErrorKind);

impl embedded_hal::i2c::Error for MockError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

pub struct MockAds {
    /// Address the simulated device answers on
    pub address: u8,
    /// Conversion register contents
    pub conversion: u16,
    /// Config reads that report "busy" after each single-shot start
    pub busy_polls: u32,
    /// Force every transaction to fail with this kind
    pub fail: Option<ErrorKind>,
    /// Fail only the given 1-based transaction with this kind
    pub fail_at: Option<(u32, ErrorKind)>,
    /// Transactions seen, including failed ones
    pub transactions: u32,
    /// Config register writes seen
    pub config_writes: u32,
    /// Last value written to the config register
    pub last_config_write: Option<u16>,
    config: u16,
    pointer: u8,
    pending: u32,
}

impl MockAds {
    pub fn new(conversion: u16) -> Self {
        Self {
            address: 0x48,
            conversion,
            busy_polls: 0,
            fail: None,
            fail_at: None,
            transactions: 0,
            config_writes: 0,
            last_config_write: None,
            // Power-on reset value
            config: 0x8583,
            pointer: reg::CONVERSION,
            pending: 0,
        }
    }

    /// Device holding a 12-bit code, left-aligned as the ADS1015 does
    pub fn with_ads1015_code(code: i16) -> Self {
        Self::new((code << 4) as u16)
    }

    fn handle_write(&mut self, bytes: &[u8]) {
        let Some((&pointer, data)) = bytes.split_first() else {
            return;
        };
        self.pointer = pointer;

        if pointer == reg::CONFIG && data.len() == 2 {
            let value = u16::from_be_bytes([data[0], data[1]]);
            self.config_writes += 1;
            self.last_config_write = Some(value);
            self.config = value & !OS;
            if value & OS != 0 && value & MODE_SINGLE != 0 {
                self.pending = self.busy_polls;
            }
        }
    }

    fn handle_read(&mut self, buf: &mut [u8]) {
        let value = match self.pointer {
            reg::CONVERSION => self.conversion,
            reg::CONFIG if self.pending > 0 => {
                self.pending -= 1;
                self.config
            }
            reg::CONFIG => self.config | OS,
            _ => 0,
        };
        for (dst, src) in buf.iter_mut().zip(value.to_be_bytes()) {
            *dst = src;
        }
    }
}

impl ErrorType for MockAds {
    type Error = MockError;
}

impl I2c for MockAds {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.transactions += 1;

        if let Some(kind) = self.fail {
            return Err(MockError(kind));
        }
        if let Some((n, kind)) = self.fail_at {
            if n == self.transactions {
                return Err(MockError(kind));
            }
        }
        if address != self.address {
            return Err(MockError(ErrorKind::NoAcknowledge(
                NoAcknowledgeSource::Address,
            )));
        }

        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => self.handle_write(bytes),
                Operation::Read(buf) => self.handle_read(buf),
            }
        }
        Ok(())
    }
}
