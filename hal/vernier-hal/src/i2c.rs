//! I2C bus abstractions
//!
//! Provides the bus trait used by converter drivers, and a classification
//! of transport failures that drivers can report without carrying the
//! HAL's own error type around.

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices. Implemented for every `embedded_hal::i2c::I2c`,
/// including `&mut` references to one, so a driver may either own its bus
/// or borrow it for as long as it lives.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error: embedded_hal::i2c::Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// This is commonly used to write a register pointer then read data.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `write_data` - Bytes to write (typically register pointer)
    /// * `read_buf` - Buffer to read into
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}

impl<T> I2cBus for T
where
    T: embedded_hal::i2c::I2c,
{
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        embedded_hal::i2c::I2c::write(self, address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        embedded_hal::i2c::I2c::read(self, address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        embedded_hal::i2c::I2c::write_read(self, address, write_data, read_buf)
    }
}

/// Classified transport failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusFault {
    /// Misplaced start/stop or other bus-level error
    Bus,
    /// Another master won arbitration
    ArbitrationLoss,
    /// Device did not acknowledge its address
    AddressNack,
    /// Device did not acknowledge a data byte
    DataNack,
    /// Receive overrun
    Overrun,
    /// Anything the HAL could not classify
    Other,
}

impl BusFault {
    /// Classify an `embedded-hal` error kind
    ///
    /// A NACK of unknown origin is treated as an address NACK: HALs that
    /// cannot tell the two apart (embassy-rp, linux i2cdev) report a
    /// missing or unpowered device this way.
    pub fn from_kind(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => BusFault::Bus,
            ErrorKind::ArbitrationLoss => BusFault::ArbitrationLoss,
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data) => BusFault::DataNack,
            ErrorKind::NoAcknowledge(_) => BusFault::AddressNack,
            ErrorKind::Overrun => BusFault::Overrun,
            _ => BusFault::Other,
        }
    }

    /// Classify any `embedded-hal` I2C error
    pub fn classify<E: embedded_hal::i2c::Error>(err: &E) -> Self {
        Self::from_kind(err.kind())
    }

    /// True if the device never answered at its address
    pub fn is_address_nack(self) -> bool {
        matches!(self, BusFault::AddressNack)
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };

    /// Fast mode plus (1 MHz)
    pub const FAST_PLUS: Self = Self {
        frequency: 1_000_000,
    };

    /// Highest clock the ADS1x15 family accepts outside high-speed mode
    pub const MAX_FREQUENCY: u32 = 1_000_000;

    /// Check the frequency is usable for a standard/fast-mode device
    pub fn is_valid(&self) -> bool {
        self.frequency > 0 && self.frequency <= Self::MAX_FREQUENCY
    }
}
