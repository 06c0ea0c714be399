//! Shared bus access
//!
//! Several devices (or several contexts talking to one device) may sit on
//! the same bus. Interleaving their transfers corrupts multi-step
//! sequences such as "write config, poll, read conversion", so access goes
//! through a blocking mutex.
//!
//! - [`SharedI2c::device`] hands out handles that lock per bus operation.
//! - [`SharedI2c::lock`] holds the lock for a whole sequence.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};

/// Error from an operation on a shared bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SharedBusError<E> {
    /// Bus already borrowed (lock re-entered from inside a locked section)
    Busy,
    /// Error from the underlying bus
    Bus(E),
}

impl<E: embedded_hal::i2c::Error> embedded_hal::i2c::Error for SharedBusError<E> {
    fn kind(&self) -> ErrorKind {
        match self {
            SharedBusError::Busy => ErrorKind::Other,
            SharedBusError::Bus(e) => e.kind(),
        }
    }
}

/// A bus shared behind a blocking mutex
///
/// `M` selects the mutex flavour: `CriticalSectionRawMutex` when the bus is
/// touched from interrupts or several cores, `NoopRawMutex` for a single
/// executor.
pub struct SharedI2c<M: RawMutex, BUS> {
    bus: Mutex<M, RefCell<BUS>>,
}

impl<M: RawMutex, BUS> SharedI2c<M, BUS> {
    /// Wrap an initialized bus
    pub const fn new(bus: BUS) -> Self {
        Self {
            bus: Mutex::new(RefCell::new(bus)),
        }
    }

    /// Get a handle that locks the bus for each operation
    pub fn device(&self) -> SharedI2cDevice<'_, M, BUS> {
        SharedI2cDevice { bus: &self.bus }
    }

    /// Run `f` with exclusive access to the bus
    ///
    /// Everything `f` does happens under a single lock acquisition, so a
    /// driver built on the `&mut BUS` inside the closure completes its
    /// whole register sequence without interleaving.
    pub fn lock<R>(&self, f: impl FnOnce(&mut BUS) -> R) -> Result<R, SharedBusError<()>> {
        self.bus.lock(|cell| {
            let mut bus = cell.try_borrow_mut().map_err(|_| SharedBusError::Busy)?;
            Ok(f(&mut bus))
        })
    }

    /// Take the bus back
    pub fn into_inner(self) -> BUS {
        self.bus.into_inner().into_inner()
    }
}

/// Handle to a [`SharedI2c`] bus
///
/// Implements `embedded_hal::i2c::I2c` (and therefore [`crate::I2cBus`]).
/// Each call is one locked transaction.
pub struct SharedI2cDevice<'a, M: RawMutex, BUS> {
    bus: &'a Mutex<M, RefCell<BUS>>,
}

impl<M: RawMutex, BUS: ErrorType> ErrorType for SharedI2cDevice<'_, M, BUS> {
    type Error = SharedBusError<BUS::Error>;
}

impl<M: RawMutex, BUS: I2c> I2c for SharedI2cDevice<'_, M, BUS> {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.bus.lock(|cell| {
            let mut bus = cell.try_borrow_mut().map_err(|_| SharedBusError::Busy)?;
            bus.transaction(address, operations)
                .map_err(SharedBusError::Bus)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i2c::{BusFault, I2cBus};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[derive(Debug)]
    struct Nack;

    impl embedded_hal::i2c::Error for Nack {
        fn kind(&self) -> ErrorKind {
            ErrorKind::NoAcknowledge(embedded_hal::i2c::NoAcknowledgeSource::Address)
        }
    }

    /// Counts transactions; fails when addressed anywhere but 0x48
    struct CountingBus {
        transactions: u32,
    }

    impl ErrorType for CountingBus {
        type Error = Nack;
    }

    impl I2c for CountingBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            self.transactions += 1;
            if address != 0x48 {
                return Err(Nack);
            }
            for op in operations {
                if let Operation::Read(buf) = op {
                    buf.fill(0xA5);
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_device_handles_share_one_bus() {
        let shared: SharedI2c<NoopRawMutex, _> = SharedI2c::new(CountingBus { transactions: 0 });

        let mut a = shared.device();
        let mut b = shared.device();
        let mut buf = [0u8; 2];

        I2cBus::write(&mut a, 0x48, &[0x01]).unwrap();
        I2cBus::write_read(&mut b, 0x48, &[0x00], &mut buf).unwrap();
        assert_eq!(buf, [0xA5, 0xA5]);

        let mut byte = [0u8; 1];
        I2cBus::read(&mut a, 0x48, &mut byte).unwrap();
        assert_eq!(byte, [0xA5]);

        assert_eq!(shared.into_inner().transactions, 3);
    }

    #[test]
    fn test_device_error_passthrough() {
        let shared: SharedI2c<NoopRawMutex, _> = SharedI2c::new(CountingBus { transactions: 0 });
        let mut dev = shared.device();

        let err = I2cBus::write(&mut dev, 0x49, &[0x01]).unwrap_err();
        assert!(matches!(err, SharedBusError::Bus(Nack)));
        assert_eq!(BusFault::classify(&err), BusFault::AddressNack);
    }

    #[test]
    fn test_lock_runs_sequence() {
        let shared: SharedI2c<NoopRawMutex, _> = SharedI2c::new(CountingBus { transactions: 0 });

        let count = shared
            .lock(|bus| {
                I2cBus::write(bus, 0x48, &[0x01, 0x00, 0x00]).unwrap();
                I2cBus::write(bus, 0x48, &[0x00]).unwrap();
                bus.transactions
            })
            .unwrap();

        assert_eq!(count, 2);
    }

    #[test]
    fn test_reentrant_lock_is_busy() {
        let shared: SharedI2c<NoopRawMutex, _> = SharedI2c::new(CountingBus { transactions: 0 });

        let inner = shared.lock(|_| shared.lock(|_| ())).unwrap();
        assert_eq!(inner, Err(SharedBusError::Busy));

        let mut dev = shared.device();
        let nested = shared.lock(|_| I2cBus::write(&mut dev, 0x48, &[0x00])).unwrap();
        assert!(matches!(nested, Err(SharedBusError::Busy)));
    }
}
