//! Analog sampler trait

use vernier_hal::BusFault;

use crate::reading::Reading;

/// Errors that can occur while taking a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleError {
    /// Channel is not one of the device's single-ended inputs
    InvalidChannel(u8),
    /// Pin pair is not a differential input the multiplexer offers
    InvalidPair(u8, u8),
    /// Sample rate not selectable on this chip
    InvalidDataRate(u16),
    /// Device did not acknowledge its address (absent, unpowered, unplugged)
    ///
    /// Also used for a NACK whose source the bus cannot tell, at any point
    /// of the sample.
    DeviceNotFound(u8),
    /// Transport-level failure other than an address NACK
    ///
    /// Never carries [`BusFault::AddressNack`]; a device that stops
    /// acknowledging surfaces as [`SampleError::DeviceNotFound`] instead.
    /// Match both to catch every "no acknowledgment" case.
    Bus(BusFault),
    /// Conversion never reported ready
    Timeout,
}

impl SampleError {
    /// Map a classified bus fault for the device at `address`
    pub fn from_fault(address: u8, fault: BusFault) -> Self {
        if fault.is_address_nack() {
            SampleError::DeviceNotFound(address)
        } else {
            SampleError::Bus(fault)
        }
    }

    /// True for errors raised before any bus traffic
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            SampleError::InvalidChannel(_)
                | SampleError::InvalidPair(_, _)
                | SampleError::InvalidDataRate(_)
        )
    }
}

/// Trait for analog-to-digital converters
///
/// One call is one measurement: either a complete [`Reading`] or an error,
/// never a raw code without its scaling. Nothing is retried internally.
pub trait AnalogSampler {
    /// Number of single-ended inputs (valid channels are `0..channels()`)
    fn channels(&self) -> u8;

    /// Measure one single-ended input
    ///
    /// Takes `&mut self` because a conversion needs exclusive use of the bus.
    fn sample(&mut self, channel: u8) -> Result<Reading, SampleError>;

    /// Measure one single-ended input, returning only volts
    fn sample_voltage(&mut self, channel: u8) -> Result<f32, SampleError> {
        self.sample(channel).map(|r| r.voltage())
    }

    /// Check a channel number without touching the bus
    fn is_valid_channel(&self, channel: u8) -> bool {
        channel < self.channels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_mapping() {
        assert_eq!(
            SampleError::from_fault(0x48, BusFault::AddressNack),
            SampleError::DeviceNotFound(0x48)
        );
        assert_eq!(
            SampleError::from_fault(0x48, BusFault::ArbitrationLoss),
            SampleError::Bus(BusFault::ArbitrationLoss)
        );
    }

    #[test]
    fn test_bus_never_carries_address_nack() {
        let faults = [
            BusFault::Bus,
            BusFault::ArbitrationLoss,
            BusFault::AddressNack,
            BusFault::DataNack,
            BusFault::Overrun,
            BusFault::Other,
        ];
        for fault in faults {
            let err = SampleError::from_fault(0x49, fault);
            assert_ne!(err, SampleError::Bus(BusFault::AddressNack));
        }
        assert_eq!(
            SampleError::from_fault(0x49, BusFault::DataNack),
            SampleError::Bus(BusFault::DataNack)
        );
    }

    #[test]
    fn test_argument_errors() {
        assert!(SampleError::InvalidChannel(7).is_argument_error());
        assert!(SampleError::InvalidPair(1, 2).is_argument_error());
        assert!(!SampleError::Timeout.is_argument_error());
        assert!(!SampleError::DeviceNotFound(0x48).is_argument_error());
    }
}
