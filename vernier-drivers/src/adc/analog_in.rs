//! Channel-bound analog input
//!
//! An [`AnalogIn`] borrows a converter and remembers which input to
//! measure. Each accessor performs a fresh conversion; call [`AnalogIn::read`]
//! once and use the returned [`Reading`] when both the code and the voltage
//! are needed, so they come from the same conversion.

use vernier_core::{InputMux, Reading, SampleError};
use vernier_hal::I2cBus;

use super::ads1x15::Ads1x15;

/// Analog input bound to one converter input
pub struct AnalogIn<'a, I2C> {
    adc: &'a mut Ads1x15<I2C>,
    mux: InputMux,
}

impl<'a, I2C: I2cBus> AnalogIn<'a, I2C> {
    /// Single-ended input on `channel` (0-3)
    ///
    /// Rejects unsupported channels here, before any bus traffic.
    pub fn new(adc: &'a mut Ads1x15<I2C>, channel: u8) -> Result<Self, SampleError> {
        let mux = InputMux::single_ended(channel)?;
        Ok(Self { adc, mux })
    }

    /// Differential input measuring `positive - negative`
    pub fn differential(
        adc: &'a mut Ads1x15<I2C>,
        positive: u8,
        negative: u8,
    ) -> Result<Self, SampleError> {
        let mux = InputMux::differential(positive, negative)?;
        Ok(Self { adc, mux })
    }

    /// Input from an already-validated multiplexer setting
    pub fn from_mux(adc: &'a mut Ads1x15<I2C>, mux: InputMux) -> Self {
        Self { adc, mux }
    }

    /// Multiplexer setting this input measures
    pub fn mux(&self) -> InputMux {
        self.mux
    }

    /// Take one conversion
    pub fn read(&mut self) -> Result<Reading, SampleError> {
        self.adc.read(self.mux)
    }

    /// Raw conversion code of a fresh conversion
    pub fn value(&mut self) -> Result<i16, SampleError> {
        self.read().map(|r| r.raw)
    }

    /// Voltage of a fresh conversion
    pub fn voltage(&mut self) -> Result<f32, SampleError> {
        self.read().map(|r| r.voltage())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adc::mock::MockAds;
    use vernier_core::Gain;

    #[test]
    fn test_value_and_voltage() {
        let mut mock = MockAds::with_ads1015_code(1024);
        let mut adc = Ads1x15::ads1015(&mut mock);
        let mut chan = AnalogIn::new(&mut adc, 0).unwrap();

        assert_eq!(chan.mux(), InputMux::Ain0);
        assert_eq!(chan.value(), Ok(1024));
        assert_eq!(chan.voltage(), Ok(2.048));

        let reading = chan.read().unwrap();
        assert_eq!((reading.raw, reading.voltage()), (1024, 2.048));
    }

    #[test]
    fn test_invalid_channel_rejected_at_bind() {
        let mut mock = MockAds::with_ads1015_code(1024);
        let mut adc = Ads1x15::ads1015(&mut mock);

        assert!(matches!(
            AnalogIn::new(&mut adc, 7),
            Err(SampleError::InvalidChannel(7))
        ));
        drop(adc);
        assert_eq!(mock.transactions, 0);
    }

    #[test]
    fn test_gain_follows_converter() {
        let mut mock = MockAds::with_ads1015_code(1000);
        let mut adc = Ads1x15::ads1015(&mut mock);
        adc.set_gain(Gain::Sixteen);

        let mut chan = AnalogIn::differential(&mut adc, 2, 3).unwrap();
        assert_eq!(chan.mux(), InputMux::Diff23);
        let volts = chan.voltage().unwrap();
        assert!((volts - 0.125).abs() < 1e-6);
    }

    #[test]
    fn test_from_mux() {
        let mut mock = MockAds::with_ads1015_code(-3);
        let mut adc = Ads1x15::ads1015(&mut mock);

        let mut chan = AnalogIn::from_mux(&mut adc, InputMux::Diff03);
        assert_eq!(chan.value(), Ok(-3));
    }
}
