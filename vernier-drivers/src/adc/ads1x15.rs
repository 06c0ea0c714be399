//! ADS1015 / ADS1115 I2C converter
//!
//! Four-input delta-sigma ADCs with a programmable gain amplifier.
//! Single-shot reads write the config register (which starts a
//! conversion), poll the OS bit until the conversion is done, then read
//! the conversion register. Continuous mode is started once and read
//! back with [`Ads1x15::latest`].

use vernier_core::mux::SINGLE_ENDED_CHANNELS;
use vernier_core::register::reg;
use vernier_core::{AnalogSampler, Chip, ConfigWord, Gain, InputMux, Mode, Reading, SampleError};
use vernier_hal::{BusFault, I2cBus};

/// Address with the ADDR pin tied to GND
pub const DEFAULT_ADDRESS: u8 = 0x48;

/// Config reads before a single-shot conversion is declared stuck
///
/// An 8 SPS conversion takes 125 ms; at 1 MHz one poll is about 40 µs,
/// so this leaves a wide margin at every supported rate and clock.
pub const MAX_READY_POLLS: u32 = 10_000;

/// ADS1x15 converter on an I2C bus
///
/// The bus is held by value; pass `&mut bus` to keep ownership with the
/// caller. To share a bus, build the driver inside
/// [`vernier_hal::SharedI2c::lock`] so the config write, the ready polls
/// and the conversion read run under one lock. A
/// [`vernier_hal::SharedI2cDevice`] locks per operation and lets other
/// users interleave between those steps.
pub struct Ads1x15<I2C> {
    i2c: I2C,
    address: u8,
    chip: Chip,
    gain: Gain,
    /// Samples per second
    data_rate: u16,
    /// DR field value for `data_rate`
    rate_bits: u16,
    mode: Mode,
}

impl<I2C: I2cBus> Ads1x15<I2C> {
    /// Create a driver at the default address with power-on settings
    ///
    /// Does not touch the bus; the device is configured on the first read.
    pub fn new(i2c: I2C, chip: Chip) -> Self {
        let data_rate = chip.default_data_rate();
        Self {
            i2c,
            address: DEFAULT_ADDRESS,
            chip,
            gain: Gain::default(),
            data_rate,
            // Power-on default is DR = 0b100 on both parts
            rate_bits: chip.rate_bits(data_rate).unwrap_or(0b100),
            mode: Mode::Single,
        }
    }

    /// Create an ADS1015 driver
    pub fn ads1015(i2c: I2C) -> Self {
        Self::new(i2c, Chip::Ads1015)
    }

    /// Create an ADS1115 driver
    pub fn ads1115(i2c: I2C) -> Self {
        Self::new(i2c, Chip::Ads1115)
    }

    /// Use a non-default address (0x48-0x4B depending on the ADDR pin)
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Chip variant
    pub fn chip(&self) -> Chip {
        self.chip
    }

    /// 7-bit I2C address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Current gain
    pub fn gain(&self) -> Gain {
        self.gain
    }

    /// Set the gain used by subsequent conversions
    pub fn set_gain(&mut self, gain: Gain) {
        self.gain = gain;
    }

    /// Current sample rate in SPS
    pub fn data_rate(&self) -> u16 {
        self.data_rate
    }

    /// Set the sample rate used by subsequent conversions
    pub fn set_data_rate(&mut self, sps: u16) -> Result<(), SampleError> {
        let bits = self
            .chip
            .rate_bits(sps)
            .ok_or(SampleError::InvalidDataRate(sps))?;
        self.data_rate = sps;
        self.rate_bits = bits;
        Ok(())
    }

    /// Mode the device was last put in
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Take one single-shot measurement of `mux`
    ///
    /// Ends continuous mode if it was running.
    pub fn read(&mut self, mux: InputMux) -> Result<Reading, SampleError> {
        let config = ConfigWord::new(mux, self.gain, self.rate_bits, Mode::Single);
        self.write_register(reg::CONFIG, config.bits())?;
        self.mode = Mode::Single;

        self.wait_ready()?;

        let bytes = self.read_register(reg::CONVERSION)?;
        Ok(Reading::from_register(self.chip, self.gain, bytes))
    }

    /// Single-shot measurement of `positive - negative`
    pub fn read_differential(
        &mut self,
        positive: u8,
        negative: u8,
    ) -> Result<Reading, SampleError> {
        let mux = InputMux::differential(positive, negative)?;
        self.read(mux)
    }

    /// Start converting `mux` continuously
    ///
    /// The first result is available after one conversion period
    /// (`1 / data_rate`); reading earlier returns the previous result.
    pub fn start_continuous(&mut self, mux: InputMux) -> Result<(), SampleError> {
        let config = ConfigWord::new(mux, self.gain, self.rate_bits, Mode::Continuous);
        self.write_register(reg::CONFIG, config.bits())?;
        self.mode = Mode::Continuous;
        Ok(())
    }

    /// Read the most recent conversion result
    ///
    /// Scaled with the current gain, which must not have changed since
    /// the conversion was started.
    pub fn latest(&mut self) -> Result<Reading, SampleError> {
        let bytes = self.read_register(reg::CONVERSION)?;
        Ok(Reading::from_register(self.chip, self.gain, bytes))
    }

    /// Leave continuous mode and power down
    pub fn stop(&mut self, mux: InputMux) -> Result<(), SampleError> {
        let config = ConfigWord::new(mux, self.gain, self.rate_bits, Mode::Single).without_start();
        self.write_register(reg::CONFIG, config.bits())?;
        self.mode = Mode::Single;
        Ok(())
    }

    /// Poll the OS bit until the current conversion finishes
    fn wait_ready(&mut self) -> Result<(), SampleError> {
        for _ in 0..MAX_READY_POLLS {
            let word = ConfigWord::from_bits(u16::from_be_bytes(self.read_register(reg::CONFIG)?));
            if word.is_conversion_ready() {
                return Ok(());
            }
        }
        Err(SampleError::Timeout)
    }

    fn write_register(&mut self, register: u8, value: u16) -> Result<(), SampleError> {
        let [hi, lo] = value.to_be_bytes();
        let address = self.address;
        self.i2c
            .write(address, &[register, hi, lo])
            .map_err(|e| SampleError::from_fault(address, BusFault::classify(&e)))
    }

    fn read_register(&mut self, register: u8) -> Result<[u8; 2], SampleError> {
        let mut buf = [0u8; 2];
        let address = self.address;
        self.i2c
            .write_read(address, &[register], &mut buf)
            .map_err(|e| SampleError::from_fault(address, BusFault::classify(&e)))?;
        Ok(buf)
    }
}

impl<I2C: I2cBus> AnalogSampler for Ads1x15<I2C> {
    fn channels(&self) -> u8 {
        SINGLE_ENDED_CHANNELS
    }

    fn sample(&mut self, channel: u8) -> Result<Reading, SampleError> {
        // Validate before any bus traffic
        let mux = InputMux::single_ended(channel)?;
        self.read(mux)
    }
}
