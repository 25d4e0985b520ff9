use embedded_hal_0_2::adc::OneShot;
use rp_pico::hal::adc::{Adc, AdcPin};
use sync_sampler::{SampleSource, widen_12bit};

use crate::board::AnalogPin;

/// Conversion could not be completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdcFault;

/// Single-shot ADC channel widened to the 16-bit sample range
///
/// The RP2040 converter is 12-bit; readings are scaled the same way
/// `read_u16` does on other runtimes so full scale is 65535.
pub struct AdcSampleSource {
    adc: Adc,
    pin: AdcPin<AnalogPin>,
}

impl AdcSampleSource {
    pub fn new(adc: Adc, pin: AdcPin<AnalogPin>) -> Self {
        Self { adc, pin }
    }
}

impl SampleSource for AdcSampleSource {
    type Error = AdcFault;

    fn read_sample(&mut self) -> Result<u16, Self::Error> {
        let raw: u16 = self.adc.read(&mut self.pin).map_err(|_| AdcFault)?;
        Ok(widen_12bit(raw))
    }
}
