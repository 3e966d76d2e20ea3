//! Supply-rail measurement via the internal reference
//!
//! The STM32L031 has no sense divider on this board; instead the ADC
//! samples the internal bandgap (VREFINT) against the supply rail and
//! the factory calibration word recovers the rail voltage.

use embassy_stm32::adc::Adc;
use embassy_stm32::peripherals::ADC1;

use crate::power::SupplyVoltage;

/// Address of the factory VREFINT calibration word, measured at 3.0 V
const VREFINT_CAL_ADDR: *const u16 = 0x1FF8_0078 as *const u16;

/// One-shot supply measurement using the VREFINT channel
pub struct SupplySensor<'d> {
    adc: Adc<'d, ADC1>,
}

impl<'d> SupplySensor<'d> {
    /// Take ownership of the ADC
    #[must_use]
    pub fn new(adc: Adc<'d, ADC1>) -> Self {
        Self { adc }
    }

    /// Sample VREFINT and convert to a rail voltage
    pub fn measure(&mut self) -> SupplyVoltage {
        let mut vrefint = self.adc.enable_vrefint();
        let raw = self.adc.blocking_read(&mut vrefint);
        SupplyVoltage::from_vrefint(vrefint_cal(), raw)
    }
}

/// Factory VREFINT calibration word from system memory
#[allow(unsafe_code)]
fn vrefint_cal() -> u16 {
    // System-memory word written at production test; always readable.
    unsafe { VREFINT_CAL_ADDR.read_volatile() }
}
