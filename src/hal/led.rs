//! Status LED driver

use embassy_stm32::gpio::Output;

/// Single status LED on a push-pull GPIO
///
/// The control loop expresses brightness as an 8-bit duty, but the
/// patterns it produces are all full-on or full-off, so a plain GPIO
/// stands in for a PWM channel.
pub struct StatusLed {
    pin: Output<'static>,
}

impl StatusLed {
    /// Wrap an already-configured output pin
    #[must_use]
    pub fn new(pin: Output<'static>) -> Self {
        Self { pin }
    }

    /// Apply a duty from the control loop
    pub fn set_duty(&mut self, duty: u8) {
        if duty >= 0x80 {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
    }

    /// Force the LED on
    pub fn on(&mut self) {
        self.pin.set_high();
    }

    /// Force the LED off
    pub fn off(&mut self) {
        self.pin.set_low();
    }

    /// Invert the LED state
    pub fn toggle(&mut self) {
        self.pin.toggle();
    }
}
