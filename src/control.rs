//! Mode machine and foreground control loop
//!
//! State shared between the tick task and the foreground loop lives in
//! [`Shared`]. The tick task advances the tick counter, runs the
//! button interpreter and applies mode transitions; the foreground
//! loop carries out whatever work the current mode requests (scan
//! steps, saves, factory restores) and drives the status LED.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use embedded_storage::Storage;

use crate::button::ButtonEvent;
use crate::config::{
    FACTORY_FLASH_MASK, INACTIVITY_TIMEOUT_TICKS, LED_FULL_DUTY, TUNE_FLASH_MASK,
};
use crate::params::ParamStore;
use crate::tuner::Si4702;
use crate::types::{Mode, Press};

/// State shared between the tick task and the foreground loop
#[derive(Clone, Copy, Debug)]
pub struct Shared {
    /// Free-running 10 ms tick counter, wrapping
    pub ticks: u16,
    /// Current application mode
    pub mode: Mode,
    /// Mode currently shown on the LED
    ///
    /// Diverges from `mode` while a long hold is in progress: the LED
    /// previews the mode the release will enter.
    pub display: Mode,
    /// Tick of the most recent button release, for session expiry
    pub last_release: u16,
}

impl Shared {
    /// Initial state at power-on
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ticks: 0,
            mode: Mode::Normal,
            display: Mode::Normal,
            last_release: 0,
        }
    }

    /// Apply one button event to the mode machine
    ///
    /// Threshold events preview the upcoming mode on the LED while the
    /// button is still held; release events commit the transition.
    pub fn handle_button(&mut self, event: ButtonEvent) {
        match event {
            ButtonEvent::Threshold(Press::Short) => {}
            ButtonEvent::Threshold(Press::Long) => {
                self.display = match self.mode {
                    Mode::Normal => Mode::Tune,
                    Mode::Tune | Mode::FactoryReset => Mode::Save,
                    other => other,
                };
            }
            ButtonEvent::Threshold(Press::VeryLong) => {
                if self.mode == Mode::Tune {
                    self.display = Mode::FactoryReset;
                }
            }
            ButtonEvent::Release(fired) => {
                self.last_release = self.ticks;
                if let Some(press) = fired {
                    self.apply_release(press);
                }
            }
        }
    }

    fn apply_release(&mut self, press: Press) {
        self.mode = match (self.mode, press) {
            (Mode::Tune, Press::Short) => Mode::SeekStart,
            (Mode::Normal, Press::Long) => Mode::Tune,
            (Mode::Tune, Press::Long) => Mode::Save,
            (Mode::FactoryReset, Press::Long) => Mode::FactoryConfirm,
            (Mode::Tune, Press::VeryLong) => Mode::FactoryReset,
            (mode, _) => mode,
        };
        self.display = self.mode;
    }

    /// Expire an idle session, forcing both mode and display to normal
    ///
    /// Expiry uses wrapping tick arithmetic so a counter rollover never
    /// strands the unit outside normal mode.
    pub fn check_timeout(&mut self) {
        if self.mode == Mode::Normal {
            return;
        }
        if self.ticks.wrapping_sub(self.last_release) > INACTIVITY_TIMEOUT_TICKS {
            self.mode = Mode::Normal;
            self.display = Mode::Normal;
        }
    }
}

impl Default for Shared {
    fn default() -> Self {
        Self::new()
    }
}

/// Error from the foreground service pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlError<B, E> {
    /// Tuner I2C transaction failed
    Bus(B),
    /// Parameter store access failed
    Store(E),
}

/// Run one foreground pass: perform pending mode work, age out idle
/// sessions and compute the LED duty to show
///
/// Returns the PWM duty for the status LED.
pub fn service<I, D, S>(
    shared: &mut Shared,
    radio: &mut Si4702<I, D>,
    params: &mut ParamStore<S>,
) -> Result<u8, ControlError<I::Error, S::Error>>
where
    I: I2c,
    D: DelayNs,
    S: Storage,
{
    match shared.mode {
        Mode::SeekStart => {
            let config = params.tuning_config().map_err(ControlError::Store)?;
            let next = config
                .band
                .step_up(config.spacing, radio.current_channel());
            radio.tune_direct(next).map_err(ControlError::Bus)?;
            shared.mode = Mode::Tune;
            shared.display = Mode::Tune;
        }
        Mode::Save => {
            let tuned = radio.current_channel();
            if params.channel_raw().map_err(ControlError::Store)? != tuned {
                params.update_channel(tuned).map_err(ControlError::Store)?;
            }
            shared.mode = Mode::Normal;
            shared.display = Mode::Normal;
        }
        Mode::FactoryConfirm => {
            let restored = params.restore_from_factory().map_err(ControlError::Store)?;
            radio
                .tune_direct(restored.channel)
                .map_err(ControlError::Bus)?;
            shared.mode = Mode::Normal;
            shared.display = Mode::Normal;
        }
        _ => {}
    }
    shared.check_timeout();
    Ok(led_duty(shared.display, shared.ticks))
}

/// LED duty for the given display mode and tick count
///
/// Tune shows a slow flash, factory reset a fast flash, the two commit
/// states solid on, everything else off.
#[must_use]
pub fn led_duty(display: Mode, ticks: u16) -> u8 {
    match display {
        Mode::Tune => {
            if ticks & TUNE_FLASH_MASK != 0 {
                LED_FULL_DUTY
            } else {
                0
            }
        }
        Mode::FactoryReset => {
            if ticks & FACTORY_FLASH_MASK != 0 {
                LED_FULL_DUTY
            } else {
                0
            }
        }
        Mode::Save | Mode::FactoryConfirm => LED_FULL_DUTY,
        _ => 0,
    }
}

/// Byte source for the programming-fixture link
///
/// Implemented by the UART port on hardware and by test doubles on the
/// host.
pub trait ProgrammerLink {
    /// Take one received byte if available
    fn read_byte(&mut self) -> Option<u8>;
}

/// Incremental decoder for the programming-fixture protocol
///
/// The fixture sends each channel as two bytes, high byte first. The
/// session is polled from the main loop; each completed channel is
/// written straight into the working record.
#[derive(Debug, Default)]
pub struct ProgrammingSession {
    pending: Option<u8>,
}

impl ProgrammingSession {
    /// Start a session with no bytes pending
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Drain the link and program any completed channels
    ///
    /// Returns the last channel programmed this poll, if any.
    pub fn poll<L, S>(
        &mut self,
        link: &mut L,
        params: &mut ParamStore<S>,
    ) -> Result<Option<u16>, S::Error>
    where
        L: ProgrammerLink,
        S: Storage,
    {
        let mut programmed = None;
        while let Some(byte) = link.read_byte() {
            match self.pending.take() {
                Some(high) => {
                    let channel = u16::from_be_bytes([high, byte]);
                    params.update_channel(channel)?;
                    programmed = Some(channel);
                }
                None => self.pending = Some(byte),
            }
        }
        Ok(programmed)
    }
}
