//! Debounced button interpreter
//!
//! The single user button is sampled once per 10 ms tick. A 4-bit
//! sample history provides debouncing: the button counts as released
//! only after four consecutive inactive samples, so contact bounce on
//! release cannot split one hold into two. While held, an active-tick
//! counter accumulates and arms progressively longer press
//! classifications; the armed classification fires once when the
//! release debounce completes.

use crate::types::Press;

/// Press classification thresholds, in ascending hold order
const DISPATCH: [(u16, Press); 3] = [
    (crate::config::SHORT_PRESS_TICKS, Press::Short),
    (crate::config::LONG_PRESS_TICKS, Press::Long),
    (crate::config::VERY_LONG_PRESS_TICKS, Press::VeryLong),
];

/// Event produced by [`ButtonInterpreter::tick`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonEvent {
    /// A hold threshold was just crossed while the button is still down
    Threshold(Press),
    /// The button was released; carries the armed classification, or
    /// `None` for a press shorter than the shortest threshold
    Release(Option<Press>),
}

/// Tick-driven debouncer and press classifier
#[derive(Clone, Debug, Default)]
pub struct ButtonInterpreter {
    history: u8,
    ticks_active: u16,
    armed: Option<Press>,
}

impl ButtonInterpreter {
    /// Create an interpreter in the released state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            history: 0,
            ticks_active: 0,
            armed: None,
        }
    }

    /// Feed one sample; call exactly once per tick
    pub fn tick(&mut self, pressed: bool) -> Option<ButtonEvent> {
        self.history = (self.history << 1) | u8::from(pressed);
        if self.history & 0x0F == 0 {
            // Released: fire whatever classification the hold armed.
            let fired = self.armed.take();
            if self.ticks_active > 0 {
                self.ticks_active = 0;
                return Some(ButtonEvent::Release(fired));
            }
            return None;
        }
        self.ticks_active = self.ticks_active.saturating_add(1);
        for &(threshold, press) in &DISPATCH {
            if self.ticks_active == threshold {
                self.armed = Some(press);
                return Some(ButtonEvent::Threshold(press));
            }
        }
        None
    }
}
