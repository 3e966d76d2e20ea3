//! Shared types used across the FM receiver firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time and provide type safety throughout the codebase.

/// Application mode
///
/// `mode` and `display` (see [`crate::control::Shared`]) both range over
/// this enumeration but are tracked independently: a mode transition and
/// its visual confirmation are not always simultaneous. Entering SAVE, for
/// example, is signaled on the LED while the button is still held, before
/// the save is actually committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    /// Normal listening; the button interpreter is the only thing awake
    #[default]
    Normal,
    /// Tuning session entered via long press
    Tune,
    /// A scan step has been requested and not yet issued
    SeekStart,
    /// A scan step is in flight
    Seeking,
    /// Save of the currently tuned channel requested
    Save,
    /// Factory reset requested, awaiting confirmation
    FactoryReset,
    /// Factory reset confirmed, restore pending
    FactoryConfirm,
    /// Session expired (reserved; expiry currently forces `Normal` directly)
    Timeout,
}

#[cfg(feature = "embedded")]
impl defmt::Format for Mode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Normal => defmt::write!(f, "NORMAL"),
            Self::Tune => defmt::write!(f, "TUNE"),
            Self::SeekStart => defmt::write!(f, "SEEK-START"),
            Self::Seeking => defmt::write!(f, "SEEKING"),
            Self::Save => defmt::write!(f, "SAVE"),
            Self::FactoryReset => defmt::write!(f, "FACTORY-RESET"),
            Self::FactoryConfirm => defmt::write!(f, "FACTORY-CONFIRM"),
            Self::Timeout => defmt::write!(f, "TIMEOUT"),
        }
    }
}

/// Press-duration classification produced by the button interpreter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Press {
    /// Held for at least 50 ms (scan step)
    Short,
    /// Held for at least 2 s (enter tune / save / confirm)
    Long,
    /// Held for at least 4 s (factory reset request)
    VeryLong,
}

impl Press {
    /// Hold duration in ticks at which this classification arms
    #[must_use]
    pub const fn hold_ticks(self) -> u16 {
        match self {
            Self::Short => crate::config::SHORT_PRESS_TICKS,
            Self::Long => crate::config::LONG_PRESS_TICKS,
            Self::VeryLong => crate::config::VERY_LONG_PRESS_TICKS,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Press {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Short => defmt::write!(f, "short"),
            Self::Long => defmt::write!(f, "long"),
            Self::VeryLong => defmt::write!(f, "very-long"),
        }
    }
}

/// FM band selection (Si4702 SYSCONFIG2 BAND field)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Band {
    /// 87.5 - 108 MHz (US / Europe)
    #[default]
    UsEurope,
    /// 76 - 108 MHz (Japan wide)
    JapanWide,
    /// 76 - 90 MHz (Japan)
    Japan,
}

impl Band {
    /// Decode from the stored parameter byte (two significant bits)
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::UsEurope,
            1 => Self::JapanWide,
            _ => Self::Japan,
        }
    }

    /// Register field value
    #[must_use]
    pub const fn bits(self) -> u16 {
        match self {
            Self::UsEurope => 0,
            Self::JapanWide => 1,
            Self::Japan => 2,
        }
    }

    /// Band bottom edge in kHz
    #[must_use]
    pub const fn bottom_khz(self) -> u32 {
        match self {
            Self::UsEurope => 87_500,
            Self::JapanWide | Self::Japan => 76_000,
        }
    }

    /// Band top edge in kHz
    #[must_use]
    pub const fn top_khz(self) -> u32 {
        match self {
            Self::UsEurope | Self::JapanWide => 108_000,
            Self::Japan => 90_000,
        }
    }

    /// Highest representable channel index for the given spacing
    #[must_use]
    pub const fn top_channel(self, spacing: Spacing) -> u16 {
        ((self.top_khz() - self.bottom_khz()) / spacing.khz()) as u16
    }

    /// One channel up, wrapping at the band edge
    #[must_use]
    pub const fn step_up(self, spacing: Spacing, channel: u16) -> u16 {
        if channel >= self.top_channel(spacing) {
            0
        } else {
            channel + 1
        }
    }

    /// Carrier frequency in kHz for a channel index
    #[must_use]
    pub const fn channel_khz(self, spacing: Spacing, channel: u16) -> u32 {
        self.bottom_khz() + channel as u32 * spacing.khz()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Band {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::UsEurope => defmt::write!(f, "87.5-108MHz"),
            Self::JapanWide => defmt::write!(f, "76-108MHz"),
            Self::Japan => defmt::write!(f, "76-90MHz"),
        }
    }
}

/// Channel spacing (Si4702 SYSCONFIG2 SPACE field)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Spacing {
    /// 200 kHz (US / Australia)
    #[default]
    Khz200,
    /// 100 kHz (Europe / Japan)
    Khz100,
    /// 50 kHz
    Khz50,
}

impl Spacing {
    /// Decode from the stored parameter byte (two significant bits)
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::Khz200,
            1 => Self::Khz100,
            _ => Self::Khz50,
        }
    }

    /// Register field value
    #[must_use]
    pub const fn bits(self) -> u16 {
        match self {
            Self::Khz200 => 0,
            Self::Khz100 => 1,
            Self::Khz50 => 2,
        }
    }

    /// Spacing in kHz
    #[must_use]
    pub const fn khz(self) -> u32 {
        match self {
            Self::Khz200 => 200,
            Self::Khz100 => 100,
            Self::Khz50 => 50,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Spacing {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}kHz", self.khz());
    }
}

/// De-emphasis time constant (Si4702 SYSCONFIG1 DE bit)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Deemphasis {
    /// 75 µs (US)
    #[default]
    Us75,
    /// 50 µs (Europe / Japan / Australia)
    Us50,
}

impl Deemphasis {
    /// Decode from the stored parameter byte (any nonzero value selects 50 µs)
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        if byte == 0 {
            Self::Us75
        } else {
            Self::Us50
        }
    }

    /// Encode to the stored parameter byte
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Us75 => 0,
            Self::Us50 => 1,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Deemphasis {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Us75 => defmt::write!(f, "75us"),
            Self::Us50 => defmt::write!(f, "50us"),
        }
    }
}

/// Output volume level (Si4702 SYSCONFIG2 VOLUME field, 0-15)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Volume(u8);

impl Volume {
    /// Muted
    pub const MIN: Self = Self(0);

    /// 0 dBFS
    pub const MAX: Self = Self(0x0F);

    /// Create a volume level; out-of-range values are masked to 0-15
    #[must_use]
    pub const fn new(level: u8) -> Self {
        Self(level & 0x0F)
    }

    /// Get the 4-bit register field value
    #[must_use]
    pub const fn level(self) -> u8 {
        self.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::MAX
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Volume {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "vol {}", self.0);
    }
}
