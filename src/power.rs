//! Supply-voltage measurement and startup gating
//!
//! The supply rail is measured against the internal bandgap reference
//! at boot. Besides a low-battery lockout, the measurement doubles as
//! the programming-fixture detector: the fixture back-powers the board
//! at a voltage no battery chemistry used with this device reaches.

use crate::config::{
    LOW_BATTERY_MILLIVOLTS, PROGRAMMER_MIN_MILLIVOLTS, VREFINT_CAL_MILLIVOLTS,
};

/// A supply-rail measurement in millivolts
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SupplyVoltage {
    millivolts: u16,
}

impl SupplyVoltage {
    /// Wrap a measurement already expressed in millivolts
    #[must_use]
    pub const fn from_millivolts(millivolts: u16) -> Self {
        Self { millivolts }
    }

    /// Derive the supply voltage from a VREFINT conversion
    ///
    /// `cal_raw` is the factory calibration word, taken with the rail
    /// at 3.0 V; `read_raw` is the conversion just taken. The bandgap
    /// is constant, so the rail scales inversely with the reading.
    #[must_use]
    pub fn from_vrefint(cal_raw: u16, read_raw: u16) -> Self {
        if read_raw == 0 {
            return Self { millivolts: 0 };
        }
        let mv = VREFINT_CAL_MILLIVOLTS * u32::from(cal_raw) / u32::from(read_raw);
        Self {
            millivolts: mv.min(u32::from(u16::MAX)) as u16,
        }
    }

    /// The measurement in millivolts
    #[must_use]
    pub const fn millivolts(self) -> u16 {
        self.millivolts
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for SupplyVoltage {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}mV", self.millivolts);
    }
}

/// Startup decision taken from the boot supply measurement
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartupGate {
    /// Supply too low to run the receiver; blink and sleep
    LowBattery,
    /// Back-powered by the programming fixture; service the link
    Programming,
    /// Battery supply in the normal operating window
    Normal,
}

/// Classify the boot supply measurement
#[must_use]
pub fn startup_gate(supply: SupplyVoltage) -> StartupGate {
    if supply.millivolts() < LOW_BATTERY_MILLIVOLTS {
        StartupGate::LowBattery
    } else if supply.millivolts() >= PROGRAMMER_MIN_MILLIVOLTS {
        StartupGate::Programming
    } else {
        StartupGate::Normal
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for StartupGate {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::LowBattery => defmt::write!(f, "low-battery"),
            Self::Programming => defmt::write!(f, "programming"),
            Self::Normal => defmt::write!(f, "normal"),
        }
    }
}
