//! Si4702 tuner driver
//!
//! Drives the receiver through its crystal-start bring-up sequence,
//! direct tunes and power-down, keeping the register shadow in
//! [`crate::registers::ShadowBank`] consistent with the device.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::config::{POWERUP_SETTLE_MS, SEEK_RSSI_THRESHOLD, TUNE_SETTLE_MS, XOSC_SETTLE_MS};
use crate::params::ParamRecord;
use crate::registers::{bits, Register, ShadowBank};

/// Si4702 FM receiver on a blocking I2C bus
pub struct Si4702<I2C, D> {
    i2c: I2C,
    delay: D,
    bank: ShadowBank,
}

impl<I2C: I2c, D: DelayNs> Si4702<I2C, D> {
    /// Take ownership of the bus and delay source
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self {
            i2c,
            delay,
            bank: ShadowBank::new(),
        }
    }

    /// Power up the receiver and tune it to the stored station
    ///
    /// Sequence per the Si4702 crystal-oscillator start procedure:
    /// enable the oscillator, wait for it to stabilize, enable the
    /// part, wait for it to power up, clear the stale tune state left
    /// by a previous session, then apply the audio and band
    /// configuration and tune.
    pub fn power_up(&mut self, params: &ParamRecord) -> Result<(), I2C::Error> {
        self.bank.read_all(&mut self.i2c)?;
        self.bank.set(Register::Test1, bits::XOSCEN_WORD);
        self.bank.write_config(&mut self.i2c)?;
        self.delay.delay_ms(XOSC_SETTLE_MS);

        self.bank.set(
            Register::PowerCfg,
            bits::DSMUTE | bits::DMUTE | bits::MONO | bits::SEEKUP | bits::ENABLE,
        );
        self.bank.write_config(&mut self.i2c)?;
        self.delay.delay_ms(POWERUP_SETTLE_MS);

        // A brown-out can leave TUNE or channel bits latched from the
        // previous session; clear them before configuring.
        self.bank.read_all(&mut self.i2c)?;
        self.bank.set(Register::Channel, 0);
        self.bank.write_config(&mut self.i2c)?;

        let mut sysconfig1 = self.bank.get(Register::SysConfig1);
        match params.deemphasis {
            crate::types::Deemphasis::Us50 => sysconfig1 |= bits::DE,
            crate::types::Deemphasis::Us75 => sysconfig1 &= !bits::DE,
        }
        self.bank.set(Register::SysConfig1, sysconfig1);
        // Volume stays muted until the tune settles so the speaker
        // never carries inter-station noise at startup.
        self.bank.set(
            Register::SysConfig2,
            (SEEK_RSSI_THRESHOLD << bits::SEEKTH_SHIFT)
                | (params.band.bits() << bits::BAND_SHIFT)
                | (params.spacing.bits() << bits::SPACE_SHIFT),
        );
        self.bank.write_config(&mut self.i2c)?;

        self.tune_direct(params.channel)?;
        self.set_volume(params.volume)
    }

    /// Tune directly to a channel index
    ///
    /// Two-phase: latch the channel with TUNE set, wait for the tune to
    /// complete, then clear TUNE so the next tune can start.
    pub fn tune_direct(&mut self, channel: u16) -> Result<(), I2C::Error> {
        self.bank
            .set(Register::Channel, bits::TUNE | (channel & bits::CHANNEL_MASK));
        self.bank.write_config(&mut self.i2c)?;
        self.delay.delay_ms(TUNE_SETTLE_MS);
        self.bank
            .set(Register::Channel, channel & bits::CHANNEL_MASK);
        self.bank.write_config(&mut self.i2c)
    }

    /// Channel the shadow image believes is tuned
    #[must_use]
    pub fn current_channel(&self) -> u16 {
        self.bank.get(Register::Channel) & bits::CHANNEL_MASK
    }

    /// Set the output volume without touching the rest of SYSCONFIG2
    pub fn set_volume(&mut self, volume: crate::types::Volume) -> Result<(), I2C::Error> {
        let sysconfig2 = self.bank.get(Register::SysConfig2) & !bits::VOLUME_MASK;
        self.bank
            .set(Register::SysConfig2, sysconfig2 | u16::from(volume.level()));
        self.bank.write_config(&mut self.i2c)
    }

    /// Drop the receiver into its low-power disabled state
    pub fn power_down(&mut self) -> Result<(), I2C::Error> {
        self.bank
            .set(Register::PowerCfg, bits::ENABLE | bits::DISABLE);
        self.bank.write_config(&mut self.i2c)
    }
}
