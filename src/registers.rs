//! Si4702 register map and shadow bank
//!
//! The Si4702 exposes sixteen 16-bit registers over I2C but supports no
//! register addressing: a bus read always starts at register 0x0A and a
//! bus write always starts at register 0x02, both wrapping modulo 16.
//! [`ShadowBank`] keeps a RAM image of all sixteen registers laid out in
//! the device's read order so that bulk transfers map directly onto the
//! buffer, and getters/setters hide the rotated layout from callers.

use embedded_hal::i2c::I2c;

use crate::config::SI4702_I2C_ADDR;

/// Si4702 register addresses
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Register {
    DeviceId = 0x00,
    ChipId = 0x01,
    PowerCfg = 0x02,
    Channel = 0x03,
    SysConfig1 = 0x04,
    SysConfig2 = 0x05,
    SysConfig3 = 0x06,
    Test1 = 0x07,
    Test2 = 0x08,
    BootConfig = 0x09,
    StatusRssi = 0x0A,
    ReadChan = 0x0B,
    RdsA = 0x0C,
    RdsB = 0x0D,
    RdsC = 0x0E,
    RdsD = 0x0F,
}

impl Register {
    /// Byte offset of this register within the shadow buffer
    ///
    /// Reads start at 0x0A, so register 0x0A lands at offset 0 and the
    /// rest follow in wrapped order, two bytes each, high byte first.
    #[must_use]
    pub const fn offset(self) -> usize {
        ((self as usize + 6) & 0x0F) * 2
    }
}

/// Bit and field definitions for the writable registers
pub mod bits {
    /// POWERCFG: softmute disable
    pub const DSMUTE: u16 = 0x8000;
    /// POWERCFG: mute disable
    pub const DMUTE: u16 = 0x4000;
    /// POWERCFG: force mono
    pub const MONO: u16 = 0x2000;
    /// POWERCFG: seek direction up
    pub const SEEKUP: u16 = 0x0200;
    /// POWERCFG: power up
    pub const ENABLE: u16 = 0x0001;
    /// POWERCFG: power down
    pub const DISABLE: u16 = 0x0040;

    /// CHANNEL: start tune
    pub const TUNE: u16 = 0x8000;
    /// CHANNEL: channel field
    pub const CHANNEL_MASK: u16 = 0x01FF;

    /// SYSCONFIG1: 50 us de-emphasis
    pub const DE: u16 = 0x0800;

    /// SYSCONFIG2: band field position
    pub const BAND_SHIFT: u16 = 6;
    /// SYSCONFIG2: spacing field position
    pub const SPACE_SHIFT: u16 = 4;
    /// SYSCONFIG2: seek RSSI threshold position
    pub const SEEKTH_SHIFT: u16 = 8;
    /// SYSCONFIG2: volume field
    pub const VOLUME_MASK: u16 = 0x000F;

    /// TEST1: crystal oscillator enable, with the reserved bit the
    /// datasheet requires to be written as one
    pub const XOSCEN_WORD: u16 = 0x8100;
}

/// RAM image of the Si4702 register file
///
/// The buffer is stored in device read order (starting at STATUSRSSI)
/// so that [`ShadowBank::read_all`] is a single 32-byte transfer and
/// [`ShadowBank::write_config`] a single 12-byte slice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShadowBank {
    buf: [u8; 32],
}

impl ShadowBank {
    /// Create a zeroed shadow bank
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: [0; 32] }
    }

    /// Get a register value from the shadow image
    #[must_use]
    pub fn get(&self, reg: Register) -> u16 {
        let off = reg.offset();
        u16::from_be_bytes([self.buf[off], self.buf[off + 1]])
    }

    /// Set a register value in the shadow image
    pub fn set(&mut self, reg: Register, value: u16) {
        let off = reg.offset();
        self.buf[off..off + 2].copy_from_slice(&value.to_be_bytes());
    }

    /// Refresh the whole shadow image from the device
    ///
    /// All sixteen registers are read in one transfer; the device
    /// streams them starting at STATUSRSSI, matching the buffer layout.
    pub fn read_all<I: I2c>(&mut self, i2c: &mut I) -> Result<(), I::Error> {
        i2c.read(SI4702_I2C_ADDR, &mut self.buf)
    }

    /// Push the writable registers (POWERCFG through TEST1) to the device
    ///
    /// Writes always start at POWERCFG, which lives at offset 16 in the
    /// rotated buffer; the six writable registers are contiguous there.
    pub fn write_config<I: I2c>(&self, i2c: &mut I) -> Result<(), I::Error> {
        i2c.write(SI4702_I2C_ADDR, &self.buf[16..28])
    }
}
