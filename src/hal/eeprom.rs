//! Data EEPROM access for the parameter store
//!
//! The STM32L031 carries 1 KiB of true data EEPROM at 0x0808_0000,
//! byte-writable once the PECR lock is opened with the key sequence.
//! This driver exposes it through the `embedded-storage` traits so the
//! parameter store stays hardware-agnostic.

use embassy_stm32::pac::FLASH;
use embedded_storage::{ReadStorage, Storage};

/// Base address of the data EEPROM array
const EEPROM_BASE: u32 = 0x0808_0000;

/// Size of the data EEPROM array on the L031 (1 KiB)
const EEPROM_SIZE: u32 = 1024;

const PEKEY1: u32 = 0x89AB_CDEF;
const PEKEY2: u32 = 0x0203_0405;

/// Out-of-range EEPROM access
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfBounds;

#[cfg(feature = "embedded")]
impl defmt::Format for OutOfBounds {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "eeprom access out of bounds");
    }
}

/// The on-chip data EEPROM array
///
/// Construct exactly one instance; the type only exists to carry the
/// storage traits and to force exclusive access through `&mut self`.
pub struct DataEeprom {
    _private: (),
}

impl DataEeprom {
    /// Claim the EEPROM array
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    fn check_range(offset: u32, len: usize) -> Result<(), OutOfBounds> {
        let len = u32::try_from(len).map_err(|_| OutOfBounds)?;
        if offset.checked_add(len).is_some_and(|end| end <= EEPROM_SIZE) {
            Ok(())
        } else {
            Err(OutOfBounds)
        }
    }

    fn unlock() {
        if FLASH.pecr().read().pelock() {
            FLASH.pekeyr().write_value(PEKEY1);
            FLASH.pekeyr().write_value(PEKEY2);
        }
    }

    fn lock() {
        FLASH.pecr().modify(|w| w.set_pelock(true));
    }
}

impl Default for DataEeprom {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadStorage for DataEeprom {
    type Error = OutOfBounds;

    #[allow(unsafe_code)]
    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        Self::check_range(offset, bytes.len())?;
        for (i, byte) in bytes.iter_mut().enumerate() {
            let addr = (EEPROM_BASE + offset) as usize + i;
            // In range per check_range; EEPROM is always readable.
            *byte = unsafe { (addr as *const u8).read_volatile() };
        }
        Ok(())
    }

    fn capacity(&self) -> usize {
        EEPROM_SIZE as usize
    }
}

impl Storage for DataEeprom {
    #[allow(unsafe_code)]
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        Self::check_range(offset, bytes.len())?;
        Self::unlock();
        for (i, &byte) in bytes.iter().enumerate() {
            let addr = (EEPROM_BASE + offset) as usize + i;
            // Byte writes auto-erase on this part; the peripheral
            // stalls the bus until the write completes.
            unsafe { (addr as *mut u8).write_volatile(byte) };
            while FLASH.sr().read().bsy() {}
        }
        Self::lock();
        Ok(())
    }
}
