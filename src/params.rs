//! CRC-protected tuning parameter store
//!
//! Tuning parameters persist across power cycles in data EEPROM as two
//! 16-byte records: a working record at offset 0 that tracks the last
//! saved station, and a factory record at offset 16 that the reset
//! gesture restores from. Each record carries a CRC-16 over its first
//! fourteen bytes so torn writes are detected and repaired at boot.

use embedded_storage::{ReadStorage, Storage};

use crate::config::{
    DEFAULT_CHANNEL, DEFAULT_VOLUME, FACTORY_PARAMS_OFFSET, PARAM_RECORD_SIZE,
    WORKING_PARAMS_OFFSET,
};
use crate::types::{Band, Deemphasis, Spacing, Volume};

/// One step of the CRC-16/ARC running checksum (reflected polynomial 0xA001)
#[must_use]
pub fn crc16_update(crc: u16, byte: u8) -> u16 {
    let mut crc = crc ^ u16::from(byte);
    for _ in 0..8 {
        if crc & 1 != 0 {
            crc = (crc >> 1) ^ 0xA001;
        } else {
            crc >>= 1;
        }
    }
    crc
}

fn crc16(data: &[u8]) -> u16 {
    data.iter().fold(0, |crc, &b| crc16_update(crc, b))
}

/// Factory default record: US/Europe band, 75 us de-emphasis, 200 kHz
/// spacing, channel 9 (89.3 MHz), full volume. The trailing two bytes
/// are the record CRC.
pub const FACTORY_DEFAULT: [u8; PARAM_RECORD_SIZE] = [
    0x00, 0x00, 0x00, 0x09, 0x00, 0x0F, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x6F,
    0x6C,
];

/// Decoded tuning parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamRecord {
    /// FM band selection
    pub band: Band,
    /// De-emphasis time constant
    pub deemphasis: Deemphasis,
    /// Channel spacing
    pub spacing: Spacing,
    /// Channel index within the band
    pub channel: u16,
    /// Output volume
    pub volume: Volume,
}

impl ParamRecord {
    /// The record restored by a factory reset
    #[must_use]
    pub fn factory_default() -> Self {
        Self {
            band: Band::UsEurope,
            deemphasis: Deemphasis::Us75,
            spacing: Spacing::Khz200,
            channel: DEFAULT_CHANNEL,
            volume: Volume::new(DEFAULT_VOLUME),
        }
    }

    /// Serialize to the stored wire format, computing the trailing CRC
    #[must_use]
    pub fn to_bytes(&self) -> [u8; PARAM_RECORD_SIZE] {
        let mut buf = [0u8; PARAM_RECORD_SIZE];
        buf[0] = self.band.bits() as u8;
        buf[1] = self.deemphasis.as_byte();
        buf[2] = self.spacing.bits() as u8;
        buf[3..5].copy_from_slice(&self.channel.to_le_bytes());
        buf[5] = self.volume.level();
        let crc = crc16(&buf[..PARAM_RECORD_SIZE - 2]);
        buf[PARAM_RECORD_SIZE - 2..].copy_from_slice(&crc.to_le_bytes());
        buf
    }

    /// Deserialize from the stored wire format
    ///
    /// Returns `None` when the trailing CRC does not match the payload.
    #[must_use]
    pub fn from_bytes(buf: &[u8; PARAM_RECORD_SIZE]) -> Option<Self> {
        let stored = u16::from_le_bytes([buf[PARAM_RECORD_SIZE - 2], buf[PARAM_RECORD_SIZE - 1]]);
        if crc16(&buf[..PARAM_RECORD_SIZE - 2]) != stored {
            return None;
        }
        Some(Self {
            band: Band::from_bits(buf[0]),
            deemphasis: Deemphasis::from_byte(buf[1]),
            spacing: Spacing::from_bits(buf[2]),
            channel: u16::from_le_bytes([buf[3], buf[4]]),
            volume: Volume::new(buf[5]),
        })
    }
}

impl Default for ParamRecord {
    fn default() -> Self {
        Self::factory_default()
    }
}

/// Persistent parameter store backed by data EEPROM
pub struct ParamStore<S> {
    store: S,
}

impl<S: Storage> ParamStore<S> {
    /// Wrap a storage backend
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn read_record(&mut self, offset: u32) -> Result<Option<ParamRecord>, S::Error> {
        let mut buf = [0u8; PARAM_RECORD_SIZE];
        self.store.read(offset, &mut buf)?;
        Ok(ParamRecord::from_bytes(&buf))
    }

    fn write_record(&mut self, offset: u32, record: &ParamRecord) -> Result<(), S::Error> {
        self.store.write(offset, &record.to_bytes())
    }

    /// Load the working record, or `None` if its CRC fails
    pub fn load_working(&mut self) -> Result<Option<ParamRecord>, S::Error> {
        self.read_record(WORKING_PARAMS_OFFSET)
    }

    /// Load the factory record, or `None` if its CRC fails
    pub fn load_factory(&mut self) -> Result<Option<ParamRecord>, S::Error> {
        self.read_record(FACTORY_PARAMS_OFFSET)
    }

    /// CRC-check the factory record
    pub fn validate_factory(&mut self) -> Result<bool, S::Error> {
        Ok(self.load_factory()?.is_some())
    }

    /// Overwrite the factory record with the built-in last-resort record
    pub fn seed_factory_defaults(&mut self) -> Result<(), S::Error> {
        self.store.write(FACTORY_PARAMS_OFFSET, &FACTORY_DEFAULT)
    }

    /// Copy the factory record over the working record
    ///
    /// Reseeds the factory record first when it is itself corrupt.
    pub fn restore_from_factory(&mut self) -> Result<ParamRecord, S::Error> {
        let record = match self.load_factory()? {
            Some(record) => record,
            None => {
                self.seed_factory_defaults()?;
                ParamRecord::factory_default()
            }
        };
        self.write_record(WORKING_PARAMS_OFFSET, &record)?;
        Ok(record)
    }

    /// Make the working record valid and return it
    ///
    /// Run once at boot. A valid working record is returned untouched
    /// and nothing is written. A corrupt working record is restored
    /// from the factory record, reseeding the factory record from the
    /// built-in defaults first when it is itself corrupt. On return
    /// the working record always passes its CRC.
    pub fn reconcile(&mut self) -> Result<ParamRecord, S::Error> {
        match self.load_working()? {
            Some(record) => Ok(record),
            None => self.restore_from_factory(),
        }
    }

    /// Persist a new channel in the working record
    ///
    /// Patches the stored bytes in place: only the channel field and
    /// the trailing CRC change, every other byte (reserved bytes
    /// included) is left exactly as stored.
    pub fn update_channel(&mut self, channel: u16) -> Result<(), S::Error> {
        let mut payload = [0u8; PARAM_RECORD_SIZE - 2];
        self.store.read(WORKING_PARAMS_OFFSET, &mut payload)?;
        payload[3..5].copy_from_slice(&channel.to_le_bytes());
        let crc = crc16(&payload);
        self.store.write(WORKING_PARAMS_OFFSET + 3, &channel.to_le_bytes())?;
        self.store
            .write(WORKING_PARAMS_OFFSET + PARAM_RECORD_SIZE as u32 - 2, &crc.to_le_bytes())
    }

    /// Channel currently held in the working record
    pub fn channel_raw(&mut self) -> Result<u16, S::Error> {
        let mut buf = [0u8; 2];
        self.store.read(WORKING_PARAMS_OFFSET + 3, &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Working record with a corrupt record replaced by defaults in RAM
    ///
    /// Unlike [`ParamStore::reconcile`] this never writes, for use after
    /// boot when the records are already known good.
    pub fn tuning_config(&mut self) -> Result<ParamRecord, S::Error> {
        Ok(self.load_working()?.unwrap_or_default())
    }
}
