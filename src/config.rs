//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the FM receiver hardware.
//! All timings, thresholds, addresses, and the non-volatile memory layout
//! are centralized here.

/// Periodic tick rate driving the button interpreter (100 Hz)
pub const TICK_HZ: u32 = 100;

/// Tick period in milliseconds
pub const TICK_PERIOD_MS: u32 = 1000 / TICK_HZ;

/// Press duration classified as a short press (50 ms)
pub const SHORT_PRESS_TICKS: u16 = 5;

/// Press duration classified as a long press (2 s)
pub const LONG_PRESS_TICKS: u16 = 200;

/// Press duration classified as a very long press (4 s)
pub const VERY_LONG_PRESS_TICKS: u16 = 400;

/// Inactivity window after which an abandoned tuning session self-cancels
/// (10 s since the last confirmed button release)
pub const INACTIVITY_TIMEOUT_TICKS: u16 = 1000;

/// Tick-counter mask for the tune-mode LED pattern (320 ms on / 320 ms off)
pub const TUNE_FLASH_MASK: u16 = 0x20;

/// Tick-counter mask for the factory-reset LED pattern (160 ms on / 160 ms off)
pub const FACTORY_FLASH_MASK: u16 = 0x10;

/// Full LED duty cycle (solid on)
pub const LED_FULL_DUTY: u8 = 0xFF;

/// Si4702 7-bit I2C device address (hardwired in the chip)
pub const SI4702_I2C_ADDR: u8 = 0x10;

/// I2C bus frequency for the tuner
pub const I2C_FREQUENCY_HZ: u32 = 100_000;

/// Crystal oscillator stabilization delay after XOSCEN (datasheet minimum
/// is 500 ms; AN230 recommends margin on top)
pub const XOSC_SETTLE_MS: u32 = 500;

/// Settle delay after writing the power-up configuration
pub const POWERUP_SETTLE_MS: u32 = 110;

/// Hold time for the TUNE bit during a direct-tune transaction; covers the
/// worst-case tune completion so the STC flag is never sampled
pub const TUNE_SETTLE_MS: u32 = 160;

/// Reset line low/high hold during the bus-mode selection dance
pub const RESET_PULSE_MS: u32 = 1;

/// Seek RSSI threshold programmed into SYSCONFIG2 (SiLabs AN230 appendix)
pub const SEEK_RSSI_THRESHOLD: u16 = 10;

/// Size of one parameter record in non-volatile storage
pub const PARAM_RECORD_SIZE: usize = 16;

/// Byte offset of the working parameter record
pub const WORKING_PARAMS_OFFSET: u32 = 0;

/// Byte offset of the factory-default parameter record
pub const FACTORY_PARAMS_OFFSET: u32 = 16;

/// Below this supply level the firmware only blinks the low-battery pattern
pub const LOW_BATTERY_MILLIVOLTS: u16 = 2100;

/// Above this supply level an external programmer must be attached, since
/// no battery chemistry used with this device reaches it
pub const PROGRAMMER_MIN_MILLIVOLTS: u16 = 3400;

/// Supply level at which the factory VREFINT calibration was taken
pub const VREFINT_CAL_MILLIVOLTS: u32 = 3000;

/// Factory-default channel (87.5 MHz + 9 x 200 kHz = 89.3 MHz)
pub const DEFAULT_CHANNEL: u16 = 9;

/// Factory-default volume (maximum, 0 dBFS)
pub const DEFAULT_VOLUME: u8 = 0x0F;
