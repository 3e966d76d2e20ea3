//! Single-Station FM Receiver Firmware Library
//!
//! This library provides the core functionality for a battery-powered,
//! one-button FM receiver appliance built around the Si4702 tuner IC.
//! The device powers up tuned to a single stored station; a long press
//! enters a tuning session where short presses step the channel, a long
//! press saves it, and a very long press (plus confirmation) restores
//! factory defaults.
//!
//! # Architecture
//!
//! The firmware is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │  Control Loop  │  Mode/Display Machine  │  Power Supervisor  │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      DEVICE LAYER                            │
//! │  Si4702 Bring-up  │  Shadow Register Bank  │  Param Store    │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / DRIVER LAYER                         │
//! │  I2C  │  Data EEPROM  │  ADC (VREFINT)  │  LED  │  UART      │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RTOS / SCHEDULER                          │
//! │           embassy-rs (async/await executor)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Trait seams at the hardware boundary**: core logic is generic over
//!   `embedded-hal` and `embedded-storage` traits and runs on the host
//! - **Type-driven design**: custom types enforce invariants at compile time
//! - **No unsafe in application code**: unsafe isolated in the HAL layer
//! - **Explicit error handling**: all fallible operations return `Result`

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// Safe glue between the core logic and the STM32L031 peripherals.
#[cfg(feature = "embedded")]
pub mod hal;

/// Button Interpreter
///
/// Tick-driven debounce and press-duration classification.
pub mod button;

/// System configuration and constants
pub mod config;

/// Mode/Display State Machine and foreground service
///
/// Consumes button events and drives tuner and parameter-store actions.
pub mod control;

/// Parameter Store
///
/// CRC-protected non-volatile configuration with factory fallback.
pub mod params;

/// Power Supervision
///
/// Supply voltage classification for the startup gate.
pub mod power;

/// Register Transaction Layer
///
/// Shadow buffer mirroring the Si4702 register bank.
pub mod registers;

/// Si4702 Tuner Driver
///
/// Bring-up sequencer and direct-tune transactions.
pub mod tuner;

/// Shared types used across modules
pub mod types;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    // Common traits
    pub use embedded_hal::delay::DelayNs;
    pub use embedded_hal::i2c::I2c;
    pub use embedded_storage::{ReadStorage, Storage};

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
