//! Hardware Abstraction Layer
//!
//! Safe abstractions over the STM32L031G6 peripherals the receiver
//! uses. This module isolates hardware-specific code; everything above
//! it works through the `embedded-hal` and `embedded-storage` traits.
//!
//! # Pin Assignments
//!
//! - **PA0**: BUTTON - user button, active low with internal pull-up
//! - **PA1**: LED - status LED, active high
//! - **PA4**: TUNER_RST_N - Si4702 reset, active low
//! - **PA9**: I2C1_SCL - tuner bus clock
//! - **PA10**: I2C1_SDA - tuner bus data (held low during reset to
//!   select 2-wire mode)
//! - **PA2/PA3**: USART2 TX/RX - programming fixture link
//! - **PA13/PA14**: SWDIO/SWCLK - debug

pub mod eeprom;
pub mod led;
pub mod prog;
pub mod supply;
