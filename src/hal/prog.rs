//! Programming-fixture UART link

use embassy_stm32::mode::Blocking;
use embassy_stm32::usart::UartRx;

use crate::control::ProgrammerLink;

/// Receive side of the fixture link on USART2
pub struct ProgrammerPort {
    rx: UartRx<'static, Blocking>,
}

impl ProgrammerPort {
    /// Wrap an already-configured receiver
    #[must_use]
    pub fn new(rx: UartRx<'static, Blocking>) -> Self {
        Self { rx }
    }
}

impl ProgrammerLink for ProgrammerPort {
    fn read_byte(&mut self) -> Option<u8> {
        // Framing or overrun errors drop the byte; the fixture resends
        // the whole channel on a missing acknowledgment.
        self.rx.nb_read().ok()
    }
}
