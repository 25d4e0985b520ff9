use core::convert::Infallible;

use rp_pico::hal::gpio::Interrupt::EdgeLow;
use sync_sampler::EdgeTrigger;

use crate::board::SyncPin;

/// Falling-edge interrupt on the sync input
///
/// Only enables the pin's interrupt in `IO_BANK0`. Unmasking
/// `IO_IRQ_BANK0` in the NVIC is left to the application.
pub struct SyncTrigger {
    pin: SyncPin,
}

impl SyncTrigger {
    pub fn new(pin: SyncPin) -> Self {
        Self { pin }
    }
}

impl EdgeTrigger for SyncTrigger {
    type Error = Infallible;

    fn arm(&mut self) -> Result<(), Self::Error> {
        // Drop any edge latched while the line was idle
        self.pin.clear_interrupt(EdgeLow);
        self.pin.set_interrupt_enabled(EdgeLow, true);
        Ok(())
    }

    fn disarm(&mut self) -> Result<(), Self::Error> {
        self.pin.set_interrupt_enabled(EdgeLow, false);
        self.pin.clear_interrupt(EdgeLow);
        Ok(())
    }

    fn acknowledge(&mut self) {
        self.pin.clear_interrupt(EdgeLow);
    }
}
