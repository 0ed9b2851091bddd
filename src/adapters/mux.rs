//! GPIO-driven multiplexer select-line adapter.
//!
//! Drives the four address inputs of a 74HC4067-style 16-channel analog
//! multiplexer through any [`embedded_hal`] output pins.  Bit `n` of the
//! channel number maps to select line `n`.

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

use crate::app::ports::MultiplexController;

/// [`MultiplexController`] over four dedicated select lines.
pub struct GpioMultiplexer<P: OutputPin> {
    lines: [P; 4],
}

impl<P: OutputPin> GpioMultiplexer<P> {
    /// `lines` in S0..S3 order (least significant address bit first).
    pub fn new(lines: [P; 4]) -> Self {
        Self { lines }
    }
}

impl<P: OutputPin> MultiplexController for GpioMultiplexer<P> {
    fn select_channel(&mut self, channel: u8) {
        for (bit, line) in self.lines.iter_mut().enumerate() {
            let state = PinState::from((channel >> bit) & 1 == 1);
            if let Err(e) = line.set_state(state) {
                warn!("mux: select line S{} write failed: {:?}", bit, e);
            }
        }
    }
}
