//! Hardware adapter — bridges real peripherals to the scan port traits.
//!
//! Owns the multiplexer select-line driver and the bank ADC sampler,
//! exposing them through [`MultiplexController`] and [`BankSampler`] as
//! the single `hw` value the scanner polls against.

use embedded_hal::digital::OutputPin;
use log::debug;

use crate::app::ports::{Bank, BankSampler, MultiplexController, PinConfig};

use super::adc::AdcBankSampler;
use super::mux::GpioMultiplexer;

/// Concrete adapter that combines the scan peripherals behind port traits.
pub struct HardwareAdapter<P: OutputPin> {
    mux: GpioMultiplexer<P>,
    adc: AdcBankSampler,
}

impl<P: OutputPin> HardwareAdapter<P> {
    pub fn new(mux: GpioMultiplexer<P>, adc: AdcBankSampler) -> Self {
        Self { mux, adc }
    }
}

// ── MultiplexController implementation ────────────────────────

impl<P: OutputPin> MultiplexController for HardwareAdapter<P> {
    fn select_channel(&mut self, channel: u8) {
        self.mux.select_channel(channel);
    }
}

// ── BankSampler implementation ────────────────────────────────

impl<P: OutputPin> BankSampler for HardwareAdapter<P> {
    fn sample(&mut self, bank: Bank) -> u16 {
        self.adc.sample(bank)
    }
}

// ── Pin configuration ─────────────────────────────────────────

/// Pin-config adapter for boards whose input conditioning lives on the
/// detector carrier (pull-ups are discrete resistors next to the
/// multiplexer).  Logs each definition so the startup trace shows the
/// expected wiring.
pub struct CarrierPinConfig;

impl PinConfig for CarrierPinConfig {
    fn configure_input(&mut self, line: u8, pullup: bool) {
        debug!(
            "input line {}: {}",
            line,
            if pullup { "carrier pull-up" } else { "external bias" }
        );
    }
}
