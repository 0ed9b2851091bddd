//! Mock hardware adapters for integration tests.
//!
//! Implements the scan port traits against in-memory tables so tests can
//! script bank readings per multiplex channel and assert on the exact
//! protocol lines emitted, without touching real GPIO/ADC peripherals.

use railsense::app::events::ScanReport;
use railsense::app::ports::{Bank, BankSampler, MultiplexController, PinConfig, ReportSink};

// ── MockHw ────────────────────────────────────────────────────

/// Scriptable scan peripherals: bank readings are keyed by the channel
/// the scanner last selected, mirroring how the real multiplexer routes
/// one detector per channel to each bank ADC.
pub struct MockHw {
    /// Channel currently routed to the bank ADCs.
    pub selected: u8,
    /// Every channel select, in order.
    pub selects: Vec<u8>,
    /// Bank A/B readings per channel (lines 0–15).
    pub ab: [u16; 16],
    /// Bank C/D readings per channel (lines 16–31).
    pub cd: [u16; 16],
}

impl MockHw {
    pub fn new() -> Self {
        Self {
            selected: 0,
            selects: Vec::new(),
            ab: [0; 16],
            cd: [0; 16],
        }
    }

    /// Set the raw reading seen for a logical line (0–31).
    pub fn set_line(&mut self, line: u8, raw: u16) {
        assert!(line < 32);
        if line < 16 {
            self.ab[usize::from(line)] = raw;
        } else {
            self.cd[usize::from(line - 16)] = raw;
        }
    }
}

impl Default for MockHw {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiplexController for MockHw {
    fn select_channel(&mut self, channel: u8) {
        self.selected = channel & 0x0F;
        self.selects.push(self.selected);
    }
}

impl BankSampler for MockHw {
    fn sample(&mut self, bank: Bank) -> u16 {
        match bank {
            Bank::AB => self.ab[usize::from(self.selected)],
            Bank::CD => self.cd[usize::from(self.selected)],
        }
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Records every report as its rendered protocol line.
pub struct RecordingSink {
    pub lines: Vec<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportSink for RecordingSink {
    fn report(&mut self, report: ScanReport) {
        self.lines
            .push(format!("<{} {}>", report.state.marker(), report.line));
    }
}

// ── RecordingPinConfig ────────────────────────────────────────

/// Records pin configuration calls for startup-wiring assertions.
#[derive(Default)]
pub struct RecordingPinConfig {
    pub calls: Vec<(u8, bool)>,
}

impl PinConfig for RecordingPinConfig {
    fn configure_input(&mut self, line: u8, pullup: bool) {
        self.calls.push((line, pullup));
    }
}
