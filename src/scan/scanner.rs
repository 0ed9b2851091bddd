//! Multiplexed occupancy scanner — sampling, debounce, and change reporting.
//!
//! ## Hardware
//!
//! Up to 32 track detectors are wired to two analog inputs through a
//! 16-way multiplexer.  Each poll samples both bank ADCs for the channel
//! currently selected, then steps the select lines to the next channel.
//! A full sweep of all 16 channels is one *report cycle*.
//!
//! ## Debounce and reporting
//!
//! At the start of each report cycle the scanner compares the sweep it
//! just finished against the previous settled snapshot:
//!
//! ```text
//! settled = !(incoming ^ verified)            stable across the cycle
//! pending = (verified ^ reported) & settled   settled but not yet sent
//! ```
//!
//! A line must hold its value for a full cycle before a `<Q n>`/`<q n>`
//! transition is emitted, which filters contact bounce and gaps between
//! axles without per-sensor smoothing circuitry.  Lines are reported in
//! ascending order, and only lines actually written to a sink are marked
//! delivered — polling without a sink keeps changes pending.

use log::{debug, info};

use crate::app::events::{LineState, ScanReport};
use crate::app::ports::{Bank, BankSampler, MultiplexController, ReportSink};
use crate::config::ScannerConfig;

use super::bits::{LINE_COUNT, SensorBits};

/// Channels on the analog multiplexer; one select sweep per report cycle.
pub const MUX_CHANNELS: u8 = 16;

/// Rolling scan state for all 32 logical sensor lines.
pub struct SensorScanner {
    /// Last state delivered to a report sink.
    reported: SensorBits,
    /// Settled snapshot from the end of the previous report cycle.
    verified: SensorBits,
    /// Raw state accumulated bit-at-a-time during the current cycle.
    incoming: SensorBits,
    /// Multiplex step 0–15; the channel the hardware is currently routing.
    selector: u8,
    /// Polls since the last report cycle (legacy counter, no gating role).
    cycles: u16,
    enabled: bool,
    threshold: u16,
}

impl SensorScanner {
    pub fn new(config: &ScannerConfig) -> Self {
        Self {
            reported: SensorBits::EMPTY,
            verified: SensorBits::EMPTY,
            incoming: SensorBits::EMPTY,
            selector: 0,
            cycles: 0,
            enabled: config.enabled_at_boot,
            threshold: config.trigger_threshold,
        }
    }

    /// Drive the multiplexer to the scanner's current channel so hardware
    /// and state agree before the first poll.  Per-sensor input setup is
    /// the definition registry's job, not the scanner's.
    pub fn begin(&mut self, mux: &mut impl MultiplexController) {
        mux.select_channel(self.selector);
        info!("scanner: multiplexer reset to channel {}", self.selector);
    }

    /// Suspend or resume scanning.  While disabled, [`poll_once`] is a
    /// complete no-op and accumulated state is preserved.
    ///
    /// [`poll_once`]: SensorScanner::poll_once
    pub fn set_enable(&mut self, enabled: bool) {
        self.enabled = enabled;
        info!(
            "scanner: {}",
            if enabled { "enabled" } else { "suspended" }
        );
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Advance the scan by one multiplex step.
    ///
    /// Must be called on a regular cadence from the main loop; exactly one
    /// channel pair is sampled per call, and transition reports are
    /// flushed once per [`MUX_CHANNELS`] calls when the selector wraps.
    /// Passing `None` as the sink suppresses output while the state
    /// bookkeeping continues.
    ///
    /// The `hw` parameter satisfies **both** [`BankSampler`] and
    /// [`MultiplexController`] — this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn poll_once(
        &mut self,
        hw: &mut (impl BankSampler + MultiplexController),
        sink: Option<&mut dyn ReportSink>,
    ) {
        if !self.enabled {
            return;
        }

        let step = self.selector;
        self.cycles = self.cycles.wrapping_add(1);
        if step == 0 {
            self.cycles = 0;
            self.flush_transitions(sink);
        }

        let ab = hw.sample(Bank::AB);
        self.incoming
            .assign(Bank::AB.bit_offset() + step, ab > self.threshold);
        let cd = hw.sample(Bank::CD);
        self.incoming
            .assign(Bank::CD.bit_offset() + step, cd > self.threshold);

        self.selector = (step + 1) & (MUX_CHANNELS - 1);
        hw.select_channel(self.selector);
    }

    /// Dump the current raw state of every line, in ascending order,
    /// regardless of whether anything changed.  For diagnostics and
    /// initial sync with a newly attached listener.
    pub fn print_all(&self, sink: &mut dyn ReportSink) {
        for line in 0..LINE_COUNT {
            sink.report(ScanReport {
                line,
                state: LineState::from_triggered(self.incoming.is_set(line)),
            });
        }
    }

    // ── Report-cycle processing ───────────────────────────────

    fn flush_transitions(&mut self, sink: Option<&mut dyn ReportSink>) {
        let settled = !(self.incoming ^ self.verified);
        let pending = (self.verified ^ self.reported) & settled;

        if let Some(sink) = sink {
            for line in 0..LINE_COUNT {
                if pending.is_set(line) {
                    sink.report(ScanReport {
                        line,
                        state: LineState::from_triggered(self.verified.is_set(line)),
                    });
                }
            }
            if pending != SensorBits::EMPTY {
                debug!("scanner: {} transition(s) reported", pending.raw().count_ones());
            }
            // Only emitted changes count as delivered; a sink-less
            // boundary leaves them pending for a later sink-bearing poll.
            self.reported = self.reported ^ pending;
        }

        self.verified = self.incoming;
    }

    // ── Diagnostic accessors ──────────────────────────────────

    pub fn reported(&self) -> SensorBits {
        self.reported
    }

    pub fn verified(&self) -> SensorBits {
        self.verified
    }

    pub fn incoming(&self) -> SensorBits {
        self.incoming
    }

    pub fn selector(&self) -> u8 {
        self.selector
    }

    /// Polls since the last report cycle.  Kept for parity with the
    /// station's original counters; the selector wrap is what gates the
    /// report cycle.
    pub fn cycle_count(&self) -> u16 {
        self.cycles
    }
}
