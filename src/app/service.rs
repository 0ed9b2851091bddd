//! Scan service — the hexagonal core.
//!
//! [`ScanService`] owns the scanner and the definition registry and
//! orchestrates startup and polling.  All I/O flows through port traits
//! injected at call sites, making the whole service testable with mock
//! adapters.
//!
//! ```text
//!  BankSampler ──▶ ┌──────────────────────────┐ ──▶ ReportSink
//!                  │       ScanService         │
//!  MultiplexCtrl ◀─│  Scanner · Registry       │
//!                  └──────────────────────────┘
//! ```

use log::info;

use crate::config::ScannerConfig;
use crate::scan::{SensorRegistry, SensorScanner};

use super::ports::{BankSampler, MultiplexController, PinConfig, ReportSink};

/// Owns the scan state machine and the sensor definition table.
pub struct ScanService {
    scanner: SensorScanner,
    registry: SensorRegistry,
}

impl ScanService {
    pub fn new(config: &ScannerConfig) -> Self {
        Self {
            scanner: SensorScanner::new(config),
            registry: SensorRegistry::new(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Configure every defined input and park the multiplexer on its base
    /// channel.  Call once before entering the poll loop.
    pub fn begin(&mut self, pins: &mut impl PinConfig, mux: &mut impl MultiplexController) {
        self.registry.configure_pins(pins);
        self.scanner.begin(mux);
        info!(
            "scan service ready ({} sensor definition(s))",
            self.registry.len()
        );
    }

    pub fn set_enable(&mut self, enabled: bool) {
        self.scanner.set_enable(enabled);
    }

    pub fn is_enabled(&self) -> bool {
        self.scanner.is_enabled()
    }

    // ── Polling ───────────────────────────────────────────────

    /// One multiplex step; see [`SensorScanner::poll_once`].
    pub fn poll(
        &mut self,
        hw: &mut (impl BankSampler + MultiplexController),
        sink: Option<&mut dyn ReportSink>,
    ) {
        self.scanner.poll_once(hw, sink);
    }

    /// Full-state dump; see [`SensorScanner::print_all`].
    pub fn print_all(&self, sink: &mut dyn ReportSink) {
        self.scanner.print_all(sink);
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn scanner(&self) -> &SensorScanner {
        &self.scanner
    }

    pub fn registry(&self) -> &SensorRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut SensorRegistry {
        &mut self.registry
    }
}
