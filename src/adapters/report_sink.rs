//! Report sink adapters.
//!
//! Render [`ScanReport`]s as the station's line protocol — `<Q n>` when a
//! line is triggered, `<q n>` when released — or mirror them into the
//! structured log.  A future command-bus adapter would implement the same
//! trait.

use core::fmt::Write;

use log::info;

use crate::app::events::ScanReport;
use crate::app::ports::ReportSink;

/// Writes protocol lines to any formatter-backed stream.
pub struct StreamReportSink<W: Write> {
    out: W,
}

impl<W: Write> StreamReportSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for StreamReportSink<W> {
    fn report(&mut self, report: ScanReport) {
        // The protocol has no error channel; a failed write drops the line
        // and the scanner keeps the change pending.
        let _ = writeln!(self.out, "<{} {}>", report.state.marker(), report.line);
    }
}

/// Adapter that mirrors every report into the serial console log.
pub struct LogReportSink;

impl LogReportSink {
    pub fn new() -> Self {
        Self
    }
}

impl ReportSink for LogReportSink {
    fn report(&mut self, report: ScanReport) {
        info!("<{} {}>", report.state.marker(), report.line);
    }
}

/// Stdout sink for the firmware binary (USB-CDC / UART console on target).
pub struct ConsoleReportSink;

impl ReportSink for ConsoleReportSink {
    fn report(&mut self, report: ScanReport) {
        println!("<{} {}>", report.state.marker(), report.line);
    }
}
