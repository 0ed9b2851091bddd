//! RailSense Firmware — Main Entry Point
//!
//! Hexagonal architecture with a cooperative poll loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  GpioMultiplexer   AdcBankSampler    ConsoleReportSink   │
//! │  (MultiplexCtrl)   (BankSampler)     (ReportSink)        │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ──────────────────  │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │            ScanService (pure logic)                │  │
//! │  │  Scanner · Registry                                │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod app;
mod adapters;
pub mod config;
mod pins;
mod scan;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::{info, warn};

use esp_idf_hal::gpio::{OutputPin as _, PinDriver};
use esp_idf_hal::peripherals::Peripherals;

use adapters::adc::AdcBankSampler;
use adapters::hardware::{CarrierPinConfig, HardwareAdapter};
use adapters::mux::GpioMultiplexer;
use adapters::report_sink::ConsoleReportSink;
use app::service::ScanService;
use config::ScannerConfig;
use scan::{LINE_COUNT, SensorDef};

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("RailSense v{}", env!("CARGO_PKG_VERSION"));

    // Definition/config persistence is the station's concern; a
    // standalone scanner runs defaults with every carrier position
    // populated.
    let config = ScannerConfig::default();

    // ── 2. Construct adapters ─────────────────────────────────
    let peripherals = Peripherals::take()?;
    let hw_pins = peripherals.pins;

    // Select lines per the pin map (pins::MUX_S0_GPIO..MUX_S3_GPIO).
    let mux = GpioMultiplexer::new([
        PinDriver::output(hw_pins.gpio1.downgrade_output())?,
        PinDriver::output(hw_pins.gpio2.downgrade_output())?,
        PinDriver::output(hw_pins.gpio3.downgrade_output())?,
        PinDriver::output(hw_pins.gpio4.downgrade_output())?,
    ]);
    let adc = AdcBankSampler::new().map_err(|e| anyhow::anyhow!("ADC init failed: {e}"))?;
    let mut hw = HardwareAdapter::new(mux, adc);

    // ── 3. Construct scan service ─────────────────────────────
    let mut service = ScanService::new(&config);
    for line in 0..LINE_COUNT {
        if let Err(e) = service.registry_mut().define(SensorDef {
            id: u16::from(line),
            line,
            pullup: true,
        }) {
            warn!("definition for line {} rejected: {}", line, e);
        }
    }

    let mut pin_cfg = CarrierPinConfig;
    service.begin(&mut pin_cfg, &mut hw);

    // ── 4. Poll loop ──────────────────────────────────────────
    let mut sink = ConsoleReportSink;

    // Initial sync so listeners start from a known full state.
    service.print_all(&mut sink);

    info!("Scanner ready. Entering poll loop.");
    loop {
        service.poll(&mut hw, Some(&mut sink));
        std::thread::sleep(std::time::Duration::from_millis(u64::from(
            config.poll_interval_ms,
        )));
    }
}
