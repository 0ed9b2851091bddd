//! Scanner configuration parameters
//!
//! All tunable parameters for the RailSense scanner.  Values can be
//! overridden by whatever persistence layer the surrounding station
//! firmware provides.

use serde::{Deserialize, Serialize};

/// Core scanner configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerConfig {
    // --- Detection ---
    /// ADC reading (0–1023 scale) above which a line counts as triggered.
    pub trigger_threshold: u16,

    // --- Lifecycle ---
    /// Whether scanning starts enabled at boot.
    pub enabled_at_boot: bool,

    // --- Timing ---
    /// Poll cadence of the main loop (milliseconds per multiplex step).
    pub poll_interval_ms: u32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            // Detection
            trigger_threshold: 200,

            // Lifecycle
            enabled_at_boot: true,

            // Timing
            poll_interval_ms: 2, // full 16-step report cycle every 32 ms
        }
    }
}
