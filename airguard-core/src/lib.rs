//! Core measurement pipeline for AirGuard
//!
//! Reads an MQ-135 class gas sensor through a resistive divider, estimates the
//! sensor resistance, calibrates a clean-air baseline (R0) and reports the
//! Rs/R0 ratio alongside the module's digital threshold output.
//!
//! Key constraints:
//! - Runs on small MCUs (ESP32-C3, RP2040 class)
//! - No heap allocation anywhere
//! - Single-threaded, blocking calibration
//!
//! ```no_run
//! use airguard_core::{convert, CalibrationConfig};
//!
//! let config = CalibrationConfig::default();
//!
//! let volts = convert::voltage_from_raw(2048, &config);
//! match convert::resistance_from_voltage(volts, &config) {
//!     Some(rs) => {}, // Usable estimate
//!     None => {},     // Divider output too close to 0 V
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod calibration;
pub mod config;
pub mod constants;
pub mod convert;
pub mod errors;
pub mod reporter;
pub mod sampler;
pub mod schedule;
pub mod status;
pub mod time;
pub mod traits;

// Public API
pub use calibration::{calibrate_baseline, BaselineAccumulator, CalibrationReport};
pub use config::{CalibrationConfig, ReportConfig};
pub use errors::{ConfigError, SensorError, SensorResult};
pub use reporter::{Reporter, ReporterState};
pub use sampler::read_average_adc;
pub use schedule::Cadence;
pub use status::{SensorStatus, StatusLine};
pub use time::{TimeSource, Timestamp};
pub use traits::AnalogInput;

/// Crate version, logged when the reporter starts
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
