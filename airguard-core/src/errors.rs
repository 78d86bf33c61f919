//! Error Types for the Measurement Pipeline
//!
//! ## Design Philosophy
//!
//! Errors follow the same rules as the rest of the crate:
//!
//! 1. **Small Size**: every variant carries at most two `u16` fields.
//!
//! 2. **No Heap Allocation**: no `String` payloads, the errors are `Copy`.
//!
//! 3. **Undefined is not an error**: a divider voltage too close to zero is an
//!    ordinary outcome of the conversion and is modelled as `Option::None`
//!    (see [`crate::convert`]). Only hardware and configuration faults live
//!    here.
//!
//! ## Error Categories
//!
//! ### Sensor faults ([`SensorError`])
//! - `NoSamples`: an average over zero samples was requested
//! - `AdcRead`: the ADC driver reported a failure
//! - `RawOutOfRange`: the driver returned a count above the configured maximum
//! - `Output`: the status sink rejected a line
//!
//! ### Configuration faults ([`ConfigError`])
//! Raised by [`crate::CalibrationConfig::validate`] and
//! [`crate::ReportConfig::validate`] before any hardware is touched.
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use airguard_core::SensorError;
//!
//! fn describe(err: SensorError) -> &'static str {
//!     match err {
//!         SensorError::AdcRead => "check ADC wiring",
//!         SensorError::RawOutOfRange { .. } => "ADC resolution mismatch",
//!         SensorError::NoSamples => "sample count must be at least 1",
//!         SensorError::Output => "serial sink unavailable",
//!     }
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for sensor operations
pub type SensorResult<T> = Result<T, SensorError>;

/// Hardware and output faults
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Average requested over zero samples
    #[error("Sample count must be at least 1")]
    NoSamples,

    /// ADC driver failed to produce a conversion
    #[error("ADC read failed")]
    AdcRead,

    /// ADC returned a count above the configured full scale
    #[error("Raw count {raw} exceeds ADC maximum {max}")]
    RawOutOfRange {
        /// Count reported by the driver
        raw: u16,
        /// Configured full-scale count
        max: u16,
    },

    /// Status sink refused a write
    #[error("Failed to write status line")]
    Output,
}

impl From<core::fmt::Error> for SensorError {
    fn from(_: core::fmt::Error) -> Self {
        SensorError::Output
    }
}

/// Invalid configuration constants
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Reference voltage must be finite and > 0
    #[error("Reference voltage must be positive")]
    NonPositiveReference,

    /// ADC full-scale count must be > 0
    #[error("ADC maximum count must be positive")]
    ZeroAdcMax,

    /// Load resistor must be finite and > 0
    #[error("Load resistance must be positive")]
    NonPositiveLoad,

    /// Lower divider resistor must be > 0, upper must be >= 0
    #[error("Divider resistors must be positive")]
    NonPositiveDivider,

    /// Averaging needs at least one sample
    #[error("Sample count must be at least 1")]
    ZeroSampleCount,

    /// Calibration window must be longer than 0 ms
    #[error("Calibration window must be non-empty")]
    EmptyCalibrationWindow,

    /// Report interval must be longer than 0 ms
    #[error("Report interval must be non-zero")]
    ZeroReportInterval,
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::NoSamples => defmt::write!(fmt, "No samples requested"),
            Self::AdcRead => defmt::write!(fmt, "ADC read failed"),
            Self::RawOutOfRange { raw, max } => defmt::write!(fmt, "Raw {} > max {}", raw, max),
            Self::Output => defmt::write!(fmt, "Output write failed"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::NonPositiveReference => defmt::write!(fmt, "Vref <= 0"),
            Self::ZeroAdcMax => defmt::write!(fmt, "ADC max = 0"),
            Self::NonPositiveLoad => defmt::write!(fmt, "RL <= 0"),
            Self::NonPositiveDivider => defmt::write!(fmt, "Divider resistor <= 0"),
            Self::ZeroSampleCount => defmt::write!(fmt, "Sample count = 0"),
            Self::EmptyCalibrationWindow => defmt::write!(fmt, "Calibration window = 0"),
            Self::ZeroReportInterval => defmt::write!(fmt, "Report interval = 0"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_error_maps_to_output() {
        let err: SensorError = core::fmt::Error.into();
        assert_eq!(err, SensorError::Output);
    }

    #[test]
    fn errors_stay_small() {
        assert!(core::mem::size_of::<SensorError>() <= 8);
        assert!(core::mem::size_of::<ConfigError>() <= 1);
    }
}
