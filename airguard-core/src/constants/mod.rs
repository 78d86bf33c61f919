//! Constants for AirGuard Core
//!
//! Every board- and timing-specific number lives here, with its unit in the
//! name. [`crate::CalibrationConfig::default`] and
//! [`crate::ReportConfig::default`] are assembled from these values.
//!
//! ## Organization
//!
//! - **Board**: pin assignment, ADC and divider front end, load resistor
//! - **Sensor**: conversion guard band and health thresholds
//! - **Time**: sampling cadence and settling delays
//! - **Buffers**: fixed storage sizes
//!
//! ## Usage Guidelines
//!
//! 1. Use these constants instead of magic numbers
//! 2. Include the unit in the constant name
//! 3. Reference the schematic or datasheet where applicable

/// Pin assignment and analog front-end component values.
pub mod board;

/// Sensor conversion and health limits.
pub mod sensor;

/// Sampling cadence, settling delays and calibration window.
pub mod time;

/// Fixed storage sizes.
pub mod buffers;

// Re-export commonly used constants for convenience
pub use board::{
    ADC_MAX_COUNT, ANALOG_OUT_PIN, DIGITAL_OUT_PIN, DIVIDER_BOTTOM_OHMS, DIVIDER_TOP_OHMS,
    LOAD_RESISTANCE_OHMS, REFERENCE_VOLTAGE_V,
};

pub use sensor::{DISCONNECT_ZERO_CYCLES, VOLTAGE_EPSILON_V};

pub use time::{
    CALIBRATION_STEP_DELAY, CALIBRATION_WINDOW, REPORT_INTERVAL, SAMPLES_PER_AVERAGE,
    SAMPLE_SETTLE_DELAY, STARTUP_SETTLE_DELAY,
};

pub use buffers::STATUS_LINE_CAPACITY;
