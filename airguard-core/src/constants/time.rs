//! Sampling Cadence and Settling Delays
//!
//! Durations are `fugit` millisecond types so they can be built in `const`
//! context and carried through the config without unit confusion.

use fugit::{MillisDurationU32, MillisDurationU64};

/// Interval between status lines.
pub const REPORT_INTERVAL: MillisDurationU64 = MillisDurationU64::millis(1000);

/// Raw ADC reads averaged per reading.
pub const SAMPLES_PER_AVERAGE: u16 = 10;

/// Delay after each raw ADC read, lets the sample-and-hold settle.
pub const SAMPLE_SETTLE_DELAY: MillisDurationU32 = MillisDurationU32::millis(10);

/// Delay between averaged readings while calibrating.
///
/// Longer than [`SAMPLE_SETTLE_DELAY`]: gives the sensor element time to
/// respond between averaging windows.
pub const CALIBRATION_STEP_DELAY: MillisDurationU32 = MillisDurationU32::millis(200);

/// Length of the clean-air calibration window.
pub const CALIBRATION_WINDOW: MillisDurationU64 = MillisDurationU64::millis(10_000);

/// Delay after pin setup before the banner is printed.
pub const STARTUP_SETTLE_DELAY: MillisDurationU32 = MillisDurationU32::millis(200);
