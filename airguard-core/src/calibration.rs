//! Clean-air baseline (R0) calibration
//!
//! ## Procedure
//!
//! With the sensor warmed up and sitting in clean air, take averaged readings
//! back to back for a fixed window (10 s by default) and average every
//! resistance that came out finite. That mean is R0, the denominator of every
//! later Rs/R0 ratio.
//!
//! ```text
//! start ─┬─ burst (10 × 10 ms) ─ step delay (200 ms) ─┬─ ... ─┬─ window elapsed
//!        └──────────── one iteration ≈ 300 ms ────────┘       └─ mean of finite Rs
//! ```
//!
//! ## Rejections
//!
//! Readings are dropped, not retried:
//! - resistance undefined (divider voltage at or near 0 V)
//! - resistance not finite
//! - ADC faults (counted separately)
//!
//! If nothing was accepted during the whole window the baseline is `None`;
//! callers proceed without a ratio rather than halting.
//!
//! ## Blocking
//!
//! [`calibrate_baseline`] runs the whole window before returning and cannot
//! be interrupted. For a 10 s window that is intended: nothing else happens
//! on the device until R0 is known.

use embedded_hal::delay::DelayNs;

use crate::{
    config::CalibrationConfig,
    convert,
    errors::SensorError,
    sampler::read_average_adc,
    time::{elapsed_ms, TimeSource},
    traits::AnalogInput,
};

/// Running mean of finite resistance readings
///
/// Sums in `f64` so a long window of large resistances does not lose the
/// low digits.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BaselineAccumulator {
    sum: f64,
    accepted: u32,
    rejected: u32,
}

impl BaselineAccumulator {
    /// Empty accumulator
    pub const fn new() -> Self {
        Self {
            sum: 0.0,
            accepted: 0,
            rejected: 0,
        }
    }

    /// Add one reading; undefined or non-finite values are counted and dropped
    ///
    /// Returns `true` if the reading was accepted.
    pub fn push(&mut self, resistance: Option<f32>) -> bool {
        match resistance {
            Some(rs) if rs.is_finite() => {
                self.sum += f64::from(rs);
                self.accepted += 1;
                true
            }
            _ => {
                self.rejected += 1;
                false
            }
        }
    }

    /// Readings that went into the mean
    pub fn accepted(&self) -> u32 {
        self.accepted
    }

    /// Readings dropped as undefined or non-finite
    pub fn rejected(&self) -> u32 {
        self.rejected
    }

    /// Arithmetic mean of accepted readings, `None` if there were none
    pub fn mean(&self) -> Option<f32> {
        if self.accepted == 0 {
            return None;
        }
        Some((self.sum / f64::from(self.accepted)) as f32)
    }
}

/// Outcome of one calibration window
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationReport {
    /// Mean resistance of accepted readings (Ω), `None` if none were accepted
    pub baseline: Option<f32>,

    /// Readings included in the mean
    pub accepted: u32,

    /// Readings with an undefined or non-finite resistance
    pub rejected: u32,

    /// Bursts abandoned because the ADC failed
    pub adc_faults: u32,

    /// Readings whose averaged count was exactly 0
    pub zero_counts: u32,

    /// Iterations run inside the window
    pub iterations: u32,
}

impl CalibrationReport {
    /// Whether a baseline was established
    pub fn succeeded(&self) -> bool {
        self.baseline.is_some()
    }

    /// No reading in the window ever rose above 0 V
    ///
    /// Distinguishes an unplugged or unpowered sensor from one that returned
    /// a mix of usable and unusable readings.
    pub fn looks_disconnected(&self) -> bool {
        self.accepted == 0
            && self.iterations > 0
            && self.zero_counts + self.adc_faults == self.iterations
    }
}

/// Measure R0 over `config.calibration_window`
///
/// Loops while the clock shows less than the window elapsed: averaged read,
/// conversion, accumulation, then `config.calibration_step_delay`. The clock
/// must advance with the delays, a frozen clock never ends the window.
pub fn calibrate_baseline<A, D, T>(
    adc: &mut A,
    delay: &mut D,
    clock: &T,
    config: &CalibrationConfig,
) -> CalibrationReport
where
    A: AnalogInput,
    D: DelayNs,
    T: TimeSource + ?Sized,
{
    let window_ms = config.calibration_window.to_millis();
    let start = clock.now();

    let mut acc = BaselineAccumulator::new();
    let mut adc_faults = 0u32;
    let mut zero_counts = 0u32;
    let mut iterations = 0u32;

    log_debug!("Calibration window {} ms started at {}", window_ms, start);

    while elapsed_ms(clock, start) < window_ms {
        iterations += 1;

        match read_average_adc(
            adc,
            delay,
            config.sample_count,
            config.settle_delay,
            config.adc_max,
        ) {
            Ok(raw) => {
                if raw == 0 {
                    zero_counts += 1;
                }
                acc.push(convert::resistance_from_raw(raw, config));
            }
            Err(SensorError::NoSamples) => {
                // Configuration problem, not a hardware one: no later
                // iteration can succeed either.
                log_error!("Calibration aborted: sample count is 0");
                break;
            }
            Err(_) => adc_faults += 1,
        }

        delay.delay_ms(config.calibration_step_delay.to_millis());
    }

    let report = CalibrationReport {
        baseline: acc.mean(),
        accepted: acc.accepted(),
        rejected: acc.rejected(),
        adc_faults,
        zero_counts,
        iterations,
    };

    log_info!(
        "Calibration finished: {} accepted, {} rejected, {} ADC faults",
        report.accepted,
        report.rejected,
        report.adc_faults
    );

    report
}
