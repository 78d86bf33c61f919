//! ADC Count → Voltage → Sensor Resistance
//!
//! ## The measurement chain
//!
//! The MQ-135 element (Rs) and the module's load resistor (RL) form a divider
//! across the supply; AO is the voltage over RL. That voltage then passes the
//! board's attenuating divider (R1/R2) before it reaches the ADC:
//!
//! ```text
//!   Vc ── Rs ──┬── RL ── GND          Vout = Vc · RL / (Rs + RL)
//!              │
//!              AO ── R1 ──┬── ADC     Vadc = Vout · R2 / (R1 + R2)
//!                         R2
//!                         │
//!                        GND
//! ```
//!
//! Working backwards from a count:
//!
//! ```text
//! Vout = raw · Vref / ADCmax · gain          gain = (R1 + R2) / R2
//! Rs   = (Vref · gain − Vout) · RL / Vout
//! ```
//!
//! `Vref · gain` stands in for the supply `Vc`, the AO voltage that maps to
//! ADC full scale.
//!
//! ## Undefined readings
//!
//! As `Vout → 0` the inversion divides by (almost) zero. At or below
//! [`VOLTAGE_EPSILON_V`] the resistance is `None`. Above the supply the
//! result turns negative; that value is passed through unclamped and callers
//! aggregating readings filter on their own terms.
//!
//! All functions here are pure and allocation free.

use crate::{config::CalibrationConfig, constants::VOLTAGE_EPSILON_V};

/// Divider output voltage for a raw ADC count (V)
///
/// Monotonic non-decreasing in `raw`, exactly 0.0 at `raw == 0`.
pub fn voltage_from_raw(raw: u16, config: &CalibrationConfig) -> f32 {
    (raw as f32 * config.reference_voltage / config.adc_max as f32) * config.divider_gain()
}

/// Sensor resistance for a divider output voltage (Ω)
///
/// Returns `None` when `volts` is at or below [`VOLTAGE_EPSILON_V`] or is NaN.
///
/// ```rust
/// use airguard_core::{convert, CalibrationConfig};
///
/// let config = CalibrationConfig::default();
/// assert_eq!(convert::resistance_from_voltage(0.0, &config), None);
///
/// // Half of full scale: Rs == RL
/// let half = config.full_scale_voltage() / 2.0;
/// let rs = convert::resistance_from_voltage(half, &config).unwrap();
/// assert!((rs - 10_000.0).abs() < 0.5);
/// ```
pub fn resistance_from_voltage(volts: f32, config: &CalibrationConfig) -> Option<f32> {
    if volts.is_nan() || volts <= VOLTAGE_EPSILON_V {
        return None;
    }

    Some((config.full_scale_voltage() - volts) * config.load_resistance / volts)
}

/// [`voltage_from_raw`] followed by [`resistance_from_voltage`]
pub fn resistance_from_raw(raw: u16, config: &CalibrationConfig) -> Option<f32> {
    resistance_from_voltage(voltage_from_raw(raw, config), config)
}

/// Rs/R0 ratio
///
/// `None` if either side is missing or non-finite, or if the quotient itself
/// is not finite (R0 of zero). Otherwise the plain quotient, no clamping.
pub fn resistance_ratio(resistance: Option<f32>, baseline: Option<f32>) -> Option<f32> {
    let rs = resistance.filter(|v| v.is_finite())?;
    let r0 = baseline.filter(|v| v.is_finite())?;

    let ratio = rs / r0;
    ratio.is_finite().then_some(ratio)
}
