//! Per-cycle sensor status and its line format
//!
//! One [`SensorStatus`] is built per report cycle and rendered as one text
//! line. Two shapes:
//!
//! ```text
//! RAW=2048 V=2.478V Rs=9995.1ohm Rratio=1.000 DO=0
//! RAW=0 INVALID READ Rs=NAN Rratio=NAN DO=1
//! ```
//!
//! The first is used whenever the resistance is defined. When R0 is missing
//! (calibration failed or disabled) the ratio field of a valid line prints as
//! `Rratio=NAN`. Lines are rendered into a fixed [`StatusLine`], never the
//! heap.

use core::fmt::{self, Write};

use crate::{
    config::CalibrationConfig,
    constants::STATUS_LINE_CAPACITY,
    convert,
};

/// Fixed-capacity buffer holding one rendered line (without newline)
pub type StatusLine = heapless::String<STATUS_LINE_CAPACITY>;

/// Snapshot of one report cycle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorStatus {
    /// Averaged ADC count
    pub raw: u16,

    /// Divider output voltage (V)
    pub voltage: f32,

    /// Sensor resistance (Ω), `None` when the voltage was too low to invert
    pub resistance: Option<f32>,

    /// Rs/R0, `None` when either side is undefined
    pub ratio: Option<f32>,

    /// Level of the module's comparator output
    pub threshold: bool,
}

impl SensorStatus {
    /// Run the conversion chain for one averaged count
    pub fn from_raw(
        raw: u16,
        baseline: Option<f32>,
        threshold: bool,
        config: &CalibrationConfig,
    ) -> Self {
        let voltage = convert::voltage_from_raw(raw, config);
        let resistance = convert::resistance_from_voltage(voltage, config);

        Self {
            raw,
            voltage,
            resistance,
            ratio: convert::resistance_ratio(resistance, baseline),
            threshold,
        }
    }

    /// Whether this cycle produced a usable resistance
    pub fn is_valid(&self) -> bool {
        self.voltage.is_finite() && self.resistance.is_some()
    }

    /// Render into a fixed buffer
    pub fn render(&self) -> Result<StatusLine, fmt::Error> {
        let mut line = StatusLine::new();
        write!(line, "{}", self)?;
        Ok(line)
    }
}

impl fmt::Display for SensorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = u8::from(self.threshold);

        match self.resistance {
            Some(rs) if self.voltage.is_finite() => {
                write!(f, "RAW={} V={:.3}V Rs={:.1}ohm ", self.raw, self.voltage, rs)?;
                match self.ratio {
                    Some(ratio) => write!(f, "Rratio={:.3}", ratio)?,
                    None => f.write_str("Rratio=NAN")?,
                }
                write!(f, " DO={}", level)
            }
            _ => write!(
                f,
                "RAW={} INVALID READ Rs=NAN Rratio=NAN DO={}",
                self.raw, level
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CalibrationConfig {
        CalibrationConfig::default()
    }

    #[test]
    fn zero_count_renders_invalid() {
        let status = SensorStatus::from_raw(0, Some(10_000.0), false, &config());

        assert!(!status.is_valid());
        assert_eq!(status.voltage, 0.0);
        assert_eq!(status.resistance, None);
        assert_eq!(status.ratio, None);
        assert_eq!(
            status.render().unwrap().as_str(),
            "RAW=0 INVALID READ Rs=NAN Rratio=NAN DO=0"
        );
    }

    #[test]
    fn valid_line_format() {
        let status = SensorStatus::from_raw(2048, Some(9_995.117), true, &config());

        assert!(status.is_valid());
        assert_eq!(
            status.render().unwrap().as_str(),
            "RAW=2048 V=2.478V Rs=9995.1ohm Rratio=1.000 DO=1"
        );
    }

    #[test]
    fn missing_baseline_prints_nan_ratio() {
        let status = SensorStatus::from_raw(1000, None, false, &config());

        assert!(status.is_valid());
        assert_eq!(status.ratio, None);
        assert_eq!(
            status.render().unwrap().as_str(),
            "RAW=1000 V=1.210V Rs=30950.0ohm Rratio=NAN DO=0"
        );
    }

    #[test]
    fn extreme_values_fit_the_buffer() {
        let status = SensorStatus {
            raw: u16::MAX,
            voltage: f32::MAX,
            resistance: Some(-f32::MAX),
            ratio: Some(f32::MAX),
            threshold: true,
        };
        let line = status.render().unwrap();
        assert!(line.starts_with("RAW=65535 V="));
        assert!(line.ends_with("DO=1"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_undefined_as_null() {
        let status = SensorStatus::from_raw(0, None, true, &config());
        let json = serde_json::to_value(status).unwrap();

        assert_eq!(json["raw"], 0);
        assert!(json["resistance"].is_null());
        assert!(json["ratio"].is_null());
        assert_eq!(json["threshold"], true);
    }
}
