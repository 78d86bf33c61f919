//! Measurement and reporting configuration
//!
//! Both structs default to the board constants in [`crate::constants`] and
//! can be adjusted with `with_*` builders for a different front end. Nothing
//! is read at runtime; call `validate()` once at startup.
//!
//! ```rust
//! use airguard_core::CalibrationConfig;
//!
//! // Breakout with a 1 kΩ load resistor and no divider
//! let config = CalibrationConfig::default()
//!     .with_load_resistance(1_000.0)
//!     .with_divider(0.0, 1.0);
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.divider_gain(), 1.0);
//! ```

use fugit::{MillisDurationU32, MillisDurationU64};

use crate::{
    constants::{
        ADC_MAX_COUNT, CALIBRATION_STEP_DELAY, CALIBRATION_WINDOW, DISCONNECT_ZERO_CYCLES,
        DIVIDER_BOTTOM_OHMS, DIVIDER_TOP_OHMS, LOAD_RESISTANCE_OHMS, REFERENCE_VOLTAGE_V,
        REPORT_INTERVAL, SAMPLES_PER_AVERAGE, SAMPLE_SETTLE_DELAY, STARTUP_SETTLE_DELAY,
    },
    errors::ConfigError,
};

/// Analog front end and averaging parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationConfig {
    /// ADC reference voltage (V)
    pub reference_voltage: f32,

    /// ADC full-scale count
    pub adc_max: u16,

    /// Load resistor RL on the sensor module (Ω)
    pub load_resistance: f32,

    /// Divider resistor between AO and the ADC pin (Ω)
    pub divider_top: f32,

    /// Divider resistor between the ADC pin and ground (Ω)
    pub divider_bottom: f32,

    /// Raw reads per averaged reading
    pub sample_count: u16,

    /// Delay after every raw read
    pub settle_delay: MillisDurationU32,

    /// Delay between averaged readings during calibration
    pub calibration_step_delay: MillisDurationU32,

    /// Length of the calibration window
    pub calibration_window: MillisDurationU64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            reference_voltage: REFERENCE_VOLTAGE_V,
            adc_max: ADC_MAX_COUNT,
            load_resistance: LOAD_RESISTANCE_OHMS,
            divider_top: DIVIDER_TOP_OHMS,
            divider_bottom: DIVIDER_BOTTOM_OHMS,
            sample_count: SAMPLES_PER_AVERAGE,
            settle_delay: SAMPLE_SETTLE_DELAY,
            calibration_step_delay: CALIBRATION_STEP_DELAY,
            calibration_window: CALIBRATION_WINDOW,
        }
    }
}

impl CalibrationConfig {
    /// Override the ADC reference and resolution
    pub fn with_adc(mut self, reference_voltage: f32, adc_max: u16) -> Self {
        self.reference_voltage = reference_voltage;
        self.adc_max = adc_max;
        self
    }

    /// Override the module's load resistor
    pub fn with_load_resistance(mut self, ohms: f32) -> Self {
        self.load_resistance = ohms;
        self
    }

    /// Override the divider; `(0.0, r)` describes a direct connection
    pub fn with_divider(mut self, top: f32, bottom: f32) -> Self {
        self.divider_top = top;
        self.divider_bottom = bottom;
        self
    }

    /// Override averaging: sample count and per-sample settle delay
    pub fn with_sampling(mut self, sample_count: u16, settle_delay: MillisDurationU32) -> Self {
        self.sample_count = sample_count;
        self.settle_delay = settle_delay;
        self
    }

    /// Override the calibration window and the delay between its readings
    pub fn with_calibration(
        mut self,
        window: MillisDurationU64,
        step_delay: MillisDurationU32,
    ) -> Self {
        self.calibration_window = window;
        self.calibration_step_delay = step_delay;
        self
    }

    /// Check the invariants every conversion relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.reference_voltage.is_finite() && self.reference_voltage > 0.0) {
            return Err(ConfigError::NonPositiveReference);
        }
        if self.adc_max == 0 {
            return Err(ConfigError::ZeroAdcMax);
        }
        if !(self.load_resistance.is_finite() && self.load_resistance > 0.0) {
            return Err(ConfigError::NonPositiveLoad);
        }
        // R1 may be zero (no divider), R2 may not: the gain divides by it.
        if !(self.divider_top.is_finite() && self.divider_top >= 0.0) {
            return Err(ConfigError::NonPositiveDivider);
        }
        if !(self.divider_bottom.is_finite() && self.divider_bottom > 0.0) {
            return Err(ConfigError::NonPositiveDivider);
        }
        if self.sample_count == 0 {
            return Err(ConfigError::ZeroSampleCount);
        }
        if self.calibration_window.to_millis() == 0 {
            return Err(ConfigError::EmptyCalibrationWindow);
        }
        Ok(())
    }

    /// Divider gain `(R1 + R2) / R2`
    pub fn divider_gain(&self) -> f32 {
        (self.divider_top + self.divider_bottom) / self.divider_bottom
    }

    /// Sensor output voltage at ADC full scale (V)
    ///
    /// This is the supply side of the sensor/load divider as seen through the
    /// front end, `Vref * gain`.
    pub fn full_scale_voltage(&self) -> f32 {
        self.reference_voltage * self.divider_gain()
    }
}

/// Reporting loop parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfig {
    /// Interval between status lines
    pub interval: MillisDurationU64,

    /// Run the clean-air calibration on first activation
    pub calibrate_on_start: bool,

    /// Delay before the startup banner
    pub startup_delay: MillisDurationU32,

    /// Zero-count cycles in a row before flagging a disconnected sensor, 0 disables
    pub disconnect_after: u16,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            interval: REPORT_INTERVAL,
            calibrate_on_start: true,
            startup_delay: STARTUP_SETTLE_DELAY,
            disconnect_after: DISCONNECT_ZERO_CYCLES,
        }
    }
}

impl ReportConfig {
    /// Override the report interval
    pub fn with_interval(mut self, interval: MillisDurationU64) -> Self {
        self.interval = interval;
        self
    }

    /// Enable or disable the startup calibration
    pub fn with_calibration(mut self, enabled: bool) -> Self {
        self.calibrate_on_start = enabled;
        self
    }

    /// Override the disconnect threshold
    pub fn with_disconnect_after(mut self, cycles: u16) -> Self {
        self.disconnect_after = cycles;
        self
    }

    /// Check the reporting invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval.to_millis() == 0 {
            return Err(ConfigError::ZeroReportInterval);
        }
        Ok(())
    }
}
