//! Board Wiring and Front-End Component Values
//!
//! Target board: ESP32-C3 with an MQ-135 breakout. The module's AO output is
//! scaled down by a resistive divider before it reaches the ADC pin:
//!
//! ```text
//!   AO ──┬── R1 (9.87 kΩ) ──┬── ADC pin
//!        │                  │
//!   (sensor + RL)       R2 (19.68 kΩ)
//!                           │
//!                          GND
//! ```
//!
//! The divider attenuates by `R2 / (R1 + R2)`, so converting back to sensor
//! voltage multiplies by the gain `(R1 + R2) / R2`.

// ===== PIN ASSIGNMENT =====

/// GPIO carrying the sensor's analog output (through the divider).
pub const ANALOG_OUT_PIN: u8 = 4;

/// GPIO carrying the module's comparator (threshold) output.
pub const DIGITAL_OUT_PIN: u8 = 10;

// ===== ADC =====

/// ADC reference voltage (V).
///
/// Full-scale input of the ESP32-C3 ADC at 11 dB attenuation, as wired.
pub const REFERENCE_VOLTAGE_V: f32 = 3.3;

/// ADC full-scale count for 12-bit resolution.
pub const ADC_MAX_COUNT: u16 = 4095;

// ===== DIVIDER AND LOAD =====

/// Load resistor RL on the sensor module (Ω).
///
/// Most MQ-135 breakouts ship with 10 kΩ; some use 1 kΩ or 20 kΩ.
pub const LOAD_RESISTANCE_OHMS: f32 = 10_000.0;

/// Upper divider resistor R1, between AO and the ADC pin (Ω, measured).
pub const DIVIDER_TOP_OHMS: f32 = 9_870.0;

/// Lower divider resistor R2, between the ADC pin and ground (Ω, measured).
pub const DIVIDER_BOTTOM_OHMS: f32 = 19_680.0;
