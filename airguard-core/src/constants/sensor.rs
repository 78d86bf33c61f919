//! Sensor Conversion and Health Limits

/// Smallest divider voltage treated as a real reading (V).
///
/// At or below this the divider inversion divides by (almost) zero, so the
/// resistance is reported as undefined instead.
pub const VOLTAGE_EPSILON_V: f32 = 1e-4;

/// Consecutive zero-count report cycles before the sensor is flagged as
/// disconnected.
///
/// A heated MQ-135 in clean air never pulls AO all the way to ground; five
/// seconds of flat zeros at the default cadence means a broken wire or an
/// unpowered heater.
pub const DISCONNECT_ZERO_CYCLES: u16 = 5;
