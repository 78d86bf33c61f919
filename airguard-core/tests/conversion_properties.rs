//! Property tests for the conversion chain

use airguard_core::{
    constants::VOLTAGE_EPSILON_V, convert, CalibrationConfig, SensorStatus,
};
use proptest::prelude::*;

fn config() -> CalibrationConfig {
    CalibrationConfig::default()
}

proptest! {
    #[test]
    fn voltage_is_monotonic(a in 0u16..=4095, b in 0u16..=4095) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let config = config();
        prop_assert!(convert::voltage_from_raw(lo, &config) <= convert::voltage_from_raw(hi, &config));
    }

    #[test]
    fn resistance_undefined_near_zero(volts in -10.0f32..=VOLTAGE_EPSILON_V) {
        prop_assert_eq!(convert::resistance_from_voltage(volts, &config()), None);
    }

    #[test]
    fn resistance_positive_below_full_scale(fraction in 0.001f32..0.999) {
        let config = config();
        let volts = config.full_scale_voltage() * fraction;
        prop_assume!(volts > VOLTAGE_EPSILON_V);

        let rs = convert::resistance_from_voltage(volts, &config).unwrap();
        prop_assert!(rs.is_finite());
        prop_assert!(rs > 0.0);
    }

    #[test]
    fn resistance_falls_as_voltage_rises(a in 1u16..=4095, b in 1u16..=4095) {
        prop_assume!(a < b);
        let config = config();
        let ra = convert::resistance_from_raw(a, &config).unwrap();
        let rb = convert::resistance_from_raw(b, &config).unwrap();
        prop_assert!(ra >= rb);
    }

    #[test]
    fn conversion_is_deterministic(raw in any::<u16>()) {
        let config = config();
        let first = convert::resistance_from_raw(raw, &config).map(f32::to_bits);
        let second = convert::resistance_from_raw(raw, &config).map(f32::to_bits);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn ratio_defined_only_for_finite_inputs(
        rs in prop::option::of(any::<f32>()),
        r0 in prop::option::of(any::<f32>()),
    ) {
        match convert::resistance_ratio(rs, r0) {
            Some(ratio) => {
                prop_assert!(ratio.is_finite());
                prop_assert!(rs.unwrap().is_finite() && r0.unwrap().is_finite());
            }
            None => {
                let defined = matches!((rs, r0), (Some(a), Some(b))
                    if a.is_finite() && b.is_finite() && (a / b).is_finite());
                prop_assert!(!defined);
            }
        }
    }

    #[test]
    fn every_status_line_fits(raw in any::<u16>(), r0 in prop::option::of(1.0f32..1.0e9), level in any::<bool>()) {
        let status = SensorStatus::from_raw(raw, r0, level, &config());
        let line = status.render().unwrap();

        let expected_suffix = if level { "DO=1" } else { "DO=0" };
        prop_assert!(line.starts_with("RAW="));
        prop_assert!(line.ends_with(expected_suffix));
        prop_assert_eq!(status.is_valid(), !line.contains("INVALID READ"));
    }
}
