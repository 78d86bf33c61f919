//! Averaged ADC reads
//!
//! MQ-135 output is noisy at the LSB level, so every reading is the truncated
//! mean of a short burst of conversions with a settle delay after each one.
//! The burst blocks for `sample_count × settle`.

use embedded_hal::delay::DelayNs;
use fugit::MillisDurationU32;

use crate::{
    errors::{SensorError, SensorResult},
    traits::AnalogInput,
};

/// Integer mean of `sample_count` raw reads
///
/// Errors:
/// - [`SensorError::NoSamples`] if `sample_count` is 0
/// - [`SensorError::AdcRead`] if any conversion fails; the burst is abandoned
/// - [`SensorError::RawOutOfRange`] if a count exceeds `adc_max`
pub fn read_average_adc<A, D>(
    adc: &mut A,
    delay: &mut D,
    sample_count: u16,
    settle: MillisDurationU32,
    adc_max: u16,
) -> SensorResult<u16>
where
    A: AnalogInput,
    D: DelayNs,
{
    if sample_count == 0 {
        return Err(SensorError::NoSamples);
    }

    // u16::MAX * u16::MAX fits in u32
    let mut sum: u32 = 0;
    for _ in 0..sample_count {
        let raw = match nb::block!(adc.read_raw()) {
            Ok(raw) => raw,
            Err(_e) => {
                #[cfg(feature = "log")]
                log::debug!("ADC driver error: {:?}", _e);
                return Err(SensorError::AdcRead);
            }
        };

        if raw > adc_max {
            return Err(SensorError::RawOutOfRange { raw, max: adc_max });
        }

        sum += u32::from(raw);
        delay.delay_ms(settle.to_millis());
    }

    // Mean of values <= adc_max is itself <= adc_max
    Ok((sum / u32::from(sample_count)) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    struct Sequence<'a> {
        values: &'a [u16],
        pos: usize,
    }

    impl AnalogInput for Sequence<'_> {
        type Error = Infallible;

        fn read_raw(&mut self) -> nb::Result<u16, Self::Error> {
            let value = self.values[self.pos % self.values.len()];
            self.pos += 1;
            Ok(value)
        }
    }

    /// Needs two polls per conversion
    struct Slow {
        value: u16,
        ready: bool,
    }

    impl AnalogInput for Slow {
        type Error = Infallible;

        fn read_raw(&mut self) -> nb::Result<u16, Self::Error> {
            self.ready = !self.ready;
            if self.ready {
                Err(nb::Error::WouldBlock)
            } else {
                Ok(self.value)
            }
        }
    }

    struct Broken;

    impl AnalogInput for Broken {
        type Error = ();

        fn read_raw(&mut self) -> nb::Result<u16, Self::Error> {
            Err(nb::Error::Other(()))
        }
    }

    #[derive(Default)]
    struct CountingDelay {
        total_ns: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    const SETTLE: MillisDurationU32 = MillisDurationU32::millis(10);

    #[test]
    fn truncates_mean() {
        let mut adc = Sequence { values: &[100, 101], pos: 0 };
        let mut delay = CountingDelay::default();

        // (100 + 101 + 100) / 3 = 100.33
        let avg = read_average_adc(&mut adc, &mut delay, 3, SETTLE, 4095).unwrap();
        assert_eq!(avg, 100);
        assert_eq!(adc.pos, 3);
    }

    #[test]
    fn blocks_for_each_sample() {
        let mut adc = Sequence { values: &[2048], pos: 0 };
        let mut delay = CountingDelay::default();

        read_average_adc(&mut adc, &mut delay, 10, SETTLE, 4095).unwrap();
        assert_eq!(delay.total_ns, 100 * 1_000_000);
    }

    #[test]
    fn zero_samples_rejected() {
        let mut adc = Sequence { values: &[2048], pos: 0 };
        let mut delay = CountingDelay::default();

        let result = read_average_adc(&mut adc, &mut delay, 0, SETTLE, 4095);
        assert_eq!(result, Err(SensorError::NoSamples));
        assert_eq!(adc.pos, 0);
    }

    #[test]
    fn waits_out_would_block() {
        let mut adc = Slow { value: 777, ready: false };
        let mut delay = CountingDelay::default();

        let avg = read_average_adc(&mut adc, &mut delay, 4, SETTLE, 4095).unwrap();
        assert_eq!(avg, 777);
    }

    #[test]
    fn driver_failure_is_not_a_low_reading() {
        let mut delay = CountingDelay::default();

        let result = read_average_adc(&mut Broken, &mut delay, 10, SETTLE, 4095);
        assert_eq!(result, Err(SensorError::AdcRead));
    }

    #[test]
    fn count_above_full_scale_rejected() {
        let mut adc = Sequence { values: &[4096], pos: 0 };
        let mut delay = CountingDelay::default();

        let result = read_average_adc(&mut adc, &mut delay, 10, SETTLE, 4095);
        assert_eq!(result, Err(SensorError::RawOutOfRange { raw: 4096, max: 4095 }));
    }

    #[test]
    fn full_scale_average_does_not_overflow() {
        let mut adc = Sequence { values: &[u16::MAX], pos: 0 };
        let mut delay = CountingDelay::default();

        let avg = read_average_adc(&mut adc, &mut delay, u16::MAX, SETTLE, u16::MAX).unwrap();
        assert_eq!(avg, u16::MAX);
    }
}
