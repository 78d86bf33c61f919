//! Reporting loop
//!
//! [`Reporter`] owns the hardware handles and the single piece of long-lived
//! state, the calibrated baseline. It moves through two states, one way:
//!
//! ```text
//! Uncalibrated ──(first cycle: calibrate once, success or not)──> Calibrated { baseline }
//! ```
//!
//! A failed calibration still lands in `Calibrated`, with `baseline: None`;
//! every later line then carries `Rratio=NAN`. There is no re-calibration.
//!
//! ## Driving it
//!
//! Bare metal, blocking:
//!
//! ```rust,ignore
//! reporter.start(&mut serial)?;
//! loop {
//!     if let Err(e) = reporter.step_blocking(&mut serial) {
//!         // log and keep going
//!     }
//! }
//! ```
//!
//! Host with its own timer: call [`Reporter::tick`] as often as convenient; it
//! only runs a cycle when the [`Cadence`] says one is due.
//!
//! ## Output
//!
//! Everything goes to a `core::fmt::Write` sink, one line per event:
//!
//! ```text
//! MQ-135 monitor starting
//! Calibrating R0. Keep sensor in clean air.
//! Calibration done R0=9995.1 ohm
//! RAW=2048 V=2.478V Rs=9995.1ohm Rratio=1.000 DO=0
//! RAW=0 INVALID READ Rs=NAN Rratio=NAN DO=0
//! ADC READ FAILED DO=0
//! ```

use core::fmt::Write;

use embedded_hal::{delay::DelayNs, digital::InputPin};

use crate::{
    calibration::{calibrate_baseline, CalibrationReport},
    config::{CalibrationConfig, ReportConfig},
    errors::{ConfigError, SensorError, SensorResult},
    sampler::read_average_adc,
    schedule::Cadence,
    status::SensorStatus,
    time::TimeSource,
    traits::AnalogInput,
};

/// Calibration lifecycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReporterState {
    /// Nothing measured yet
    Uncalibrated,
    /// Calibration ran (or was skipped); `baseline` is fixed from here on
    Calibrated {
        /// R0 in ohms, `None` if calibration failed or was disabled
        baseline: Option<f32>,
    },
}

/// Calibrate once, then report on a fixed cadence
pub struct Reporter<A, P, D, T> {
    adc: A,
    threshold_pin: P,
    delay: D,
    clock: T,
    calibration: CalibrationConfig,
    report: ReportConfig,
    state: ReporterState,
    cadence: Cadence,
    last_calibration: Option<CalibrationReport>,
    zero_streak: u16,
    disconnected: bool,
}

impl<A, P, D, T> Reporter<A, P, D, T>
where
    A: AnalogInput,
    P: InputPin,
    D: DelayNs,
    T: TimeSource,
{
    /// Take ownership of the hardware; both configs are validated here
    pub fn new(
        adc: A,
        threshold_pin: P,
        delay: D,
        clock: T,
        calibration: CalibrationConfig,
        report: ReportConfig,
    ) -> Result<Self, ConfigError> {
        calibration.validate()?;
        report.validate()?;

        Ok(Self {
            adc,
            threshold_pin,
            delay,
            clock,
            calibration,
            report,
            state: ReporterState::Uncalibrated,
            cadence: Cadence::new(report.interval),
            last_calibration: None,
            zero_streak: 0,
            disconnected: false,
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> ReporterState {
        self.state
    }

    /// R0, once calibration succeeded
    pub fn baseline(&self) -> Option<f32> {
        match self.state {
            ReporterState::Calibrated { baseline } => baseline,
            ReporterState::Uncalibrated => None,
        }
    }

    /// Details of the calibration window, if one ran
    pub fn calibration_report(&self) -> Option<&CalibrationReport> {
        self.last_calibration.as_ref()
    }

    /// Output has read 0 counts for `disconnect_after` cycles in a row
    pub fn sensor_disconnected(&self) -> bool {
        self.disconnected
    }

    /// Report scheduling state
    pub fn cadence(&self) -> &Cadence {
        &self.cadence
    }

    /// Hand the hardware back
    pub fn release(self) -> (A, P, D, T) {
        (self.adc, self.threshold_pin, self.delay, self.clock)
    }

    /// Let the pins settle, then print the banner
    pub fn start<W: Write>(&mut self, out: &mut W) -> SensorResult<()> {
        self.delay.delay_ms(self.report.startup_delay.to_millis());
        log_info!("airguard {} starting", crate::VERSION);
        writeln!(out, "MQ-135 monitor starting")?;
        Ok(())
    }

    /// Run the one-time calibration if it has not happened yet
    ///
    /// Moves to [`ReporterState::Calibrated`] whatever the outcome, so a
    /// failed calibration is never retried. A sink error is returned only
    /// after the state change.
    pub fn ensure_calibrated<W: Write>(&mut self, out: &mut W) -> SensorResult<()> {
        if self.state != ReporterState::Uncalibrated {
            return Ok(());
        }

        if !self.report.calibrate_on_start {
            log_info!("Calibration disabled, ratio will not be reported");
            self.state = ReporterState::Calibrated { baseline: None };
            return Ok(());
        }

        let announced = writeln!(out, "Calibrating R0. Keep sensor in clean air.");

        let report = calibrate_baseline(
            &mut self.adc,
            &mut self.delay,
            &self.clock,
            &self.calibration,
        );
        self.state = ReporterState::Calibrated {
            baseline: report.baseline,
        };
        self.last_calibration = Some(report);

        if report.looks_disconnected() {
            log_warn!(
                "No usable reading in {} calibration iterations, sensor may be disconnected",
                report.iterations
            );
        }

        announced?;
        match report.baseline {
            Some(r0) => writeln!(out, "Calibration done R0={:.1} ohm", r0)?,
            None => writeln!(out, "Calibration failed")?,
        }
        Ok(())
    }

    /// One report cycle: sample, convert, read DO, print
    ///
    /// Returns the status that was printed, or `None` when the ADC failed and
    /// the fault line was printed instead.
    pub fn cycle<W: Write>(&mut self, out: &mut W) -> SensorResult<Option<SensorStatus>> {
        self.ensure_calibrated(out)?;

        let sample = read_average_adc(
            &mut self.adc,
            &mut self.delay,
            self.calibration.sample_count,
            self.calibration.settle_delay,
            self.calibration.adc_max,
        );
        let threshold = self.read_threshold();

        match sample {
            Ok(raw) => {
                self.track_zero_streak(raw);

                let status =
                    SensorStatus::from_raw(raw, self.baseline(), threshold, &self.calibration);
                let line = status.render()?;
                out.write_str(&line)?;
                out.write_char('\n')?;
                Ok(Some(status))
            }
            Err(err @ (SensorError::AdcRead | SensorError::RawOutOfRange { .. })) => {
                log_warn!("Skipping reading: {}", err);
                writeln!(out, "ADC READ FAILED DO={}", u8::from(threshold))?;
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Run a cycle if the cadence says one is due
    ///
    /// The next cycle becomes due one interval after this one finished.
    pub fn tick<W: Write>(&mut self, out: &mut W) -> SensorResult<Option<SensorStatus>> {
        if !self.cadence.is_due(self.clock.now()) {
            return Ok(None);
        }

        let result = self.cycle(out);
        self.cadence.completed_at(self.clock.now());
        result
    }

    /// Run a cycle, then block for the report interval
    ///
    /// The delay happens even when the cycle failed.
    pub fn step_blocking<W: Write>(&mut self, out: &mut W) -> SensorResult<Option<SensorStatus>> {
        let result = self.cycle(out);
        self.cadence.completed_at(self.clock.now());

        let interval = u32::try_from(self.report.interval.to_millis()).unwrap_or(u32::MAX);
        self.delay.delay_ms(interval);
        result
    }

    fn read_threshold(&mut self) -> bool {
        match self.threshold_pin.is_high() {
            Ok(level) => level,
            Err(_) => {
                log_warn!("DO pin read failed, reporting low");
                false
            }
        }
    }

    fn track_zero_streak(&mut self, raw: u16) {
        if raw != 0 {
            if self.disconnected {
                log_info!("Sensor output back above 0 V (raw {})", raw);
            }
            self.zero_streak = 0;
            self.disconnected = false;
            return;
        }

        self.zero_streak = self.zero_streak.saturating_add(1);
        let limit = self.report.disconnect_after;
        if limit > 0 && !self.disconnected && self.zero_streak >= limit {
            self.disconnected = true;
            log_warn!(
                "Sensor output at 0 V for {} cycles, check wiring and heater supply",
                self.zero_streak
            );
        }
    }
}
