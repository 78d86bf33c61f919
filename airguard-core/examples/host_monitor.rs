//! Run the reporting loop on a desktop against a simulated MQ-135
//!
//! ```bash
//! cargo run --example host_monitor
//! ```
//!
//! The simulated sensor sits in clean air for the calibration window, then a
//! gas plume drifts past: Rs drops, the ratio falls below 1 and the module's
//! comparator output goes high while the plume lasts. Runs for about 40 s.

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;
use std::time::Duration;

use airguard_core::{
    time::StdClock, AnalogInput, CalibrationConfig, ReportConfig, Reporter, SensorResult,
    TimeSource,
};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin};
use log::{LevelFilter, Metadata, Record};

/// Counts seen while the sensor sits in clean air
const CLEAN_AIR_RAW: f32 = 2048.0;

/// Extra counts at the peak of the plume
const PLUME_PEAK_RAW: f32 = 1200.0;

/// Comparator trip point, as set by the module's trimmer
const COMPARATOR_RAW: u16 = 2600;

const RUN_TIME_MS: u64 = 40_000;

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Thread sleep as a HAL delay
struct SleepDelay;

impl DelayNs for SleepDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}

/// Output of the simulated module, shared by its AO and DO pins
#[derive(Clone)]
struct SimulatedModule {
    clock: Rc<StdClock>,
    last_raw: Rc<Cell<u16>>,
    noise: Rc<Cell<u32>>,
}

impl SimulatedModule {
    fn new(clock: Rc<StdClock>) -> Self {
        Self {
            clock,
            last_raw: Rc::new(Cell::new(0)),
            noise: Rc::new(Cell::new(0x2545_f491)),
        }
    }

    /// Plume centred at 25 s, roughly 8 s wide
    fn plume(&self) -> f32 {
        let t = self.clock.now() as f32 / 1000.0;
        let offset = (t - 25.0) / 4.0;
        PLUME_PEAK_RAW * (-offset * offset).exp()
    }

    /// A couple of LSBs of xorshift noise
    fn jitter(&self) -> f32 {
        let mut x = self.noise.get();
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.noise.set(x);
        (x % 5) as f32 - 2.0
    }
}

impl AnalogInput for SimulatedModule {
    type Error = Infallible;

    fn read_raw(&mut self) -> nb::Result<u16, Self::Error> {
        let raw = (CLEAN_AIR_RAW + self.plume() + self.jitter()).clamp(0.0, 4095.0) as u16;
        self.last_raw.set(raw);
        Ok(raw)
    }
}

impl ErrorType for SimulatedModule {
    type Error = Infallible;
}

impl InputPin for SimulatedModule {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.last_raw.get() >= COMPARATOR_RAW)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

fn main() -> SensorResult<()> {
    log::set_logger(&LOGGER)
        .map(|()| log::set_max_level(LevelFilter::Info))
        .ok();

    let clock = Rc::new(StdClock::new());
    let module = SimulatedModule::new(Rc::clone(&clock));

    let mut reporter = match Reporter::new(
        module.clone(),
        module,
        SleepDelay,
        &*clock,
        CalibrationConfig::default(),
        ReportConfig::default(),
    ) {
        Ok(reporter) => reporter,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            return Ok(());
        }
    };

    let mut out = String::new();
    reporter.start(&mut out)?;
    print!("{}", out);

    while clock.now() < RUN_TIME_MS {
        out.clear();
        if let Err(e) = reporter.tick(&mut out) {
            log::error!("Report cycle failed: {}", e);
        }
        print!("{}", out);

        let wait = reporter.cadence().remaining_ms(clock.now()).max(1);
        std::thread::sleep(Duration::from_millis(wait));
    }

    if reporter.sensor_disconnected() {
        log::warn!("Sensor looked disconnected at shutdown");
    }
    Ok(())
}
