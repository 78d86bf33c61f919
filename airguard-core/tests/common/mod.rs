//! Simulated hardware shared by the integration tests
//!
//! - [`SimClock`]: millisecond clock that only moves when [`SimDelay`] sleeps
//! - [`SimAdc`]: analog input whose next count (or fault) the test controls
//! - [`SimPin`]: digital input whose level (or fault) the test controls
//!
//! All handles are cheap clones over shared cells, so a test can keep one
//! copy while the reporter owns another.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use airguard_core::{AnalogInput, TimeSource, Timestamp};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin};

/// Clock advanced by simulated delays
#[derive(Clone, Default)]
pub struct SimClock {
    nanos: Rc<Cell<u64>>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay that advances this clock
    pub fn delay(&self) -> SimDelay {
        SimDelay {
            nanos: Rc::clone(&self.nanos),
        }
    }

    /// Jump forward without going through a delay
    pub fn advance_ms(&self, ms: u64) {
        self.nanos.set(self.nanos.get() + ms * 1_000_000);
    }

    pub fn now_ms(&self) -> u64 {
        self.nanos.get() / 1_000_000
    }
}

impl TimeSource for SimClock {
    fn now(&self) -> Timestamp {
        self.now_ms()
    }

    fn is_wall_clock(&self) -> bool {
        false
    }

    fn precision_ms(&self) -> u32 {
        1
    }
}

/// Delay that moves a [`SimClock`] instead of sleeping
pub struct SimDelay {
    nanos: Rc<Cell<u64>>,
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.nanos.set(self.nanos.get() + u64::from(ns));
    }
}

/// Failure reported by [`SimAdc`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdcFault;

/// Analog input with a test-controlled count
///
/// Queued counts are consumed first, one per conversion; after that the
/// steady value repeats. A steady value of `None` makes every conversion fail.
#[derive(Clone)]
pub struct SimAdc {
    steady: Rc<Cell<Option<u16>>>,
    queued: Rc<RefCell<VecDeque<Option<u16>>>>,
    conversions: Rc<Cell<u32>>,
}

impl SimAdc {
    pub fn steady(raw: u16) -> Self {
        Self {
            steady: Rc::new(Cell::new(Some(raw))),
            queued: Rc::new(RefCell::new(VecDeque::new())),
            conversions: Rc::new(Cell::new(0)),
        }
    }

    pub fn failing() -> Self {
        let adc = Self::steady(0);
        adc.fail();
        adc
    }

    pub fn set(&self, raw: u16) {
        self.steady.set(Some(raw));
    }

    pub fn fail(&self) {
        self.steady.set(None);
    }

    /// Queue exact conversions ahead of the steady value
    pub fn queue(&self, values: impl IntoIterator<Item = Option<u16>>) {
        self.queued.borrow_mut().extend(values);
    }

    pub fn conversions(&self) -> u32 {
        self.conversions.get()
    }
}

impl AnalogInput for SimAdc {
    type Error = AdcFault;

    fn read_raw(&mut self) -> nb::Result<u16, Self::Error> {
        self.conversions.set(self.conversions.get() + 1);

        let next = self
            .queued
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| self.steady.get());

        next.ok_or(nb::Error::Other(AdcFault))
    }
}

/// Digital input with a test-controlled level; `None` makes reads fail
#[derive(Clone)]
pub struct SimPin {
    level: Rc<Cell<Option<bool>>>,
}

impl SimPin {
    pub fn new(level: bool) -> Self {
        Self {
            level: Rc::new(Cell::new(Some(level))),
        }
    }

    pub fn set(&self, level: bool) {
        self.level.set(Some(level));
    }

    pub fn fail(&self) {
        self.level.set(None);
    }
}

impl ErrorType for SimPin {
    type Error = ErrorKind;
}

impl InputPin for SimPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.level.get().ok_or(ErrorKind::Other)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// Analog input that never fails, for tests that do not need a handle
pub struct Constant(pub u16);

impl AnalogInput for Constant {
    type Error = Infallible;

    fn read_raw(&mut self) -> nb::Result<u16, Self::Error> {
        Ok(self.0)
    }
}
