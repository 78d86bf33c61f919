//! Hardware seams
//!
//! embedded-hal 1.0 dropped its ADC trait, so the analog input is defined here
//! in the shape the 0.2 `OneShot` trait had: a single conversion that may
//! report `WouldBlock` while it is in progress. Digital input and delays use
//! the embedded-hal 1.0 traits directly.
//!
//! ```rust
//! use airguard_core::AnalogInput;
//!
//! /// Replays a fixed count, useful on a bench without a sensor
//! struct Constant(u16);
//!
//! impl AnalogInput for Constant {
//!     type Error = core::convert::Infallible;
//!
//!     fn read_raw(&mut self) -> nb::Result<u16, Self::Error> {
//!         Ok(self.0)
//!     }
//! }
//! ```

pub use crate::time::TimeSource;

/// One analog channel behind an ADC
pub trait AnalogInput {
    /// Driver-specific failure
    type Error: core::fmt::Debug;

    /// Start or poll a conversion, returning the raw count when done
    fn read_raw(&mut self) -> nb::Result<u16, Self::Error>;
}

impl<A: AnalogInput + ?Sized> AnalogInput for &mut A {
    type Error = A::Error;

    fn read_raw(&mut self) -> nb::Result<u16, Self::Error> {
        (**self).read_raw()
    }
}
