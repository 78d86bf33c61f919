//! Fixed Storage Sizes

/// Capacity of a rendered status line (bytes).
///
/// Fits three `f32` fields printed at full width (`f32::MAX` is 39 integer
/// digits) plus labels, so formatting can only fail on a broken sink.
pub const STATUS_LINE_CAPACITY: usize = 192;
