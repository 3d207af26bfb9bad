//! Time abstraction traits for platform-agnostic timing.
//!
//! All timestamps are 32-bit millisecond counters that are allowed to wrap.
//! Elapsed time is always computed with wrapping subtraction, so durations
//! stay correct across a counter overflow as long as they are shorter than
//! `u32::MAX` milliseconds (about 49 days).

/// A monotonic millisecond timestamp that wraps on overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub u32);

impl Millis {
    /// Creates a timestamp from raw milliseconds.
    #[inline]
    pub const fn new(millis: u32) -> Self {
        Millis(millis)
    }

    /// Returns the raw millisecond count.
    #[inline]
    pub const fn as_millis(self) -> u32 {
        self.0
    }

    /// Milliseconds elapsed since an earlier timestamp.
    ///
    /// Uses unsigned wrapping difference, never direct comparison.
    #[inline]
    pub const fn elapsed_since(self, earlier: Millis) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// Returns the timestamp `millis` later, wrapping on overflow.
    #[inline]
    pub const fn wrapping_add(self, millis: u32) -> Self {
        Millis(self.0.wrapping_add(millis))
    }
}

impl From<u32> for Millis {
    fn from(millis: u32) -> Self {
        Millis(millis)
    }
}

/// Trait for abstracting time sources.
pub trait TimeSource {
    /// Returns the current time.
    fn now(&self) -> Millis;
}
