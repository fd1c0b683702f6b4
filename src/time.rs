//! Time abstraction traits for platform-agnostic timing.
//!
//! The driver never sleeps. Every timing decision compares one clock reading
//! taken at the start of [`SerLcd::update`](crate::SerLcd::update) against a
//! recorded timestamp, so all it needs from the platform is "now" and
//! "how long since".

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant. Must be monotonic.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;

    /// Returns true once `self` has reached `threshold`.
    #[inline]
    fn has_reached(&self, threshold: Self) -> bool {
        self.as_millis() >= threshold.as_millis()
    }
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    ///
    /// Implementations backed by wrapping counters should use wrapping
    /// arithmetic so a timer rollover does not stall the driver.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}
