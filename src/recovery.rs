//! Error counting and escalation.
//!
//! Two tiers share one threshold: reaching it turns on diagnostics, going
//! past it trips the error state. With the default threshold of 1 the first
//! failure is reported and the second one forces a reinitialization.
//!
//! The count only goes back to zero on reinitialization. Successful sends in
//! between do not forgive earlier failures.

/// What the controller should do about a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Verdict {
    /// Error count after this failure.
    pub count: u8,

    /// The count is at or above the threshold.
    pub report: bool,

    /// The count is above the threshold; enter the error state.
    pub escalate: bool,
}

/// Failure counter for one display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RecoveryPolicy {
    count: u8,
}

impl RecoveryPolicy {
    /// Creates a policy with no recorded failures.
    pub const fn new() -> Self {
        Self { count: 0 }
    }

    /// Records one failure and judges it against `threshold`.
    pub fn record_failure(&mut self, threshold: u8) -> Verdict {
        self.count = self.count.saturating_add(1);

        Verdict {
            count: self.count,
            report: self.count >= threshold,
            escalate: self.count > threshold,
        }
    }

    /// Forgets all recorded failures.
    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Failures recorded since the last reset.
    pub fn count(&self) -> u8 {
        self.count
    }
}
