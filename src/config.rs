//! Per-instance driver configuration.

use crate::time::TimeDuration;

/// Time the display firmware needs after power-up before it accepts any
/// command. The driver does not wait for this itself; delay the first
/// [`SerLcd::begin`](crate::SerLcd::begin) by at least this much.
pub const COLD_START_MS: u64 = 350;

/// Default settling window after `begin`.
pub const DEFAULT_INIT_MS: u64 = 1000;
/// Default settling window after an ordinary command.
pub const DEFAULT_COMMAND_MS: u64 = 5;
/// Default settling window after a clear-display command.
pub const DEFAULT_CLEAR_MS: u64 = 50;
/// Default time spent in the error state before reinitializing.
pub const DEFAULT_ERROR_RESET_MS: u64 = 100;
/// Default error count at which diagnostics start.
pub const DEFAULT_ERROR_THRESHOLD: u8 = 1;

/// Timing and error-policy settings for one display.
///
/// Build it with [`Default`] and the `with_*` setters:
///
/// ```ignore
/// let config = DisplayConfig::default()
///     .with_command_delay(Duration::from_millis(10))
///     .with_diagnostics(true);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig<D: TimeDuration> {
    /// Settling window entered by `begin`.
    pub init_delay: D,

    /// Minimum gap after each transmitted command.
    pub command_delay: D,

    /// Minimum gap after a clear-display command.
    pub clear_delay: D,

    /// How long the error state lasts before the display is reinitialized.
    pub error_reset_delay: D,

    /// Error count at which diagnostics are emitted. One more failure than
    /// this trips the error state.
    pub error_threshold: u8,

    /// Emit diagnostics through `defmt`/`log`.
    pub diagnostics: bool,
}

impl<D: TimeDuration> Default for DisplayConfig<D> {
    fn default() -> Self {
        Self {
            init_delay: D::from_millis(DEFAULT_INIT_MS),
            command_delay: D::from_millis(DEFAULT_COMMAND_MS),
            clear_delay: D::from_millis(DEFAULT_CLEAR_MS),
            error_reset_delay: D::from_millis(DEFAULT_ERROR_RESET_MS),
            error_threshold: DEFAULT_ERROR_THRESHOLD,
            diagnostics: false,
        }
    }
}

impl<D: TimeDuration> DisplayConfig<D> {
    /// Sets the settling window entered by `begin`.
    pub fn with_init_delay(mut self, delay: D) -> Self {
        self.init_delay = delay;
        self
    }

    /// Sets the minimum gap after each command.
    pub fn with_command_delay(mut self, delay: D) -> Self {
        self.command_delay = delay;
        self
    }

    /// Sets the minimum gap after a clear-display command.
    pub fn with_clear_delay(mut self, delay: D) -> Self {
        self.clear_delay = delay;
        self
    }

    /// Sets the error recovery delay.
    pub fn with_error_reset_delay(mut self, delay: D) -> Self {
        self.error_reset_delay = delay;
        self
    }

    /// Sets the diagnostic threshold.
    pub fn with_error_threshold(mut self, threshold: u8) -> Self {
        self.error_threshold = threshold;
        self
    }

    /// Enables or disables diagnostics.
    pub fn with_diagnostics(mut self, enable: bool) -> Self {
        self.diagnostics = enable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Ms(u64);

    impl TimeDuration for Ms {
        const ZERO: Self = Ms(0);

        fn as_millis(&self) -> u64 {
            self.0
        }

        fn from_millis(millis: u64) -> Self {
            Ms(millis)
        }
    }

    #[test]
    fn defaults_match_display_timings() {
        let config = DisplayConfig::<Ms>::default();
        assert_eq!(config.init_delay, Ms(1000));
        assert_eq!(config.command_delay, Ms(5));
        assert_eq!(config.clear_delay, Ms(50));
        assert_eq!(config.error_reset_delay, Ms(100));
        assert_eq!(config.error_threshold, 1);
        assert!(!config.diagnostics);
    }

    #[test]
    fn setters_chain() {
        let config = DisplayConfig::<Ms>::default()
            .with_init_delay(Ms(0))
            .with_command_delay(Ms(2))
            .with_clear_delay(Ms(20))
            .with_error_reset_delay(Ms(40))
            .with_error_threshold(3)
            .with_diagnostics(true);

        assert_eq!(config.init_delay, Ms(0));
        assert_eq!(config.command_delay, Ms(2));
        assert_eq!(config.clear_delay, Ms(20));
        assert_eq!(config.error_reset_delay, Ms(40));
        assert_eq!(config.error_threshold, 3);
        assert!(config.diagnostics);
    }
}
