//! Controller state and error types.

/// The current state of a display controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayState {
    /// Idle between commands. The next queued command goes out on the next update.
    Ready,

    /// A command was just sent. Waiting out its settling window.
    Processing,

    /// Reserved for displays that acknowledge commands. Never entered.
    AwaitingResponse,

    /// Too many failures. Transmission is suspended until the display is reinitialized.
    Error,
}

impl DisplayState {
    /// Upper-case name of the state, for logs and status screens.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DisplayState::Ready => "READY",
            DisplayState::Processing => "PROCESSING",
            DisplayState::AwaitingResponse => "AWAITING_RESPONSE",
            DisplayState::Error => "ERROR",
        }
    }
}

impl core::fmt::Display for DisplayState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures observed by the driver.
///
/// None of these are fatal. Each one is counted by the error policy and the
/// driver recovers on its own; they are returned so callers can tell why a
/// command was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// The command queue had no free slot. The command was dropped.
    QueueFull,

    /// The transport reported a failed transmission.
    Transmission,

    /// An empty command slot reached the transmitter.
    InvalidCommand,
}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DriverError::QueueFull => write!(f, "command queue is full"),
            DriverError::Transmission => write!(f, "transmission to display failed"),
            DriverError::InvalidCommand => write!(f, "invalid command type"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DriverError {}
