#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`SerLcd`**: Queues display commands and sends them from a non-blocking `update`
//! - **`Command`**: One transmission unit (character, display command, setting, backlight)
//! - **`CommandQueue`**: Fixed-size ring buffer of commands, one slot kept free
//! - **`DisplayState`**: `Ready`, `Processing`, `Error` (and the unused `AwaitingResponse`)
//! - **`RecoveryPolicy`**: Counts failures and decides when to reinitialize
//! - **`DisplayConfig`**: Settling delays, recovery delay and diagnostics settings
//! - **`Transport`**: Trait to implement for your bus, or use `I2cTransport` with `embedded-hal`
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! Backlight colours can be given as raw bytes or as `Srgb<f32>` (0.0-1.0 range),
//! which is converted to 8 bits per channel before it is queued.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

#[macro_use]
mod fmt;

pub mod colors;
pub mod command;
pub mod config;
pub mod display;
pub mod queue;
pub mod recovery;
pub mod time;
pub mod transport;
pub mod types;

pub use command::Command;
pub use config::{COLD_START_MS, DisplayConfig};
pub use display::{DEFAULT_QUEUE_LEN, SerLcd};
pub use queue::{CommandQueue, QueueFull};
pub use recovery::{RecoveryPolicy, Verdict};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use transport::{DEFAULT_ADDRESS, I2cTransport, I2cTransportError, Transport};
pub use types::{DisplayState, DriverError};
