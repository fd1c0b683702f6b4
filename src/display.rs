//! Non-blocking SerLCD controller.
//!
//! Provides [`SerLcd`], which queues display commands and transmits them one
//! at a time from [`SerLcd::update`], waiting out the display's settling time
//! between transmissions and recovering on its own from repeated failures.

use crate::colors;
use crate::command::{Command, DISPLAY_ON};
use crate::config::DisplayConfig;
use crate::queue::CommandQueue;
use crate::recovery::RecoveryPolicy;
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::transport::{DEFAULT_ADDRESS, Transport};
use crate::types::{DisplayState, DriverError};
use palette::Srgb;

/// Default number of queue slots. One is kept free, so 31 commands fit.
pub const DEFAULT_QUEUE_LEN: usize = 32;

/// Drives one SerLCD display through a bounded command queue.
///
/// All operations return immediately. Commands are accepted into the queue
/// and sent later by [`update`](Self::update), which the application calls
/// from its main loop. The controller is meant for a single thread of
/// control: enqueueing and updating both take `&mut self`.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `X` - Transport implementation type
/// * `T` - Time source implementation type
/// * `N` - Number of queue slots
pub struct SerLcd<'t, I, X, T, const N: usize = DEFAULT_QUEUE_LEN>
where
    I: TimeInstant,
    X: Transport,
    T: TimeSource<I>,
{
    transport: X,
    time_source: &'t T,
    address: u8,
    config: DisplayConfig<I::Duration>,
    queue: CommandQueue<N>,
    policy: RecoveryPolicy,
    state: DisplayState,
    last_action: I,
    settle: I::Duration,
    needs_refresh: bool,
    last_error: Option<DriverError>,
    display_control: u8,
}

impl<'t, I, X, T, const N: usize> SerLcd<'t, I, X, T, N>
where
    I: TimeInstant,
    X: Transport,
    T: TimeSource<I>,
{
    /// Creates a controller in the `Ready` state with an empty queue.
    ///
    /// Nothing is sent until [`begin`](Self::begin) queues the warm-up
    /// sequence and [`update`](Self::update) starts draining it.
    pub fn new(transport: X, time_source: &'t T, config: DisplayConfig<I::Duration>) -> Self {
        const { assert!(N >= 3, "queue must hold the warm-up sequence") };

        Self {
            transport,
            time_source,
            address: DEFAULT_ADDRESS,
            config,
            queue: CommandQueue::new(),
            policy: RecoveryPolicy::new(),
            state: DisplayState::Ready,
            last_action: time_source.now(),
            settle: I::Duration::ZERO,
            needs_refresh: true,
            last_error: None,
            display_control: DISPLAY_ON,
        }
    }

    /// Sets the I2C address of the display.
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Brings the display up for the first time.
    ///
    /// Same as [`reinitialize`](Self::reinitialize) but holds off for the
    /// configured init delay before the first command goes out. Call it no
    /// sooner than [`COLD_START_MS`](crate::COLD_START_MS) after power-up.
    pub fn begin(&mut self) {
        let now = self.time_source.now();
        self.restart(now, self.config.init_delay);
    }

    /// Resets the controller to a known state.
    ///
    /// Drops everything pending, zeroes the error count, raises the refresh
    /// flag and queues a clear plus a white backlight.
    pub fn reinitialize(&mut self) {
        let now = self.time_source.now();
        self.restart(now, self.config.command_delay);
    }

    /// Advances the state machine by one step. Never blocks.
    ///
    /// # Returns
    /// `true` if the controller is `Ready` after this call.
    pub fn update(&mut self) -> bool {
        let now = self.time_source.now();
        let elapsed = now.duration_since(self.last_action);

        match self.state {
            DisplayState::Ready => self.dispatch(now),
            DisplayState::Processing => {
                if elapsed.has_reached(self.settle) {
                    self.state = DisplayState::Ready;
                }
            }
            DisplayState::Error => {
                if elapsed.has_reached(self.config.error_reset_delay) {
                    if self.config.diagnostics {
                        diag!("serlcd: recovery delay elapsed, reinitializing");
                    }
                    self.restart(now, self.config.command_delay);
                }
            }
            DisplayState::AwaitingResponse => {}
        }

        self.state == DisplayState::Ready
    }

    /// Queues an arbitrary command.
    ///
    /// A full queue counts as a failure for the error policy.
    pub fn enqueue(&mut self, cmd: Command) -> Result<(), DriverError> {
        if self.queue.enqueue(cmd).is_err() {
            let now = self.time_source.now();
            self.fail(DriverError::QueueFull, now);
            return Err(DriverError::QueueFull);
        }
        Ok(())
    }

    /// Queues a clear-display command.
    pub fn clear(&mut self) -> Result<(), DriverError> {
        self.enqueue(Command::clear())
    }

    /// Queues a cursor-home command.
    pub fn home(&mut self) -> Result<(), DriverError> {
        self.enqueue(Command::home())
    }

    /// Queues a cursor move. Rows past 3 are clamped.
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DriverError> {
        self.enqueue(Command::cursor(col, row))
    }

    /// Queues a backlight colour change.
    pub fn set_backlight(&mut self, red: u8, green: u8, blue: u8) -> Result<(), DriverError> {
        self.enqueue(Command::backlight(red, green, blue))
    }

    /// Queues a backlight colour change from an `Srgb` colour.
    pub fn set_backlight_color(&mut self, color: Srgb) -> Result<(), DriverError> {
        let (red, green, blue) = colors::to_rgb8(color);
        self.set_backlight(red, green, blue)
    }

    /// Queues a backlight-off command.
    pub fn no_backlight(&mut self) -> Result<(), DriverError> {
        self.set_backlight_color(colors::OFF)
    }

    /// Turns the display on.
    pub fn display(&mut self) -> Result<(), DriverError> {
        self.set_display_control(self.display_control | DISPLAY_ON)
    }

    /// Turns the display off. Contents are kept.
    pub fn no_display(&mut self) -> Result<(), DriverError> {
        self.set_display_control(self.display_control & !DISPLAY_ON)
    }

    /// Queues one character at the cursor.
    pub fn write_byte(&mut self, byte: u8) -> Result<(), DriverError> {
        self.enqueue(Command::Char(byte))
    }

    /// Queues characters until one is rejected.
    ///
    /// # Returns
    /// The number of bytes accepted.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        let mut written = 0;
        for &byte in bytes {
            if self.write_byte(byte).is_err() {
                break;
            }
            written += 1;
        }
        written
    }

    /// Returns the current state.
    pub fn state(&self) -> DisplayState {
        self.state
    }

    /// Returns the current state as an upper-case name.
    pub fn state_name(&self) -> &'static str {
        self.state.as_str()
    }

    /// Returns true if the next update may transmit.
    pub fn is_ready(&self) -> bool {
        self.state == DisplayState::Ready
    }

    /// Returns true while settling, recovering or otherwise not ready.
    pub fn is_busy(&self) -> bool {
        self.state != DisplayState::Ready
    }

    /// Returns true while in the error state.
    pub fn has_error(&self) -> bool {
        self.state == DisplayState::Error
    }

    /// Failures recorded since the last reinitialization.
    pub fn error_count(&self) -> u8 {
        self.policy.count()
    }

    /// The most recent failure, if any.
    pub fn last_error(&self) -> Option<DriverError> {
        self.last_error
    }

    /// Returns true if the display contents may be stale and should be redrawn.
    pub fn needs_refresh(&self) -> bool {
        self.needs_refresh
    }

    /// Returns true unless the last accepted display command turned it off.
    pub fn display_enabled(&self) -> bool {
        self.display_control & DISPLAY_ON != 0
    }

    /// Acknowledges a full redraw.
    pub fn clear_refresh_flag(&mut self) {
        self.needs_refresh = false;
    }

    /// Number of commands waiting to be sent.
    pub fn queue_count(&self) -> usize {
        self.queue.count()
    }

    /// Number of queue slots.
    pub fn queue_capacity(&self) -> usize {
        self.queue.capacity()
    }

    /// Queue occupancy in percent of [`queue_capacity`](Self::queue_capacity).
    pub fn queue_percent_full(&self) -> f32 {
        self.queue.percent_full()
    }

    /// I2C address commands are sent to.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &DisplayConfig<I::Duration> {
        &self.config
    }

    /// Returns the configuration for adjustment. Changes apply from the next update.
    pub fn config_mut(&mut self) -> &mut DisplayConfig<I::Duration> {
        &mut self.config
    }

    /// Returns a reference to the transport.
    pub fn transport(&self) -> &X {
        &self.transport
    }

    /// Consumes the controller and returns the transport.
    pub fn release(self) -> X {
        self.transport
    }

    fn restart(&mut self, now: I, settle: I::Duration) {
        self.queue.reset();
        self.policy.reset();
        self.state = DisplayState::Processing;
        self.last_action = now;
        self.settle = settle;
        self.needs_refresh = true;

        // The queue was just emptied and holds at least two commands.
        let _ = self.queue.enqueue(Command::clear());
        let (red, green, blue) = colors::to_rgb8(colors::WHITE);
        let _ = self.queue.enqueue(Command::backlight(red, green, blue));
    }

    fn dispatch(&mut self, now: I) {
        let Some(cmd) = self.queue.peek() else {
            return;
        };

        match self.send(cmd) {
            Ok(()) => {
                self.queue.advance_head();
                self.settle = if cmd.is_clear() {
                    self.config.clear_delay
                } else {
                    self.config.command_delay
                };
                self.state = DisplayState::Processing;
                self.last_action = now;
            }
            Err(error) => {
                if self.config.diagnostics && error == DriverError::Transmission {
                    diag!("serlcd: transmission to address {} failed", self.address);
                }
                self.fail(error, now);
            }
        }
    }

    fn set_display_control(&mut self, flags: u8) -> Result<(), DriverError> {
        // Cached flags must match what was queued.
        self.enqueue(Command::display_control(flags))?;
        self.display_control = flags;
        Ok(())
    }

    fn send(&mut self, cmd: Command) -> Result<(), DriverError> {
        let frame = cmd.encode().ok_or(DriverError::InvalidCommand)?;

        self.transport.begin_transmission(self.address);
        for &byte in frame.iter() {
            self.transport.write(byte);
        }
        self.transport
            .end_transmission()
            .map_err(|_| DriverError::Transmission)
    }

    fn fail(&mut self, error: DriverError, now: I) {
        self.last_error = Some(error);
        let verdict = self.policy.record_failure(self.config.error_threshold);

        if self.config.diagnostics && verdict.report {
            diag!(
                "serlcd: error #{} ({}) in state {}",
                verdict.count,
                error,
                self.state.as_str()
            );
        }

        if verdict.escalate {
            self.state = DisplayState::Error;
            self.needs_refresh = true;
            self.queue.reset();

            if self.config.diagnostics {
                diag!("serlcd: entering ERROR state, queue dropped");
            }
        }

        self.last_action = now;
    }
}

impl<'t, I, X, T, const N: usize> core::fmt::Write for SerLcd<'t, I, X, T, N>
where
    I: TimeInstant,
    X: Transport,
    T: TimeSource<I>,
{
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        if self.write_bytes(s.as_bytes()) == s.len() {
            Ok(())
        } else {
            Err(core::fmt::Error)
        }
    }
}
