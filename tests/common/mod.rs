//! Shared test infrastructure for serlcd-nb integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use serlcd_nb::{TimeDuration, TimeInstant, TimeSource, Transport};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Transport
// ============================================================================

/// One completed transmission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmission {
    pub address: u8,
    pub bytes: Vec<u8>,
}

/// Transport that records every transmission and can be told to fail
#[derive(Default)]
pub struct MockTransport {
    sent: Vec<Transmission>,
    pending: Option<Transmission>,
    failures_left: usize,
    fail_always: bool,
    attempts: usize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `count` transmissions
    pub fn fail_next(&mut self, count: usize) {
        self.failures_left = count;
    }

    /// Fail every transmission until cleared
    pub fn set_fail_always(&mut self, fail: bool) {
        self.fail_always = fail;
    }

    /// Successful transmissions, oldest first
    pub fn sent(&self) -> &[Transmission] {
        &self.sent
    }

    /// Bytes of each successful transmission
    pub fn frames(&self) -> Vec<Vec<u8>> {
        self.sent.iter().map(|t| t.bytes.clone()).collect()
    }

    /// Calls to `end_transmission`, successful or not
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

impl Transport for MockTransport {
    type Error = ();

    fn begin_transmission(&mut self, address: u8) {
        self.pending = Some(Transmission {
            address,
            bytes: Vec::new(),
        });
    }

    fn write(&mut self, byte: u8) {
        if let Some(pending) = self.pending.as_mut() {
            pending.bytes.push(byte);
        }
    }

    fn end_transmission(&mut self) -> Result<(), Self::Error> {
        self.attempts += 1;
        let pending = self.pending.take().ok_or(())?;

        if self.fail_always {
            return Err(());
        }
        if self.failures_left > 0 {
            self.failures_left -= 1;
            return Err(());
        }

        self.sent.push(pending);
        Ok(())
    }
}

// ============================================================================
// Mock I2C Bus
// ============================================================================

/// `embedded-hal` I2C bus that records writes and can NACK on demand
#[derive(Default)]
pub struct MockI2c {
    pub writes: Vec<(u8, Vec<u8>)>,
    pub nack: bool,
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.nack {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        for op in operations {
            if let Operation::Write(bytes) = op {
                self.writes.push((address, bytes.to_vec()));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Run `update` until the controller reports ready or `limit` ticks pass,
/// advancing the clock by `step` milliseconds between ticks
pub fn drain<T, const N: usize>(
    lcd: &mut serlcd_nb::SerLcd<'_, TestInstant, T, MockTimeSource, N>,
    clock: &MockTimeSource,
    step: u64,
    limit: usize,
) where
    T: Transport,
{
    for _ in 0..limit {
        lcd.update();
        if lcd.is_ready() && lcd.queue_count() == 0 {
            return;
        }
        clock.advance(step);
    }
}
