//! Byte transport to the display.
//!
//! The driver talks to the display through the [`Transport`] trait, which
//! mirrors the begin / write / end shape of an I2C master transaction.
//! [`I2cTransport`] implements it on top of any `embedded-hal` I2C bus.

use embedded_hal::i2c::I2c;
use heapless::Vec;

/// Default 7-bit I2C address of an OpenLCD backpack.
pub const DEFAULT_ADDRESS: u8 = 0x72;

/// Bytes buffered per transmission by [`I2cTransport`].
pub const TX_BUFFER_LEN: usize = 32;

/// Trait for abstracting the display bus.
///
/// Implement this for your hardware to let the driver send command frames.
/// A transmission is one `begin_transmission`, any number of `write`s and
/// one `end_transmission`; the result of `end_transmission` is the result of
/// the whole transmission. None of these may block on display timing.
pub trait Transport {
    /// Error reported when a transmission fails.
    type Error;

    /// Starts a transmission to the device at `address`.
    fn begin_transmission(&mut self, address: u8);

    /// Queues one byte for the current transmission.
    fn write(&mut self, byte: u8);

    /// Completes the current transmission.
    fn end_transmission(&mut self) -> Result<(), Self::Error>;
}

/// Errors reported by [`I2cTransport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cTransportError<E> {
    /// The bus rejected the write.
    Bus(E),
    /// More than [`TX_BUFFER_LEN`] bytes were written in one transmission.
    Overflow,
}

impl<E: core::fmt::Debug> core::fmt::Display for I2cTransportError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            I2cTransportError::Bus(e) => write!(f, "i2c bus error: {:?}", e),
            I2cTransportError::Overflow => {
                write!(f, "transmission exceeds {} byte buffer", TX_BUFFER_LEN)
            }
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for I2cTransportError<E> {}

/// [`Transport`] over an `embedded-hal` I2C bus.
///
/// Bytes are collected until `end_transmission`, which issues a single
/// `I2c::write` to the address given at `begin_transmission`.
pub struct I2cTransport<I2C> {
    i2c: I2C,
    address: u8,
    buffer: Vec<u8, TX_BUFFER_LEN>,
    overflowed: bool,
}

impl<I2C: I2c> I2cTransport<I2C> {
    /// Wraps an I2C bus.
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: DEFAULT_ADDRESS,
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Returns the wrapped bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> Transport for I2cTransport<I2C> {
    type Error = I2cTransportError<I2C::Error>;

    fn begin_transmission(&mut self, address: u8) {
        self.address = address;
        self.buffer.clear();
        self.overflowed = false;
    }

    fn write(&mut self, byte: u8) {
        if self.buffer.push(byte).is_err() {
            self.overflowed = true;
        }
    }

    fn end_transmission(&mut self) -> Result<(), Self::Error> {
        if self.overflowed {
            self.buffer.clear();
            return Err(I2cTransportError::Overflow);
        }

        let result = self
            .i2c
            .write(self.address, &self.buffer)
            .map_err(I2cTransportError::Bus);
        self.buffer.clear();
        result
    }
}
