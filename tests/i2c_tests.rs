//! End-to-end tests through I2cTransport and an embedded-hal bus

mod common;
use common::*;

use serlcd_nb::{DisplayConfig, DisplayState, DriverError, I2cTransport, SerLcd};

type Lcd<'t> = SerLcd<'t, TestInstant, I2cTransport<MockI2c>, MockTimeSource>;

#[test]
fn warm_up_sequence_reaches_the_bus() {
    let clock = MockTimeSource::new();
    let config = DisplayConfig::default().with_init_delay(TestDuration(0));
    let mut lcd: Lcd<'_> = SerLcd::new(I2cTransport::new(MockI2c::default()), &clock, config);

    lcd.begin();
    drain(&mut lcd, &clock, 10, 50);

    let bus = lcd.release().release();
    assert_eq!(
        bus.writes,
        vec![
            (0x72, vec![254, 0x01]),
            (0x72, vec![0x7C, 0x2B, 255, 255, 255]),
        ]
    );
}

#[test]
fn text_and_cursor_through_i2c() {
    let clock = MockTimeSource::new();
    let mut lcd: Lcd<'_> = SerLcd::new(
        I2cTransport::new(MockI2c::default()),
        &clock,
        DisplayConfig::default(),
    )
    .with_address(0x73);

    lcd.set_cursor(0, 1).unwrap();
    assert_eq!(lcd.write_bytes(b"ok"), 2);
    drain(&mut lcd, &clock, 5, 20);

    let bus = lcd.release().release();
    assert_eq!(
        bus.writes,
        vec![
            (0x73, vec![254, 0x80 | 0x40]),
            (0x73, vec![b'o']),
            (0x73, vec![b'k']),
        ]
    );
}

#[test]
fn nack_is_a_transmission_failure() {
    let clock = MockTimeSource::new();
    let bus = MockI2c {
        nack: true,
        ..MockI2c::default()
    };
    let mut lcd: Lcd<'_> = SerLcd::new(I2cTransport::new(bus), &clock, DisplayConfig::default());

    lcd.home().unwrap();
    assert!(lcd.update());
    assert_eq!(lcd.last_error(), Some(DriverError::Transmission));

    assert!(!lcd.update());
    assert_eq!(lcd.state(), DisplayState::Error);
}
