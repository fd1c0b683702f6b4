//! Backlight colour helpers.
//!
//! The display takes an 8-bit value per channel. These helpers let callers
//! work in `palette::Srgb` (0.0-1.0) or HSV and convert at the edge.

use palette::{FromColor, Hsv, Srgb};

/// Full white, the colour used when the display is (re)initialized.
pub const WHITE: Srgb = Srgb::new(1.0, 1.0, 1.0);

/// Backlight off.
pub const OFF: Srgb = Srgb::new(0.0, 0.0, 0.0);

/// Creates an RGB color from HSV (Hue, Saturation, Value) components.
#[inline]
pub fn hsv(hue: f32, saturation: f32, value: f32) -> Srgb {
    let hsv = Hsv::new(hue, saturation, value);
    Srgb::from_color(hsv)
}

/// Creates an RGB color from hue only (full saturation and value).
#[inline]
pub fn hue(hue: f32) -> Srgb {
    hsv(hue, 1.0, 1.0)
}

/// Converts a colour to the `(red, green, blue)` bytes sent to the display.
#[inline]
pub fn to_rgb8(color: Srgb) -> (u8, u8, u8) {
    let rgb: Srgb<u8> = color.into_format();
    (rgb.red, rgb.green, rgb.blue)
}
