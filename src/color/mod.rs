//! Color types and brightness helpers shared by the effect library.

use smart_leds::{hsv::Hsv as HSV, RGB8};

pub use smart_leds::hsv::hsv2rgb;

pub type Rgb = RGB8;
pub type Hsv = HSV;

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};
pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
pub const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
pub const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
pub const ORANGE: Rgb = Rgb {
    r: 255,
    g: 165,
    b: 0,
};
pub const FADED_BLUE: Rgb = Rgb { r: 0, g: 0, b: 31 };

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Scale a single channel by a brightness factor.
///
/// Plain `value * brightness / 255` with integer truncation. All devices
/// must truncate identically for visual parity, so this is deliberately
/// not the `(value * (brightness + 1)) >> 8` approximation.
#[inline]
pub const fn scale_channel(value: u8, brightness: u8) -> u8 {
    ((value as u16 * brightness as u16) / 255) as u8
}

/// Scale a color by a brightness factor (0 = black, 255 = unchanged).
#[inline]
pub const fn dimmed(color: Rgb, brightness: u8) -> Rgb {
    Rgb {
        r: scale_channel(color.r, brightness),
        g: scale_channel(color.g, brightness),
        b: scale_channel(color.b, brightness),
    }
}
