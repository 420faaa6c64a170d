mod convert;

pub use convert::{hsv_to_rgb, rgb_to_hsv};
use smart_leds::RGB16;

/// RGB color with 16-bit channels.
pub type Rgb16 = RGB16;

/// Number of fractional bits in HSV components.
pub const HSV_FRAC_BITS: u32 = 27;

/// Fixed-point representation of 1.0 in HSV components.
pub const HSV_ONE: i32 = 1 << HSV_FRAC_BITS;

/// HSV color with Q4.27 fixed-point components.
///
/// All three components nominally live in `[0, HSV_ONE]`. Hue wraps around
/// the unit interval, so 0.0 and 1.0 name the same angle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    pub h: i32,
    pub s: i32,
    pub v: i32,
}

impl Hsv {
    pub const fn new(h: i32, s: i32, v: i32) -> Self {
        Self { h, s, v }
    }
}
