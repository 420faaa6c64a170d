//! sRGB-to-linear gamma conversion.
//!
//! Two independent paths: an 8-bit table lookup and a 16-bit fixed-point
//! power series. Both approximate `y = x^2.2`. The series path computes
//! `x^0.2` from a truncated Taylor expansion around `x = 1` and multiplies
//! by `x^2`, entirely in Q4.27.

use crate::color::{HSV_FRAC_BITS, HSV_ONE, Rgb16};
use crate::fixmath::{mul_q_round, udiv_q_round};

/// Precomputed `x^2.2` lookup table for 8-bit samples.
pub const GAMMA8: [u8; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 2, 2, 2, 2, 2, 2, 2, 3, 3, 3, 3,
    3, 4, 4, 4, 4, 5, 5, 5, 5, 6, 6, 6,
    6, 7, 7, 7, 8, 8, 8, 9, 9, 9, 10, 10,
    11, 11, 11, 12, 12, 13, 13, 13, 14, 14, 15, 15,
    16, 16, 17, 17, 18, 18, 19, 19, 20, 20, 21, 22,
    22, 23, 23, 24, 25, 25, 26, 26, 27, 28, 28, 29,
    30, 30, 31, 32, 33, 33, 34, 35, 35, 36, 37, 38,
    39, 39, 40, 41, 42, 43, 43, 44, 45, 46, 47, 48,
    49, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59,
    60, 61, 62, 63, 64, 65, 66, 67, 68, 69, 70, 71,
    73, 74, 75, 76, 77, 78, 79, 81, 82, 83, 84, 85,
    87, 88, 89, 90, 91, 93, 94, 95, 97, 98, 99, 100,
    102, 103, 105, 106, 107, 109, 110, 111, 113, 114, 116, 117,
    119, 120, 121, 123, 124, 126, 127, 129, 130, 132, 133, 135,
    137, 138, 140, 141, 143, 145, 146, 148, 149, 151, 153, 154,
    156, 158, 159, 161, 163, 165, 166, 168, 170, 172, 173, 175,
    177, 179, 181, 182, 184, 186, 188, 190, 192, 194, 196, 197,
    199, 201, 203, 205, 207, 209, 211, 213, 215, 217, 219, 221,
    223, 225, 227, 229, 231, 234, 236, 238, 240, 242, 244, 246,
    248, 251, 253, 255,
];

/// Taylor coefficients of `x^0.2` around `x = 1`, Q4.27.
///
/// Term `k` of the expansion is `COEFFICIENTS[k - 1] * (x - 1)^k`.
const COEFFICIENTS: [i32; 5] = [26_843_546, -10_737_418, 6_442_451, -4_509_716, 3_427_384];

/// Number of series terms used by the 16-bit path.
///
/// Higher orders cost one extra multiply-accumulate each and tighten the
/// approximation; order five stays within 46/65535 of the exact curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SeriesOrder {
    First = 1,
    Second = 2,
    Third = 3,
    Fourth = 4,
    #[default]
    Fifth = 5,
}

impl SeriesOrder {
    /// Parse a raw order value, rejecting anything outside 1..=5.
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            1 => Self::First,
            2 => Self::Second,
            3 => Self::Third,
            4 => Self::Fourth,
            5 => Self::Fifth,
            _ => return None,
        })
    }

    const fn terms(self) -> usize {
        self as usize
    }
}

/// Linearize an 8-bit sRGB sample via table lookup.
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn linearize8(value: u8) -> u8 {
    GAMMA8[value as usize]
}

/// Linearize a 16-bit sRGB sample via the power series.
///
/// Exact at both ends of the domain: 0 maps to 0 and 65535 to 65535.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
pub fn linearize16(value: u16, order: SeriesOrder) -> u16 {
    let normalized = udiv_q_round(u32::from(value), 0, 65535, 0, HSV_FRAC_BITS) as i32;
    let delta = normalized - HSV_ONE;

    // x^0.2 = 1 + c1*d + c2*d^2 + ...
    let mut series = HSV_ONE;
    let mut power = HSV_ONE;
    for coefficient in COEFFICIENTS.iter().take(order.terms()) {
        power = mul_q_round(power, HSV_FRAC_BITS, delta, HSV_FRAC_BITS, HSV_FRAC_BITS);
        series += mul_q_round(*coefficient, HSV_FRAC_BITS, power, HSV_FRAC_BITS, HSV_FRAC_BITS);
    }
    let series = series.clamp(0, HSV_ONE);

    // x^2.2 = x^0.2 * x^2
    let squared = mul_q_round(normalized, HSV_FRAC_BITS, normalized, HSV_FRAC_BITS, HSV_FRAC_BITS);
    let linear = mul_q_round(series, HSV_FRAC_BITS, squared, HSV_FRAC_BITS, HSV_FRAC_BITS);
    let linear = linear.clamp(0, HSV_ONE);

    mul_q_round(linear, HSV_FRAC_BITS, 65535, 0, 0) as u16
}

/// Linearize each channel of a 16-bit color independently.
pub fn linearize_rgb(color: Rgb16, order: SeriesOrder) -> Rgb16 {
    Rgb16 {
        r: linearize16(color.r, order),
        g: linearize16(color.g, order),
        b: linearize16(color.b, order),
    }
}
