//! Fixed-point conversion between 16-bit RGB and Q4.27 HSV.
//!
//! Both directions run on integer arithmetic only. Round-tripping a color
//! through HSV and back reproduces the original channels exactly.

use crate::fixmath::{div_q, mul_q_round, udiv_q_round};

use super::{HSV_FRAC_BITS, HSV_ONE, Hsv, Rgb16};

const CHANNEL_MAX: u32 = u16::MAX as u32;

/// Convert a 16-bit RGB color to HSV.
///
/// Achromatic inputs (all channels equal, including black) come back with
/// both hue and saturation at zero. Hue lands in `[0, HSV_ONE)`.
#[allow(clippy::cast_possible_wrap)]
pub fn rgb_to_hsv(rgb: Rgb16) -> Hsv {
    let r = u32::from(rgb.r);
    let g = u32::from(rgb.g);
    let b = u32::from(rgb.b);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = udiv_q_round(max, 0, CHANNEL_MAX, 0, HSV_FRAC_BITS) as i32;
    if delta == 0 {
        return Hsv::new(0, 0, v);
    }
    let s = udiv_q_round(delta, 0, max, 0, HSV_FRAC_BITS) as i32;

    // Per-channel complements, each in [0, HSV_ONE].
    let rc = udiv_q_round(max - r, 0, delta, 0, HSV_FRAC_BITS) as i32;
    let gc = udiv_q_round(max - g, 0, delta, 0, HSV_FRAC_BITS) as i32;
    let bc = udiv_q_round(max - b, 0, delta, 0, HSV_FRAC_BITS) as i32;

    // Hue in sixths of a turn, offset by the dominant channel.
    let raw = if max == r {
        bc - gc
    } else if max == g {
        2 * HSV_ONE + rc - bc
    } else {
        4 * HSV_ONE + gc - rc
    };
    let mut h = div_q(raw, HSV_FRAC_BITS, 6, 0, HSV_FRAC_BITS);
    if h < 0 {
        h += HSV_ONE;
    }
    Hsv::new(h, s, v)
}

/// Convert a Q4.27 HSV color to 16-bit RGB.
///
/// Saturation and value are clamped to `[0, HSV_ONE]` first. Hue may sit
/// anywhere on the circle; it is reduced to a sextant plus fraction.
#[allow(clippy::cast_possible_truncation)]
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb16 {
    let s = hsv.s.clamp(0, HSV_ONE);
    let v = hsv.v.clamp(0, HSV_ONE);
    let vv = to_channel(v);
    if s == 0 {
        return Rgb16 {
            r: vv,
            g: vv,
            b: vv,
        };
    }

    let h6 = i64::from(hsv.h) * 6;
    let sextant = ((h6 >> HSV_FRAC_BITS) as i32).rem_euclid(6);
    let frac = (h6 - ((h6 >> HSV_FRAC_BITS) << HSV_FRAC_BITS)) as i32;

    let p = mul_q_round(v, HSV_FRAC_BITS, HSV_ONE - s, HSV_FRAC_BITS, HSV_FRAC_BITS);
    let sf = mul_q_round(s, HSV_FRAC_BITS, frac, HSV_FRAC_BITS, HSV_FRAC_BITS);
    let q = mul_q_round(v, HSV_FRAC_BITS, HSV_ONE - sf, HSV_FRAC_BITS, HSV_FRAC_BITS);
    let sr = mul_q_round(
        s,
        HSV_FRAC_BITS,
        HSV_ONE - frac,
        HSV_FRAC_BITS,
        HSV_FRAC_BITS,
    );
    let t = mul_q_round(v, HSV_FRAC_BITS, HSV_ONE - sr, HSV_FRAC_BITS, HSV_FRAC_BITS);

    let (r, g, b) = match sextant {
        0 => (vv, to_channel(t), to_channel(p)),
        1 => (to_channel(q), vv, to_channel(p)),
        2 => (to_channel(p), vv, to_channel(t)),
        3 => (to_channel(p), to_channel(q), vv),
        4 => (to_channel(t), to_channel(p), vv),
        _ => (vv, to_channel(p), to_channel(q)),
    };
    Rgb16 { r, g, b }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
fn to_channel(value: i32) -> u16 {
    mul_q_round(value, HSV_FRAC_BITS, CHANNEL_MAX as i32, 0, 0).clamp(0, CHANNEL_MAX as i32) as u16
}
