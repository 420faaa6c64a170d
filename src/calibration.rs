//! Per-channel calibration with brightness boost.
//!
//! Calibration scales each channel by a byte-sized gain, which darkens the
//! output. The boost factor recovers as much of the original peak as the
//! per-die and whole-lamp current limits allow.

use crate::color::Rgb16;
use crate::fixmath::{udiv_q, umul_q, umul_q_round};

/// Continuous current limit of a single LED die, in milliamperes.
pub const DIE_CURRENT_LIMIT_MA: u32 = 20;

/// Continuous current limit of the whole lamp, in milliamperes.
pub const LAMP_CURRENT_LIMIT_MA: u32 = 50;

/// Number of fractional bits in the boost factor.
pub const BOOST_FRAC_BITS: u32 = 16;

/// Die-to-lamp current ratio in Q16.16.
const CURRENT_RATIO: u32 = (DIE_CURRENT_LIMIT_MA << BOOST_FRAC_BITS) / LAMP_CURRENT_LIMIT_MA;

const CHANNEL_MAX: u32 = u16::MAX as u32;

/// Apply per-channel calibration gains and the current-limited boost.
///
/// Returns the Q16.16 boost factor together with the adjusted color. Each
/// output channel stays within 16 bits for any input and any calibration.
/// A color that calibrates to all-zero gains comes back black with a zero
/// boost.
#[allow(clippy::cast_possible_truncation)]
pub fn apply_calibration_and_boost(rgb: Rgb16, calibration: [u8; 3]) -> (u32, Rgb16) {
    let gains = [
        u32::from(rgb.r) * u32::from(calibration[0]),
        u32::from(rgb.g) * u32::from(calibration[1]),
        u32::from(rgb.b) * u32::from(calibration[2]),
    ];
    let lamp_load = umul_q(gains[0] + gains[1] + gains[2], 0, CURRENT_RATIO, BOOST_FRAC_BITS, 0);
    let limit = gains[0].max(gains[1]).max(gains[2]).max(lamp_load);
    if limit == 0 {
        return (0, Rgb16 { r: 0, g: 0, b: 0 });
    }

    let peak = u32::from(rgb.r).max(u32::from(rgb.g)).max(u32::from(rgb.b));
    let boost = udiv_q(peak, 0, limit, 0, BOOST_FRAC_BITS);
    let boosted = |gain: u32| -> u16 {
        umul_q_round(gain, 0, boost, BOOST_FRAC_BITS, 0).min(CHANNEL_MAX) as u16
    };
    (
        boost,
        Rgb16 {
            r: boosted(gains[0]),
            g: boosted(gains[1]),
            b: boosted(gains[2]),
        },
    )
}
