//! Hue ramp stepping around the color wheel.

use crate::color::{HSV_FRAC_BITS, HSV_ONE};
use crate::fixmath::{mul_q, mul_q_round};

/// Color cycle configuration for one zone.
///
/// `slope` is the hue increment per step and is normally derived from
/// `period` with [`ColorCycleParams::from_period`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ColorCycleParams {
    /// Steps per full trip around the color wheel, at least 1.
    pub period: u16,
    /// Hue increment per step, Q4.27.
    pub slope: i32,
    /// Whether the cycle drives the output hue.
    pub enabled: bool,
}

impl ColorCycleParams {
    /// Build a disabled cycle covering the wheel in `period` steps.
    ///
    /// `period` must be at least 1.
    #[allow(clippy::cast_lossless)]
    pub const fn from_period(period: u16) -> Self {
        Self {
            period,
            slope: HSV_ONE / period as i32,
            enabled: false,
        }
    }

    /// Advance the cycle one step and return the new hue.
    ///
    /// The index is incremented before the hue is read, so the first step
    /// after a reset already moves off zero. Reaching `period` wraps both
    /// the index and the hue back to zero.
    pub fn advance(&self, index: &mut u16) -> i32 {
        *index = index.saturating_add(1);
        if *index >= self.period {
            *index = 0;
            return 0;
        }
        mul_q(i32::from(*index), 0, self.slope, HSV_FRAC_BITS, HSV_FRAC_BITS)
    }

    /// Step index whose hue is nearest to `hue` under these parameters.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn recalculated_index(&self, hue: i32) -> u16 {
        let index = mul_q_round(hue, HSV_FRAC_BITS, i32::from(self.period), 0, 0);
        let last = (i32::from(self.period) - 1).max(0);
        index.clamp(0, last) as u16
    }
}
