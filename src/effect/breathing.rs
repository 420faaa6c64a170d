//! Breathing effect driven by a segmented ramp machine.
//!
//! A full breath splits its period evenly across the active segments:
//! ramp up, an optional hold at the top, ramp down, and an optional hold
//! at the bottom. Every tick advances the machine one step and scales the
//! input value by the current ramp fraction.

use crate::color::{HSV_FRAC_BITS, HSV_ONE};
use crate::fixmath::{mul_q, mul_q_round};

/// Shape of the ramp segments.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RampShape {
    /// Brightness tracks the ramp fraction directly.
    #[default]
    Linear,
    /// Brightness follows the cube of the ramp fraction.
    Cubic,
}

impl RampShape {
    /// Map a linear ramp fraction to the brightness fraction.
    pub fn apply(self, frac: i32) -> i32 {
        match self {
            Self::Linear => frac,
            Self::Cubic => {
                let squared = mul_q_round(frac, HSV_FRAC_BITS, frac, HSV_FRAC_BITS, HSV_FRAC_BITS);
                mul_q_round(squared, HSV_FRAC_BITS, frac, HSV_FRAC_BITS, HSV_FRAC_BITS)
            }
        }
    }
}

/// Segment selection and ramp shape for one zone.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BreathingOptions {
    /// Hold at full brightness between ramp up and ramp down.
    pub top_hold: bool,
    /// Hold at zero brightness between ramp down and ramp up.
    pub bottom_hold: bool,
    /// Shape applied to both ramps.
    pub shape: RampShape,
}

impl BreathingOptions {
    /// Number of segments a full breath is split into.
    #[allow(clippy::cast_lossless)]
    pub const fn segments(self) -> u16 {
        2 + self.top_hold as u16 + self.bottom_hold as u16
    }
}

/// Breathing configuration for one zone.
///
/// The per-segment fields are normally derived from the overall period
/// with [`BreathingParams::from_period`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BreathingParams {
    /// Ticks per full breath.
    pub period: u16,
    /// Ticks spent in each ramp segment.
    pub ramp_period: u16,
    /// Ticks held at full brightness, zero to skip the segment.
    pub top_period: u16,
    /// Ticks held at zero brightness, zero to skip the segment.
    pub bottom_period: u16,
    /// Ramp fraction increment per tick, Q4.27.
    pub slope: i32,
    /// Shape applied to both ramps.
    pub shape: RampShape,
    /// Whether hold segments may elapse.
    pub enabled: bool,
}

/// Phase of the breathing machine.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BreathingPhase {
    /// Input value is forwarded untouched. Terminal until a reset.
    #[default]
    PassThrough,
    /// One-tick phase that zeroes the indices and emits black.
    Startup,
    /// Brightness climbs from zero to full.
    RampUp,
    /// Brightness held at full.
    TopHold,
    /// Brightness falls from full to zero.
    RampDown,
    /// Brightness held at zero.
    BottomHold,
}

/// Mutable breathing position, owned by the caller alongside the zone.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BreathingState {
    pub phase: BreathingPhase,
    pub ramp_index: u16,
    pub hold_index: u16,
}

impl BreathingParams {
    /// Build disabled parameters for a breath of `period` ticks.
    ///
    /// The period is split evenly across the segments enabled in
    /// `options`, truncating when it does not divide. `period` must be at
    /// least [`BreathingOptions::segments`] so every segment gets a tick.
    #[allow(clippy::cast_lossless)]
    pub const fn from_period(period: u16, options: BreathingOptions) -> Self {
        let ramp_period = period / options.segments();
        Self {
            period,
            ramp_period,
            top_period: if options.top_hold { ramp_period } else { 0 },
            bottom_period: if options.bottom_hold { ramp_period } else { 0 },
            slope: HSV_ONE / ramp_period as i32,
            shape: options.shape,
            enabled: false,
        }
    }

    /// Advance the machine one tick and return the scaled value.
    ///
    /// Ramps move regardless of the enabled flag; only hold segments wait
    /// for it, so a disabled zone parks at whichever hold it reaches.
    pub fn advance(&self, state: &mut BreathingState, input_value: i32) -> i32 {
        match state.phase {
            BreathingPhase::PassThrough => input_value,
            BreathingPhase::Startup => {
                state.ramp_index = 0;
                state.hold_index = 0;
                state.phase = BreathingPhase::RampUp;
                0
            }
            BreathingPhase::RampUp => {
                state.ramp_index = state.ramp_index.saturating_add(1);
                if state.ramp_index >= self.ramp_period {
                    state.ramp_index = self.ramp_period;
                    if self.top_period > 0 {
                        state.hold_index = 0;
                        state.phase = BreathingPhase::TopHold;
                    } else {
                        state.phase = BreathingPhase::RampDown;
                    }
                    // ramp_period * slope can undershoot 1.0; the peak
                    // tick must be exact.
                    return input_value;
                }
                self.scaled(state.ramp_index, input_value)
            }
            BreathingPhase::TopHold => {
                if self.enabled {
                    state.hold_index = state.hold_index.saturating_add(1);
                    if state.hold_index >= self.top_period {
                        state.hold_index = 0;
                        state.phase = BreathingPhase::RampDown;
                    }
                }
                input_value
            }
            BreathingPhase::RampDown => {
                state.ramp_index = state.ramp_index.saturating_sub(1);
                if state.ramp_index == 0 {
                    if self.bottom_period > 0 {
                        state.hold_index = 0;
                        state.phase = BreathingPhase::BottomHold;
                    } else {
                        state.phase = BreathingPhase::RampUp;
                    }
                    return 0;
                }
                self.scaled(state.ramp_index, input_value)
            }
            BreathingPhase::BottomHold => {
                if self.enabled {
                    state.hold_index = state.hold_index.saturating_add(1);
                    if state.hold_index >= self.bottom_period {
                        state.hold_index = 0;
                        state.ramp_index = 0;
                        state.phase = BreathingPhase::RampUp;
                    }
                }
                0
            }
        }
    }

    fn scaled(&self, ramp_index: u16, input_value: i32) -> i32 {
        let frac = mul_q(i32::from(ramp_index), 0, self.slope, HSV_FRAC_BITS, HSV_FRAC_BITS)
            .clamp(0, HSV_ONE);
        let frac = self.shape.apply(frac);
        mul_q_round(input_value, HSV_FRAC_BITS, frac, HSV_FRAC_BITS, HSV_FRAC_BITS)
    }
}
