//! Per-zone effect pipeline.
//!
//! A zone owns everything needed to turn an input color into a rendered
//! output: the effect parameters, the mutable effect state, and the
//! pipeline describing gamma placement and calibration. State and
//! parameters round-trip losslessly through their accessors so callers
//! can persist and restore zones across restarts.

use crate::calibration::apply_calibration_and_boost;
use crate::color::{HSV_ONE, Hsv, Rgb16, hsv_to_rgb, rgb_to_hsv};
use crate::effect::{
    BreathingOptions, BreathingParams, BreathingPhase, BreathingState, ColorCycleParams,
};
use crate::fixmath::clamp_abs;
use crate::gamma::{SeriesOrder, linearize_rgb};

/// Largest drift magnitude a zone accumulates per effect.
pub const DRIFT_LIMIT: i32 = 127;

/// Where gamma linearization runs in a zone's pipeline.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GammaStage {
    /// No linearization.
    #[default]
    Off,
    /// Linearize the input color before it enters the effects.
    Input,
    /// Linearize the effect output just before calibration.
    Output,
}

/// Color processing applied around the effects of one zone.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ZonePipeline {
    /// Gamma placement.
    pub gamma: GammaStage,
    /// Series order used by 16-bit linearization.
    pub series_order: SeriesOrder,
    /// Per-channel calibration gains, `None` to skip calibration.
    pub calibration: Option<[u8; 3]>,
}

/// Static configuration of one zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct LedZoneConfig {
    pub pipeline: ZonePipeline,
    pub breathing: BreathingOptions,
}

/// Effect parameters of one zone.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LedZoneEffectParams {
    pub color_cycle: ColorCycleParams,
    pub breathing: BreathingParams,
}

/// Mutable state of one zone.
///
/// `hsv_in` tracks the most recent input color, `hsv_out` the combined
/// effect output, and `rgb_out` its RGB rendering before the output
/// pipeline stages.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LedZoneState {
    pub cycle_index: u16,
    pub cycle_drift: i16,
    pub breathing: BreathingState,
    pub breathing_drift: i16,
    pub hsv_in: Hsv,
    pub hsv_out: Hsv,
    pub rgb_out: Rgb16,
}

/// One independently animated lighting zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct LedZone {
    pipeline: ZonePipeline,
    breathing_options: BreathingOptions,
    params: LedZoneEffectParams,
    state: LedZoneState,
}

impl LedZone {
    pub fn new(config: LedZoneConfig) -> Self {
        Self {
            pipeline: config.pipeline,
            breathing_options: config.breathing,
            params: LedZoneEffectParams::default(),
            state: LedZoneState::default(),
        }
    }

    pub const fn pipeline(&self) -> &ZonePipeline {
        &self.pipeline
    }

    pub const fn params(&self) -> &LedZoneEffectParams {
        &self.params
    }

    /// Replace the effect parameter block wholesale.
    pub fn set_params(&mut self, params: LedZoneEffectParams) {
        self.params = params;
    }

    pub const fn state(&self) -> &LedZoneState {
        &self.state
    }

    /// Replace the effect state wholesale, as read back by [`Self::state`].
    pub fn set_state(&mut self, state: LedZoneState) {
        self.state = state;
    }

    /// Smallest breathing period this zone's segment selection supports.
    pub const fn min_breathing_period(&self) -> u16 {
        self.breathing_options.segments()
    }

    /// Feed a new input color.
    ///
    /// The color is linearized first when the pipeline gamma stage sits on
    /// the input side.
    pub fn set_input_color(&mut self, color: Rgb16) {
        let color = if self.pipeline.gamma == GammaStage::Input {
            linearize_rgb(color, self.pipeline.series_order)
        } else {
            color
        };
        self.state.hsv_in = rgb_to_hsv(color);
    }

    /// Reconfigure the color cycle for `period` steps, restart it from
    /// hue zero, and enable it. `period` must be at least 1.
    pub fn reset_color_cycle(&mut self, period: u16) {
        self.params.color_cycle = ColorCycleParams {
            enabled: true,
            ..ColorCycleParams::from_period(period)
        };
        self.state.cycle_index = 0;
    }

    /// Reconfigure the color cycle for `period` steps while keeping the
    /// current hue phase, and enable it.
    ///
    /// The step index is re-derived from the output hue, so an ongoing
    /// sweep continues from where it is instead of snapping back to zero.
    /// `period` must be at least 1.
    pub fn recalculate_color_cycle(&mut self, period: u16) {
        self.params.color_cycle = ColorCycleParams {
            enabled: true,
            ..ColorCycleParams::from_period(period)
        };
        self.state.cycle_index = self.params.color_cycle.recalculated_index(self.state.hsv_out.h);
    }

    pub fn set_color_cycle_enabled(&mut self, enabled: bool) {
        self.params.color_cycle.enabled = enabled;
    }

    /// Reconfigure breathing for a breath of `period` ticks, restart the
    /// machine from its startup phase, and enable it.
    ///
    /// `period` must be at least [`Self::min_breathing_period`].
    pub fn reset_breathing(&mut self, period: u16) {
        self.params.breathing = BreathingParams {
            enabled: true,
            ..BreathingParams::from_period(period, self.breathing_options)
        };
        self.state.breathing = BreathingState {
            phase: BreathingPhase::Startup,
            ramp_index: 0,
            hold_index: 0,
        };
    }

    pub fn set_breathing_enabled(&mut self, enabled: bool) {
        self.params.breathing.enabled = enabled;
    }

    /// Park the breathing machine in its pass-through phase.
    ///
    /// Indices and parameters are left as they are; only a reset leaves
    /// pass-through again.
    pub fn set_breathing_pass_through(&mut self) {
        self.state.breathing.phase = BreathingPhase::PassThrough;
    }

    /// Add tick drift to the color cycle, saturating at
    /// [`DRIFT_LIMIT`] in either direction.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_cycle_drift(&mut self, ticks: i16) {
        self.state.cycle_drift =
            clamp_abs(i32::from(self.state.cycle_drift) + i32::from(ticks), DRIFT_LIMIT) as i16;
    }

    /// Add tick drift to breathing, saturating at [`DRIFT_LIMIT`] in
    /// either direction.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_breathing_drift(&mut self, ticks: i16) {
        self.state.breathing_drift =
            clamp_abs(i32::from(self.state.breathing_drift) + i32::from(ticks), DRIFT_LIMIT) as i16;
    }

    /// Run one effects tick.
    ///
    /// Each effect executes once per tick, twice while it owes positive
    /// drift, or not at all while it owes negative drift; a skipped effect
    /// leaves its output component untouched. The combined HSV output is
    /// rendered into `rgb_out` every tick regardless.
    pub fn execute_effects(&mut self) {
        let runs = drift_runs(&mut self.state.cycle_drift);
        for _ in 0..runs {
            if self.params.color_cycle.enabled {
                self.state.hsv_out.h = self.params.color_cycle.advance(&mut self.state.cycle_index);
            } else {
                self.state.hsv_out.h = self.state.hsv_in.h;
            }
        }
        // An active cycle always renders at full saturation.
        self.state.hsv_out.s = if self.params.color_cycle.enabled {
            HSV_ONE
        } else {
            self.state.hsv_in.s
        };
        let runs = drift_runs(&mut self.state.breathing_drift);
        for _ in 0..runs {
            self.state.hsv_out.v = self
                .params
                .breathing
                .advance(&mut self.state.breathing, self.state.hsv_in.v);
        }
        self.state.rgb_out = hsv_to_rgb(self.state.hsv_out);
    }

    /// Output color with the pipeline's output stages applied.
    pub fn rendered_color(&self) -> Rgb16 {
        let mut color = self.state.rgb_out;
        if self.pipeline.gamma == GammaStage::Output {
            color = linearize_rgb(color, self.pipeline.series_order);
        }
        if let Some(calibration) = self.pipeline.calibration {
            color = apply_calibration_and_boost(color, calibration).1;
        }
        color
    }
}

/// Executions an effect owes this tick, folding one unit of drift back in.
fn drift_runs(drift: &mut i16) -> u16 {
    if *drift > 0 {
        *drift -= 1;
        2
    } else if *drift < 0 {
        *drift += 1;
        0
    } else {
        1
    }
}
