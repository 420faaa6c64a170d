//! Per-zone lighting effects.
//!
//! Each effect drives a single HSV component: the color cycle moves hue,
//! breathing scales value. Parameters and state are kept in separate
//! structs so callers can snapshot and restore a zone without touching
//! its configuration.

mod breathing;
mod color_cycle;

pub use breathing::{BreathingOptions, BreathingParams, BreathingPhase, BreathingState, RampShape};
pub use color_cycle::ColorCycleParams;
