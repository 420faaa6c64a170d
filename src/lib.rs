#![no_std]

pub mod calibration;
pub mod channel;
pub mod color;
pub mod command;
pub mod effect;
pub mod engine;
pub mod fixmath;
pub mod gamma;
pub mod tick_scheduler;
pub mod zone;

pub use calibration::apply_calibration_and_boost;
pub use command::{
    RequestChannel, RequestReceiver, RequestSender, ZoneCommand, ZoneId, ZoneRequest,
};
pub use engine::EffectEngine;
pub use tick_scheduler::{TickResult, TickScheduler};
pub use gamma::{GAMMA8, SeriesOrder};
pub use effect::{
    BreathingOptions, BreathingParams, BreathingPhase, BreathingState, ColorCycleParams, RampShape,
};
pub use zone::{
    GammaStage, LedZone, LedZoneConfig, LedZoneEffectParams, LedZoneState, ZonePipeline,
};

pub use color::{HSV_ONE, Hsv, Rgb16, hsv_to_rgb, rgb_to_hsv};
pub use embassy_time::{Duration, Instant};

/// Abstract output driver trait
///
/// Implement this trait to push rendered zone colors to the hardware.
/// The tick scheduler is generic over this trait.
pub trait OutputDriver {
    /// Write one rendered frame, one color per zone
    fn write(&mut self, colors: &[Rgb16]);
}
