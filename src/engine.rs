//! Zone effect engine.
//!
//! Drains queued zone requests, advances every zone once per tick, and
//! publishes the rendered frame, one color per zone.

#[cfg(feature = "esp32-log")]
use esp_println::println;
use heapless::Vec;

use crate::color::Rgb16;
use crate::command::{RequestReceiver, ZoneCommand, ZoneRequest};
use crate::zone::{LedZone, LedZoneConfig};

/// Effect engine - the main orchestrator.
///
/// `MAX_ZONES` bounds the number of zones the engine can drive; the
/// actual zone count comes from the configurations passed at build time.
pub struct EffectEngine<'a, const MAX_ZONES: usize, const CHANNEL_SIZE: usize> {
    // External dependencies
    requests: RequestReceiver<'a, CHANNEL_SIZE>,

    // Internal state
    zones: Vec<LedZone, MAX_ZONES>,
    frame: [Rgb16; MAX_ZONES],
}

impl<'a, const MAX_ZONES: usize, const CHANNEL_SIZE: usize>
    EffectEngine<'a, MAX_ZONES, CHANNEL_SIZE>
{
    /// Create a new engine over the given zone configurations.
    ///
    /// At most `MAX_ZONES` configurations are taken; extras are ignored.
    pub fn new(requests: RequestReceiver<'a, CHANNEL_SIZE>, configs: &[LedZoneConfig]) -> Self {
        let mut zones = Vec::new();
        for config in configs.iter().take(MAX_ZONES) {
            let _ = zones.push(LedZone::new(*config));
        }
        Self {
            requests,
            zones,
            frame: [Rgb16::default(); MAX_ZONES],
        }
    }

    /// Zones currently driven by the engine.
    pub fn zones(&self) -> &[LedZone] {
        &self.zones
    }

    /// Access one zone directly, bypassing the request channel.
    pub fn zone(&self, zone: u8) -> Option<&LedZone> {
        self.zones.get(usize::from(zone))
    }

    /// Mutable access to one zone, bypassing the request channel.
    pub fn zone_mut(&mut self, zone: u8) -> Option<&mut LedZone> {
        self.zones.get_mut(usize::from(zone))
    }

    /// Run one engine tick.
    ///
    /// This is the main loop step: drains pending requests, advances
    /// every zone, and re-renders the frame. Returns the frame, one color
    /// per configured zone.
    pub fn tick(&mut self) -> &[Rgb16] {
        self.process_requests();
        for (zone, slot) in self.zones.iter_mut().zip(self.frame.iter_mut()) {
            zone.execute_effects();
            *slot = zone.rendered_color();
        }
        &self.frame[..self.zones.len()]
    }

    /// Most recently rendered frame.
    pub fn frame(&self) -> &[Rgb16] {
        &self.frame[..self.zones.len()]
    }

    /// Add tick drift to both effects of every zone.
    pub fn add_drift(&mut self, ticks: i16) {
        for zone in &mut self.zones {
            zone.add_cycle_drift(ticks);
            zone.add_breathing_drift(ticks);
        }
    }

    /// Process pending requests from the channel (non-blocking).
    ///
    /// Requests naming an unknown zone or carrying a period their target
    /// cannot run are dropped.
    fn process_requests(&mut self) {
        while let Some(request) = self.requests.receive() {
            self.apply_request(request);
        }
    }

    fn apply_request(&mut self, request: ZoneRequest) {
        let Some(zone) = self.zones.get_mut(usize::from(request.zone)) else {
            #[cfg(feature = "esp32-log")]
            println!("[EffectEngine.apply_request] unknown zone {}", request.zone);
            return;
        };
        match request.command {
            ZoneCommand::SetInputColor(color) => zone.set_input_color(color),
            ZoneCommand::ResetColorCycle { period } => {
                if period == 0 {
                    #[cfg(feature = "esp32-log")]
                    println!(
                        "[EffectEngine.apply_request] zone {} rejects cycle period 0",
                        request.zone
                    );
                    return;
                }
                zone.reset_color_cycle(period);
            }
            ZoneCommand::RecalculateColorCycle { period } => {
                if period == 0 {
                    #[cfg(feature = "esp32-log")]
                    println!(
                        "[EffectEngine.apply_request] zone {} rejects cycle period 0",
                        request.zone
                    );
                    return;
                }
                zone.recalculate_color_cycle(period);
            }
            ZoneCommand::SetColorCycleEnabled(enabled) => zone.set_color_cycle_enabled(enabled),
            ZoneCommand::ResetBreathing { period } => {
                if period < zone.min_breathing_period() {
                    #[cfg(feature = "esp32-log")]
                    println!(
                        "[EffectEngine.apply_request] zone {} rejects breathing period {}",
                        request.zone, period
                    );
                    return;
                }
                zone.reset_breathing(period);
            }
            ZoneCommand::SetBreathingEnabled(enabled) => zone.set_breathing_enabled(enabled),
            ZoneCommand::SetBreathingPassThrough => zone.set_breathing_pass_through(),
            ZoneCommand::AddCycleDrift(ticks) => zone.add_cycle_drift(ticks),
            ZoneCommand::AddBreathingDrift(ticks) => zone.add_breathing_drift(ticks),
        }
    }
}
