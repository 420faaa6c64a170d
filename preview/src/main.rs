//! Desktop preview app for myrtio-zone-effects
//!
//! Renders a handful of lighting zones in a window with interactive
//! controls. All changes travel through the request channel, exactly as
//! they would on a device.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant as StdInstant;

use eframe::egui::{self};
use myrtio_zone_effects::{
    BreathingOptions, EffectEngine, GammaStage, Instant, LedZone, LedZoneConfig, OutputDriver,
    RampShape, RequestChannel, RequestSender, Rgb16, TickScheduler, ZoneCommand, ZonePipeline,
    ZoneRequest,
};

/// Maximum number of zones the engine supports
const MAX_ZONES: usize = 8;

/// Request channel size
const REQUEST_CHANNEL_SIZE: usize = 16;

/// Size of each zone swatch in pixels
const SWATCH_SIZE: f32 = 96.0;

/// Gap between swatches
const SWATCH_GAP: f32 = 8.0;

/// Static request channel for communication between UI and engine
static REQUESTS: RequestChannel<REQUEST_CHANNEL_SIZE> =
    RequestChannel::<REQUEST_CHANNEL_SIZE>::new();

/// Short captions for the preconfigured zones
const ZONE_CAPTIONS: [&str; 4] = ["plain", "top hold", "gamma out", "cubic + cal"];

/// Initial input colors, one per zone
const ZONE_SEEDS: [[u8; 3]; 4] = [
    [255, 180, 100],
    [60, 200, 255],
    [255, 70, 220],
    [255, 200, 40],
];

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([780.0, 440.0])
            .with_title("Zone Effects Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "myrtio-zone-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

/// Output driver that hands rendered frames to the UI.
struct SharedFrame {
    latest: Rc<RefCell<Vec<Rgb16>>>,
}

impl OutputDriver for SharedFrame {
    fn write(&mut self, colors: &[Rgb16]) {
        let mut latest = self.latest.borrow_mut();
        latest.clear();
        latest.extend_from_slice(colors);
    }
}

/// Expand an 8-bit UI color to the engine's 16-bit range.
const fn widen(color: [u8; 3]) -> Rgb16 {
    Rgb16 {
        r: color[0] as u16 * 257,
        g: color[1] as u16 * 257,
        b: color[2] as u16 * 257,
    }
}

/// Collapse a 16-bit zone color to a display color.
#[allow(clippy::cast_possible_truncation)]
fn narrow(color: Rgb16) -> egui::Color32 {
    egui::Color32::from_rgb((color.r >> 8) as u8, (color.g >> 8) as u8, (color.b >> 8) as u8)
}

struct PreviewApp {
    /// The scheduler driving the engine
    scheduler: TickScheduler<'static, SharedFrame, MAX_ZONES, REQUEST_CHANNEL_SIZE>,
    /// Request sender for UI changes
    sender: RequestSender<'static, REQUEST_CHANNEL_SIZE>,
    /// Latest rendered frame, shared with the output driver
    latest_frame: Rc<RefCell<Vec<Rgb16>>>,
    /// Deadline of the next engine tick in synthetic milliseconds
    next_deadline_ms: u64,

    // UI state (tracked to detect changes and send requests)
    /// Zone the controls currently address
    selected_zone: u8,
    /// Synthetic time in milliseconds
    t_ms: u64,
    /// Wall-clock reference for delta time
    last_frame: StdInstant,
    /// Whether animation is playing
    playing: bool,
    /// Time scale multiplier (1.0 = realtime)
    time_scale: f32,
    /// Input color for the selected zone
    color: [u8; 3],
    /// Color cycle period in ticks
    cycle_period: u16,
    /// Whether the color cycle is enabled
    cycle_enabled: bool,
    /// Breathing period in ticks
    breathing_period: u16,
    /// Whether breathing is enabled
    breathing_enabled: bool,
    /// Swatch edge length for display
    swatch_size: f32,
}

impl PreviewApp {
    fn new() -> Self {
        let configs = [
            LedZoneConfig::default(),
            LedZoneConfig {
                breathing: BreathingOptions {
                    top_hold: true,
                    ..BreathingOptions::default()
                },
                ..LedZoneConfig::default()
            },
            LedZoneConfig {
                pipeline: ZonePipeline {
                    gamma: GammaStage::Output,
                    ..ZonePipeline::default()
                },
                breathing: BreathingOptions {
                    top_hold: true,
                    bottom_hold: true,
                    ..BreathingOptions::default()
                },
            },
            LedZoneConfig {
                pipeline: ZonePipeline {
                    calibration: Some([255, 255, 255]),
                    ..ZonePipeline::default()
                },
                breathing: BreathingOptions {
                    top_hold: true,
                    bottom_hold: true,
                    shape: RampShape::Cubic,
                },
            },
        ];

        let engine = EffectEngine::<MAX_ZONES, REQUEST_CHANNEL_SIZE>::new(
            REQUESTS.receiver(),
            &configs,
        );
        let latest_frame = Rc::new(RefCell::new(Vec::new()));
        let scheduler = TickScheduler::new(
            engine,
            SharedFrame {
                latest: Rc::clone(&latest_frame),
            },
        );
        let sender = REQUESTS.sender();

        // Seed each zone with a distinct input color
        for (zone, seed) in ZONE_SEEDS.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let request = ZoneRequest {
                zone: zone as u8,
                command: ZoneCommand::SetInputColor(widen(*seed)),
            };
            let _ = sender.try_send(request);
        }

        Self {
            scheduler,
            sender,
            latest_frame,
            next_deadline_ms: 0,
            selected_zone: 0,
            t_ms: 0,
            last_frame: StdInstant::now(),
            playing: true,
            time_scale: 1.0,
            color: ZONE_SEEDS[0],
            cycle_period: 300,
            cycle_enabled: false,
            breathing_period: 120,
            breathing_enabled: false,
            swatch_size: SWATCH_SIZE,
        }
    }

    /// Send a request addressed to the selected zone
    fn send(&self, command: ZoneCommand) {
        let request = ZoneRequest {
            zone: self.selected_zone,
            command,
        };
        let _ = self.sender.try_send(request);
    }

    /// Pull the selected zone's parameters back into the controls
    fn load_zone_controls(&mut self) {
        let Some(zone) = self.scheduler.engine().zone(self.selected_zone) else {
            return;
        };
        let params = zone.params();
        self.cycle_enabled = params.color_cycle.enabled;
        if params.color_cycle.period > 0 {
            self.cycle_period = params.color_cycle.period;
        }
        self.breathing_enabled = params.breathing.enabled;
        if params.breathing.period > 0 {
            self.breathing_period = params.breathing.period;
        }
    }

    /// Toggle playing state
    fn toggle_playing(&mut self) {
        self.playing = !self.playing;
    }

    /// Update synthetic time based on wall clock and time scale
    fn update_time(&mut self) {
        let now = StdInstant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        if self.playing {
            let delta_ms_f64 = delta.as_secs_f64() * 1000.0 * f64::from(self.time_scale);
            let delta_ms_f64 = if delta_ms_f64.is_finite() {
                #[allow(clippy::cast_precision_loss)]
                delta_ms_f64.clamp(0.0, u64::MAX as f64)
            } else {
                0.0
            };
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let delta_ms = delta_ms_f64 as u64;
            self.t_ms = self.t_ms.wrapping_add(delta_ms);
        }
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Update synthetic time
        self.update_time();

        // Run engine ticks as their deadlines come due; the scheduler folds
        // larger time jumps into zone drift on its own
        if self.t_ms >= self.next_deadline_ms {
            let result = self.scheduler.tick(Instant::from_millis(self.t_ms));
            self.next_deadline_ms = result.next_deadline.as_millis();
        }
        let frame = self.latest_frame.borrow().clone();

        // Request continuous repaint for animation
        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                // <PlaybackControls>
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        if ui
                            .button(if self.playing { "⏸ Pause" } else { "▶ Play" })
                            .clicked()
                        {
                            self.toggle_playing();
                        }
                        ui.add_space(8.0);
                        let secs = self.t_ms / 1000;
                        let ms = self.t_ms % 1000;
                        ui.label(format!("Time: {secs}.{ms:03}s"));
                    });

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        ui.label("Speed:");
                        ui.add(egui::Slider::new(&mut self.time_scale, 0.1..=20.0).logarithmic(true));
                    });

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        ui.label("Size:");
                        ui.add(egui::Slider::new(&mut self.swatch_size, 32.0..=160.0));
                    });
                });
                // </PlaybackControls>

                ui.add_space(16.0);

                // <ZoneSelector>
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label("Zone:");
                        let old_zone = self.selected_zone;
                        egui::ComboBox::from_id_salt("zone_selector")
                            .selected_text(format!("zone {}", self.selected_zone))
                            .show_ui(ui, |ui| {
                                for (zone, caption) in ZONE_CAPTIONS.iter().enumerate() {
                                    #[allow(clippy::cast_possible_truncation)]
                                    ui.selectable_value(
                                        &mut self.selected_zone,
                                        zone as u8,
                                        format!("zone {zone} ({caption})"),
                                    );
                                }
                            });
                        if self.selected_zone != old_zone {
                            self.load_zone_controls();
                        }
                    });

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        ui.label("Color:");
                        let old_color = self.color;
                        if ui.color_edit_button_srgb(&mut self.color).changed()
                            && old_color != self.color
                        {
                            self.send(ZoneCommand::SetInputColor(widen(self.color)));
                        }

                        ui.add_space(8.0);

                        ui.label("Drift:");
                        if ui.button("+5").clicked() {
                            self.send(ZoneCommand::AddCycleDrift(5));
                            self.send(ZoneCommand::AddBreathingDrift(5));
                        }
                        if ui.button("-5").clicked() {
                            self.send(ZoneCommand::AddCycleDrift(-5));
                            self.send(ZoneCommand::AddBreathingDrift(-5));
                        }
                    });
                });
                // </ZoneSelector>
            });

            ui.add_space(12.0);

            // <EffectControls>
            ui.horizontal(|ui| {
                ui.label("Cycle:");
                let old_enabled = self.cycle_enabled;
                ui.checkbox(&mut self.cycle_enabled, "enabled");
                if self.cycle_enabled != old_enabled {
                    self.send(ZoneCommand::SetColorCycleEnabled(self.cycle_enabled));
                }

                ui.label("period:");
                ui.add(egui::DragValue::new(&mut self.cycle_period).range(1..=2000));
                // Both restart flavors arm the cycle.
                if ui.button("Restart").clicked() {
                    self.send(ZoneCommand::ResetColorCycle {
                        period: self.cycle_period,
                    });
                    self.cycle_enabled = true;
                }
                if ui.button("Rephase").clicked() {
                    self.send(ZoneCommand::RecalculateColorCycle {
                        period: self.cycle_period,
                    });
                    self.cycle_enabled = true;
                }
            });

            ui.add_space(4.0);

            ui.horizontal(|ui| {
                ui.label("Breathing:");
                let old_enabled = self.breathing_enabled;
                ui.checkbox(&mut self.breathing_enabled, "enabled");
                if self.breathing_enabled != old_enabled {
                    self.send(ZoneCommand::SetBreathingEnabled(self.breathing_enabled));
                }

                ui.label("period:");
                let min_period = self
                    .scheduler
                    .engine()
                    .zone(self.selected_zone)
                    .map_or(2, LedZone::min_breathing_period);
                ui.add(egui::DragValue::new(&mut self.breathing_period).range(min_period..=2000));
                if ui.button("Restart").clicked() {
                    self.send(ZoneCommand::ResetBreathing {
                        period: self.breathing_period,
                    });
                    self.breathing_enabled = true;
                }
                if ui.button("Pass-through").clicked() {
                    self.send(ZoneCommand::SetBreathingPassThrough);
                }
            });
            // </EffectControls>

            ui.add_space(16.0);

            // === Zone Display ===
            let pitch = self.swatch_size + SWATCH_GAP;
            #[allow(clippy::cast_precision_loss)]
            let width = frame.len() as f32 * pitch;
            let (response, painter) =
                ui.allocate_painter(egui::vec2(width, self.swatch_size), egui::Sense::hover());
            let origin = response.rect.min;

            #[allow(clippy::cast_precision_loss)]
            for (zone, color) in frame.iter().enumerate() {
                let x = origin.x + zone as f32 * pitch;
                let rect = egui::Rect::from_min_size(
                    egui::pos2(x, origin.y),
                    egui::vec2(self.swatch_size, self.swatch_size),
                );
                painter.rect_filled(rect, 6.0, narrow(*color));
                if zone == usize::from(self.selected_zone) {
                    painter.rect_stroke(
                        rect,
                        6.0,
                        egui::Stroke::new(2.0, egui::Color32::WHITE),
                        egui::StrokeKind::Outside,
                    );
                }
            }
        });
    }
}
