mod tests {
    use myrtio_zone_effects::channel::QueueFull;
    use myrtio_zone_effects::color::HSV_ONE;
    use myrtio_zone_effects::{
        BreathingOptions, BreathingPhase, EffectEngine, GammaStage, LedZoneConfig, RampShape,
        RequestChannel, RequestSender, Rgb16, ZoneCommand, ZonePipeline, ZoneRequest,
    };

    const RED: Rgb16 = Rgb16 {
        r: 65535,
        g: 0,
        b: 0,
    };
    const WHITE: Rgb16 = Rgb16 {
        r: 65535,
        g: 65535,
        b: 65535,
    };
    const BLACK: Rgb16 = Rgb16 { r: 0, g: 0, b: 0 };

    fn request(sender: &RequestSender<'_, 8>, zone: u8, command: ZoneCommand) {
        sender.try_send(ZoneRequest { zone, command }).unwrap();
    }

    #[test]
    fn test_tick_renders_one_color_per_zone() {
        let channel = RequestChannel::<8>::new();
        let configs = [LedZoneConfig::default(); 2];
        let mut engine = EffectEngine::<4, 8>::new(channel.receiver(), &configs);

        assert_eq!(engine.zones().len(), 2);
        assert_eq!(engine.tick(), &[BLACK, BLACK]);
        assert_eq!(engine.frame().len(), 2);
    }

    #[test]
    fn test_extra_configs_are_ignored() {
        let channel = RequestChannel::<8>::new();
        let configs = [LedZoneConfig::default(); 3];
        let engine = EffectEngine::<2, 8>::new(channel.receiver(), &configs);

        assert_eq!(engine.zones().len(), 2);
        assert!(engine.zone(2).is_none());
    }

    #[test]
    fn test_input_color_passes_through_idle_zone() {
        let channel = RequestChannel::<8>::new();
        let sender = channel.sender();
        let configs = [LedZoneConfig::default(); 2];
        let mut engine = EffectEngine::<4, 8>::new(channel.receiver(), &configs);

        request(&sender, 1, ZoneCommand::SetInputColor(RED));
        assert_eq!(engine.tick(), &[BLACK, RED]);
    }

    #[test]
    fn test_color_cycle_over_requests() {
        let channel = RequestChannel::<8>::new();
        let sender = channel.sender();
        let configs = [LedZoneConfig::default()];
        let mut engine = EffectEngine::<1, 8>::new(channel.receiver(), &configs);

        // The reset alone arms the cycle.
        request(&sender, 0, ZoneCommand::SetInputColor(WHITE));
        request(&sender, 0, ZoneCommand::ResetColorCycle { period: 4 });

        let quarter = HSV_ONE / 4;
        let mut hues = [0; 4];
        let mut last = BLACK;
        for slot in &mut hues {
            last = engine.tick()[0];
            *slot = engine.zone(0).unwrap().state().hsv_out.h;
        }
        assert_eq!(hues, [quarter, 2 * quarter, 3 * quarter, 0]);
        // Hue wrapped back to zero on the last tick, at full saturation.
        assert_eq!(last, RED);
    }

    #[test]
    fn test_unknown_zone_request_is_dropped() {
        let channel = RequestChannel::<8>::new();
        let sender = channel.sender();
        let configs = [LedZoneConfig::default(); 2];
        let mut engine = EffectEngine::<4, 8>::new(channel.receiver(), &configs);

        request(&sender, 5, ZoneCommand::SetColorCycleEnabled(true));
        engine.tick();
        assert!(!engine.zone(0).unwrap().params().color_cycle.enabled);
        assert!(!engine.zone(1).unwrap().params().color_cycle.enabled);
    }

    #[test]
    fn test_zero_period_cycle_requests_are_dropped() {
        let channel = RequestChannel::<8>::new();
        let sender = channel.sender();
        let configs = [LedZoneConfig::default()];
        let mut engine = EffectEngine::<1, 8>::new(channel.receiver(), &configs);
        let before = *engine.zone(0).unwrap().params();

        request(&sender, 0, ZoneCommand::ResetColorCycle { period: 0 });
        request(&sender, 0, ZoneCommand::RecalculateColorCycle { period: 0 });
        engine.tick();
        assert_eq!(*engine.zone(0).unwrap().params(), before);
    }

    #[test]
    fn test_short_breathing_period_is_dropped() {
        let channel = RequestChannel::<8>::new();
        let sender = channel.sender();
        let configs = [LedZoneConfig {
            breathing: BreathingOptions {
                top_hold: true,
                bottom_hold: true,
                shape: RampShape::Linear,
            },
            ..LedZoneConfig::default()
        }];
        let mut engine = EffectEngine::<1, 8>::new(channel.receiver(), &configs);
        assert_eq!(engine.zone(0).unwrap().min_breathing_period(), 4);

        request(&sender, 0, ZoneCommand::ResetBreathing { period: 3 });
        engine.tick();
        assert_eq!(engine.zone(0).unwrap().params().breathing.period, 0);

        request(&sender, 0, ZoneCommand::ResetBreathing { period: 4 });
        engine.tick();
        let params = engine.zone(0).unwrap().params().breathing;
        assert!(params.enabled);
        assert_eq!(params.period, 4);
        assert_eq!(params.ramp_period, 1);
    }

    #[test]
    fn test_drift_requests_change_cadence() {
        let channel = RequestChannel::<8>::new();
        let sender = channel.sender();
        let configs = [LedZoneConfig::default()];
        let mut engine = EffectEngine::<1, 8>::new(channel.receiver(), &configs);

        request(&sender, 0, ZoneCommand::ResetColorCycle { period: 4 });
        engine.tick();
        assert_eq!(engine.zone(0).unwrap().state().hsv_out.h, HSV_ONE / 4);

        // One tick of positive drift runs the cycle twice, then clears.
        request(&sender, 0, ZoneCommand::AddCycleDrift(1));
        engine.tick();
        let state = engine.zone(0).unwrap().state();
        assert_eq!(state.hsv_out.h, 3 * (HSV_ONE / 4));
        assert_eq!(state.cycle_drift, 0);

        // Negative drift skips a run and leaves the hue where it was.
        request(&sender, 0, ZoneCommand::AddCycleDrift(-1));
        engine.tick();
        let state = engine.zone(0).unwrap().state();
        assert_eq!(state.hsv_out.h, 3 * (HSV_ONE / 4));
        assert_eq!(state.cycle_drift, 0);

        engine.tick();
        assert_eq!(engine.zone(0).unwrap().state().hsv_out.h, 0);
    }

    #[test]
    fn test_state_restores_losslessly() {
        let channel = RequestChannel::<8>::new();
        let sender = channel.sender();
        let configs = [LedZoneConfig::default()];
        let mut engine = EffectEngine::<1, 8>::new(channel.receiver(), &configs);

        request(&sender, 0, ZoneCommand::SetInputColor(WHITE));
        request(&sender, 0, ZoneCommand::ResetColorCycle { period: 8 });
        request(&sender, 0, ZoneCommand::ResetBreathing { period: 8 });
        for _ in 0..3 {
            engine.tick();
        }

        let params = *engine.zone(0).unwrap().params();
        let state = *engine.zone(0).unwrap().state();
        let first = [engine.tick()[0], engine.tick()[0]];

        let zone = engine.zone_mut(0).unwrap();
        zone.set_params(params);
        zone.set_state(state);
        let replay = [engine.tick()[0], engine.tick()[0]];
        assert_eq!(first, replay);
    }

    #[test]
    fn test_output_stage_applies_gamma_and_calibration() {
        let channel = RequestChannel::<8>::new();
        let sender = channel.sender();
        let configs = [LedZoneConfig {
            pipeline: ZonePipeline {
                gamma: GammaStage::Output,
                calibration: Some([255, 255, 255]),
                ..ZonePipeline::default()
            },
            ..LedZoneConfig::default()
        }];
        let mut engine = EffectEngine::<1, 8>::new(channel.receiver(), &configs);

        request(&sender, 0, ZoneCommand::SetInputColor(WHITE));
        let frame = engine.tick()[0];
        // Full white is boosted up to the lamp current limit.
        assert_eq!(
            frame,
            Rgb16 {
                r: 54569,
                g: 54569,
                b: 54569,
            }
        );
        // The effect output itself stays raw.
        assert_eq!(engine.zone(0).unwrap().state().rgb_out, WHITE);
    }

    #[test]
    fn test_input_stage_linearizes_before_conversion() {
        let channel = RequestChannel::<8>::new();
        let sender = channel.sender();
        let configs = [LedZoneConfig {
            pipeline: ZonePipeline {
                gamma: GammaStage::Input,
                ..ZonePipeline::default()
            },
            ..LedZoneConfig::default()
        }];
        let mut engine = EffectEngine::<1, 8>::new(channel.receiver(), &configs);

        let gray = Rgb16 {
            r: 32768,
            g: 32768,
            b: 32768,
        };
        request(&sender, 0, ZoneCommand::SetInputColor(gray));
        engine.tick();
        assert_eq!(engine.zone(0).unwrap().state().hsv_in.v, 29_229_502);
        assert_eq!(
            engine.frame()[0],
            Rgb16 {
                r: 14272,
                g: 14272,
                b: 14272,
            }
        );
    }

    #[test]
    fn test_breathing_pass_through_request() {
        let channel = RequestChannel::<8>::new();
        let sender = channel.sender();
        let configs = [LedZoneConfig::default()];
        let mut engine = EffectEngine::<1, 8>::new(channel.receiver(), &configs);

        request(&sender, 0, ZoneCommand::SetInputColor(WHITE));
        request(&sender, 0, ZoneCommand::ResetBreathing { period: 8 });
        assert_eq!(engine.tick()[0], BLACK);
        assert_eq!(
            engine.tick()[0],
            Rgb16 {
                r: 16384,
                g: 16384,
                b: 16384,
            }
        );

        request(&sender, 0, ZoneCommand::SetBreathingPassThrough);
        assert_eq!(engine.tick()[0], WHITE);
        assert_eq!(
            engine.zone(0).unwrap().state().breathing.phase,
            BreathingPhase::PassThrough
        );
    }

    #[test]
    fn test_breathing_enable_requests_gate_the_hold() {
        let channel = RequestChannel::<8>::new();
        let sender = channel.sender();
        let configs = [LedZoneConfig {
            breathing: BreathingOptions {
                top_hold: true,
                bottom_hold: false,
                shape: RampShape::Linear,
            },
            ..LedZoneConfig::default()
        }];
        let mut engine = EffectEngine::<1, 8>::new(channel.receiver(), &configs);

        request(&sender, 0, ZoneCommand::SetInputColor(WHITE));
        request(&sender, 0, ZoneCommand::ResetBreathing { period: 9 });
        for _ in 0..4 {
            engine.tick();
        }
        assert_eq!(
            engine.zone(0).unwrap().state().breathing.phase,
            BreathingPhase::TopHold
        );

        // Disabling after the reset parks the zone in the hold.
        request(&sender, 0, ZoneCommand::SetBreathingEnabled(false));
        for _ in 0..6 {
            assert_eq!(engine.tick()[0], WHITE);
        }
        assert_eq!(
            engine.zone(0).unwrap().state().breathing.phase,
            BreathingPhase::TopHold
        );

        request(&sender, 0, ZoneCommand::SetBreathingEnabled(true));
        for _ in 0..3 {
            engine.tick();
        }
        assert_eq!(
            engine.zone(0).unwrap().state().breathing.phase,
            BreathingPhase::RampDown
        );
    }

    #[test]
    fn test_requests_queue_is_bounded() {
        let channel = RequestChannel::<2>::new();
        let sender = channel.sender();
        let configs = [LedZoneConfig::default()];
        let mut engine = EffectEngine::<1, 2>::new(channel.receiver(), &configs);

        let enable = ZoneRequest {
            zone: 0,
            command: ZoneCommand::SetColorCycleEnabled(true),
        };
        assert!(sender.try_send(enable).is_ok());
        assert!(sender.try_send(enable).is_ok());
        assert_eq!(sender.try_send(enable), Err(QueueFull(enable)));
        assert_eq!(channel.len(), 2);

        engine.tick();
        assert!(channel.is_empty());
        assert!(engine.zone(0).unwrap().params().color_cycle.enabled);
    }
}
