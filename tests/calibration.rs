mod tests {
    use myrtio_zone_effects::calibration::{
        BOOST_FRAC_BITS, DIE_CURRENT_LIMIT_MA, LAMP_CURRENT_LIMIT_MA, apply_calibration_and_boost,
    };
    use myrtio_zone_effects::color::Rgb16;

    const WHITE: Rgb16 = Rgb16 {
        r: 65535,
        g: 65535,
        b: 65535,
    };
    const RED: Rgb16 = Rgb16 {
        r: 65535,
        g: 0,
        b: 0,
    };
    const UNIFORM: [u8; 3] = [255, 255, 255];

    #[test]
    fn test_limits() {
        assert_eq!(DIE_CURRENT_LIMIT_MA, 20);
        assert_eq!(LAMP_CURRENT_LIMIT_MA, 50);
        assert_eq!(BOOST_FRAC_BITS, 16);
    }

    #[test]
    fn test_white_is_lamp_limited() {
        // Full white draws the most lamp current, so the boost dips lowest.
        let (boost, out) = apply_calibration_and_boost(WHITE, UNIFORM);
        assert_eq!(boost, 214);
        assert_eq!(out, Rgb16 {
            r: 54569,
            g: 54569,
            b: 54569,
        });
    }

    #[test]
    fn test_single_channel_is_die_limited() {
        let (boost, out) = apply_calibration_and_boost(RED, UNIFORM);
        assert_eq!(boost, 257);
        assert_eq!(out, Rgb16 {
            r: 65534,
            g: 0,
            b: 0,
        });
    }

    #[test]
    fn test_half_calibration_restores_input() {
        let color = Rgb16 {
            r: 65535,
            g: 32768,
            b: 16384,
        };
        let (boost, out) = apply_calibration_and_boost(color, [128, 128, 128]);
        assert_eq!(boost, 512);
        assert_eq!(out, color);

        let yellow = Rgb16 {
            r: 65535,
            g: 65535,
            b: 0,
        };
        let (boost, out) = apply_calibration_and_boost(yellow, [128, 128, 128]);
        assert_eq!(boost, 512);
        assert_eq!(out, yellow);
    }

    #[test]
    fn test_zero_gains_give_black() {
        let (boost, out) = apply_calibration_and_boost(RED, [0, 255, 0]);
        assert_eq!(boost, 0);
        assert_eq!(out, Rgb16 { r: 0, g: 0, b: 0 });

        let (boost, out) = apply_calibration_and_boost(Rgb16 { r: 0, g: 0, b: 0 }, UNIFORM);
        assert_eq!(boost, 0);
        assert_eq!(out, Rgb16 { r: 0, g: 0, b: 0 });
    }

    #[test]
    fn test_channel_ratios_survive() {
        let (boost, out) = apply_calibration_and_boost(
            Rgb16 {
                r: 60000,
                g: 30000,
                b: 0,
            },
            UNIFORM,
        );
        assert_eq!(boost, 257);
        assert_eq!(out, Rgb16 {
            r: 59999,
            g: 30000,
            b: 0,
        });
    }

    #[test]
    fn test_dim_colors_keep_their_level() {
        let (boost, out) = apply_calibration_and_boost(
            Rgb16 {
                r: 255,
                g: 255,
                b: 255,
            },
            UNIFORM,
        );
        assert_eq!(boost, 214);
        assert_eq!(out, Rgb16 {
            r: 212,
            g: 212,
            b: 212,
        });

        let (boost, out) = apply_calibration_and_boost(Rgb16 { r: 1, g: 0, b: 0 }, UNIFORM);
        assert_eq!(boost, 257);
        assert_eq!(out, Rgb16 { r: 1, g: 0, b: 0 });
    }

    #[test]
    fn test_per_channel_calibration() {
        let (boost, out) = apply_calibration_and_boost(WHITE, [255, 128, 64]);
        assert_eq!(boost, 257);
        assert_eq!(out, Rgb16 {
            r: 65534,
            g: 32895,
            b: 16448,
        });
    }

    #[test]
    fn test_boost_zero_only_when_dark() {
        // The sweep also proves the widened math never overflows a channel.
        let channels = [0_u16, 1, 255, 4369, 32768, 65534, 65535];
        let gains = [0_u8, 1, 64, 128, 254, 255];
        for r in channels {
            for g in channels {
                for b in channels {
                    for gain in gains {
                        let color = Rgb16 { r, g, b };
                        let (boost, out) = apply_calibration_and_boost(color, [gain, gain, gain]);
                        let dark = gain == 0 || (r == 0 && g == 0 && b == 0);
                        assert_eq!(boost == 0, dark, "color {color:?} gain {gain}");
                        if dark {
                            assert_eq!(out, Rgb16 { r: 0, g: 0, b: 0 });
                        }
                    }
                }
            }
        }
    }
}
