mod tests {
    use ensemble_light_engine::color::{dimmed, scale_channel, BLACK, RED, WHITE};
    use ensemble_light_engine::effect::ramp;
    use ensemble_light_engine::gamma::ws2812_lut;

    const FADEIN: i64 = 100_000;
    const ON: i64 = 50_000;
    const FADEOUT: i64 = 200_000;

    #[test]
    fn test_ramp_negative_delta_is_black() {
        assert_eq!(ramp(-1, FADEIN, ON, FADEOUT, RED), BLACK);
        assert_eq!(ramp(i64::MIN / 2, FADEIN, ON, FADEOUT, RED), BLACK);
    }

    #[test]
    fn test_ramp_phases() {
        // Mid fade-in: half brightness
        assert_eq!(ramp(50_000, FADEIN, ON, FADEOUT, RED).r, 127);
        // On phase: full color
        assert_eq!(ramp(FADEIN, FADEIN, ON, FADEOUT, RED), RED);
        assert_eq!(ramp(FADEIN + ON - 1, FADEIN, ON, FADEOUT, RED), RED);
        // Mid fade-out: half brightness
        assert_eq!(ramp(FADEIN + ON + 100_000, FADEIN, ON, FADEOUT, RED).r, 127);
        // Past the envelope: black
        assert_eq!(ramp(FADEIN + ON + FADEOUT, FADEIN, ON, FADEOUT, RED), BLACK);
        assert_eq!(ramp(i64::MAX / 2, FADEIN, ON, FADEOUT, RED), BLACK);
    }

    #[test]
    fn test_ramp_boundary_continuity() {
        // Output at fadein-1 and fadein differs by at most one step.
        let before = ramp(FADEIN - 1, FADEIN, ON, FADEOUT, WHITE);
        let at = ramp(FADEIN, FADEIN, ON, FADEOUT, WHITE);
        assert!(at.r - before.r <= 1);
        let last_fade = ramp(FADEIN + ON + FADEOUT - 1, FADEIN, ON, FADEOUT, WHITE);
        assert!(last_fade.r <= 1);
    }

    #[test]
    fn test_ramp_skips_zero_phases() {
        // No fade-in: instantly on
        assert_eq!(ramp(0, 0, ON, FADEOUT, RED), RED);
        // No fade-out: instantly off
        assert_eq!(ramp(ON, 0, ON, 0, RED), BLACK);
        // Everything zero: black from the start
        assert_eq!(ramp(0, 0, 0, 0, RED), BLACK);
    }

    #[test]
    fn test_brightness_truncation() {
        // Plain base * brightness / 255 with integer truncation
        assert_eq!(scale_channel(255, 127), 127);
        assert_eq!(scale_channel(128, 128), 64);
        assert_eq!(scale_channel(255, 255), 255);
        assert_eq!(scale_channel(1, 254), 0);
        assert_eq!(
            dimmed(RED, 63),
            ensemble_light_engine::Rgb { r: 63, g: 0, b: 0 }
        );
    }

    #[test]
    fn test_gamma_table() {
        assert_eq!(ws2812_lut(0), 0);
        assert_eq!(ws2812_lut(255), 255);
        assert_eq!(ws2812_lut(128), 37);
        for value in 1..=255u8 {
            assert!(ws2812_lut(value) >= ws2812_lut(value - 1));
        }
    }
}
