mod tests {
    use embassy_time::{Duration, Instant};
    use ensemble_light_engine::color::{dimmed, BLACK, FADED_BLUE, GREEN, RED, WHITE};
    use ensemble_light_engine::gamma;
    use ensemble_light_engine::packet::{
        EFFECT_BREATH, EFFECT_CHECK, EFFECT_FIREFLY, EFFECT_FIXED, EFFECT_HEARTBEAT,
        EFFECT_PROGRESS, EFFECT_STROBE, EFFECT_THREE_STEPS, EFFECT_VUE_METER,
        EFFECT_PROGRESS_RAINBOW,
    };
    use ensemble_light_engine::{
        CommandChannel, EngineConfig, Formation, LightCommand, LightEngine, Rgb, SplitMix64,
    };

    const LEDS: u16 = 9;

    fn engine_at<'a>(
        channel: &'a CommandChannel<4>,
        formation: Formation,
    ) -> LightEngine<'a, SplitMix64, 18, 4> {
        let config = EngineConfig {
            leds_per_strip: LEDS,
            formation,
        };
        LightEngine::new(channel.receiver(), &config, SplitMix64::new(7))
    }

    fn formation(rank: u8, column: u8, ranks: u8, columns: u8) -> Formation {
        Formation {
            rank,
            column,
            ranks,
            columns,
        }
    }

    fn ms(value: u64) -> Instant {
        Instant::from_millis(value)
    }

    fn uniform(frame: &[Rgb], color: Rgb) -> bool {
        frame.iter().all(|led| *led == gamma::corrected(color))
    }

    #[test]
    fn test_progress_steps() {
        let channel = CommandChannel::new();
        let mut engine = engine_at(&channel, formation(1, 1, 4, 4));

        let mut command = LightCommand::from_effect(EFFECT_PROGRESS);
        command.duration_ms = 300;
        command.left.color = RED;
        command.right.color = RED;
        engine.submit(1, &command, Duration::from_micros(0), ms(1000));

        // step 0: pixels 0, 3, 6 lit (default group size 3)
        engine.tick(ms(1000));
        let lit = gamma::corrected(RED);
        let off = gamma::corrected(BLACK);
        let frame = engine.frames().0;
        for (i, led) in frame.iter().enumerate() {
            assert_eq!(*led, if i % 3 == 0 { lit } else { off });
        }

        // one third of the cycle later: step 1
        engine.tick(ms(1100));
        let frame = engine.frames().0;
        for (i, led) in frame.iter().enumerate() {
            assert_eq!(*led, if i % 3 == 1 { lit } else { off });
        }
    }

    #[test]
    fn test_progress_zero_duration_guard() {
        let channel = CommandChannel::new();
        let mut engine = engine_at(&channel, formation(1, 1, 4, 4));

        let mut command = LightCommand::from_effect(EFFECT_PROGRESS);
        command.duration_ms = 0;
        command.option = 0;
        command.left.color = RED;
        engine.submit(1, &command, Duration::from_micros(0), ms(1000));

        // Must not divide by zero; renders with the 300 ms default cycle.
        engine.tick(ms(1000));
        assert_eq!(engine.frames().0[0], gamma::corrected(RED));
        engine.tick(ms(1100));
        assert_eq!(engine.frames().0[1], gamma::corrected(RED));
        assert_eq!(engine.frames().0[0], gamma::corrected(BLACK));
    }

    #[test]
    fn test_strobe_defaults_and_repeat() {
        let channel = CommandChannel::new();
        let mut engine = engine_at(&channel, formation(1, 1, 4, 4));

        // Zero duration: strobe still repeats on its 100 ms default.
        engine.submit(
            1,
            &LightCommand::from_effect(EFFECT_STROBE),
            Duration::from_micros(0),
            ms(1000),
        );

        engine.tick(ms(1000));
        assert!(uniform(engine.frames().0, WHITE));
        // 40 ms on-time is over
        engine.tick(ms(1060));
        assert!(uniform(engine.frames().0, BLACK));
        // next cycle
        engine.tick(ms(1120));
        assert!(uniform(engine.frames().0, WHITE));
    }

    #[test]
    fn test_fixed_stays_on() {
        let channel = CommandChannel::new();
        let mut engine = engine_at(&channel, formation(1, 1, 4, 4));

        let mut command = LightCommand::from_effect(EFFECT_FIXED);
        command.left.color = RED;
        command.right.color = RED;
        engine.submit(1, &command, Duration::from_micros(0), ms(1000));

        engine.tick(ms(1000));
        assert!(uniform(engine.frames().0, RED));
        engine.tick(ms(60_000));
        assert!(uniform(engine.frames().0, RED));
    }

    #[test]
    fn test_three_steps_rank_gate() {
        let command = {
            let mut command = LightCommand::from_effect(EFFECT_THREE_STEPS);
            command.repeat_counter = 2;
            command
        };

        // (300 + 2 - rank) % 3 == 0 only for rank 2 (of the first three)
        for (rank, lights) in [(1u8, false), (2, true), (3, false)] {
            let channel = CommandChannel::new();
            let mut engine = engine_at(&channel, formation(rank, 1, 4, 4));
            engine.submit(1, &command, Duration::from_micros(0), ms(1000));
            engine.tick(ms(1000));

            // Default colors: green left, red right.
            if lights {
                assert!(uniform(engine.frames().0, GREEN), "rank {rank}");
                assert!(uniform(engine.frames().1, RED), "rank {rank}");
            } else {
                assert!(uniform(engine.frames().0, BLACK), "rank {rank}");
                assert!(uniform(engine.frames().1, BLACK), "rank {rank}");
            }
        }
    }

    #[test]
    fn test_check_marks_advertised_rank() {
        // repeat_counter 8, resend every 250 ms, one rank per second:
        // step = (8 / 4) % (8 + 4) = 2, advertising rank 3.
        let command = {
            let mut command = LightCommand::from_effect(EFFECT_CHECK);
            command.repeat_counter = 8;
            command
        };

        // A device standing at rank 3: place and advertised position
        // coincide, the whole left strip turns green.
        let channel = CommandChannel::new();
        let mut engine = engine_at(&channel, formation(3, 2, 8, 4));
        engine.submit(1, &command, Duration::from_micros(0), ms(1000));
        engine.tick(ms(1000));

        let frame = engine.frames().0;
        assert_eq!(frame[2], gamma::corrected(GREEN));
        assert!(uniform(frame, GREEN));

        // Right strip advertises columns later; for now it only shows this
        // device's own column in red over the faded background.
        let frame = engine.frames().1;
        assert_eq!(frame[1], gamma::corrected(RED));
        assert_eq!(frame[0], gamma::corrected(FADED_BLUE));
        assert_eq!(frame[3], gamma::corrected(FADED_BLUE));
        assert_eq!(frame[4], gamma::corrected(BLACK));

        // A device at rank 5 sees rank 3 advertised in orange and its own
        // place in green.
        let channel = CommandChannel::new();
        let mut engine = engine_at(&channel, formation(5, 2, 8, 4));
        engine.submit(1, &command, Duration::from_micros(0), ms(1000));
        engine.tick(ms(1000));

        let orange = Rgb {
            r: 255,
            g: 165,
            b: 0,
        };
        let frame = engine.frames().0;
        assert_eq!(frame[2], gamma::corrected(orange));
        assert_eq!(frame[4], gamma::corrected(GREEN));
        assert_eq!(frame[0], gamma::corrected(FADED_BLUE));
        assert_eq!(frame[8], gamma::corrected(BLACK));
    }

    #[test]
    fn test_vue_meter_rank_asymmetry() {
        let command = {
            let mut command = LightCommand::from_effect(EFFECT_VUE_METER);
            command.duration_ms = 300;
            command.option = 50;
            command
        };

        // Rank 1 starts immediately in green (no leading fade-in).
        let channel = CommandChannel::new();
        let mut engine = engine_at(&channel, formation(1, 1, 4, 4));
        engine.submit(1, &command, Duration::from_micros(0), ms(1000));
        engine.tick(ms(1000));
        assert!(uniform(engine.frames().0, GREEN));

        // The last rank is still dark at t=0 and carries the red peak once
        // the wave arrives.
        let channel = CommandChannel::new();
        let mut engine = engine_at(&channel, formation(4, 1, 4, 4));
        engine.submit(1, &command, Duration::from_micros(0), ms(1000));
        engine.tick(ms(1000));
        assert!(uniform(engine.frames().0, BLACK));
        engine.tick(ms(1150));
        assert!(uniform(engine.frames().0, RED));
    }

    #[test]
    fn test_breath_floor() {
        let channel = CommandChannel::new();
        let mut engine = engine_at(&channel, formation(1, 1, 4, 4));

        // Zero duration and color: 5 s default cycle, green, floor 63.
        engine.submit(
            1,
            &LightCommand::from_effect(EFFECT_BREATH),
            Duration::from_micros(0),
            ms(1000),
        );

        engine.tick(ms(1000));
        assert!(uniform(engine.frames().0, dimmed(GREEN, 63)));

        // Top of the breath (fade-in 35%, on 10%): full green at 40%.
        engine.tick(ms(1000 + 2000));
        assert!(uniform(engine.frames().0, GREEN));
    }

    #[test]
    fn test_heartbeat_diastole_brightness() {
        let channel = CommandChannel::new();
        let mut engine = engine_at(&channel, formation(1, 1, 4, 4));

        // Defaults: 1000 ms cycle, red, diastole brightness 224.
        engine.submit(
            1,
            &LightCommand::from_effect(EFFECT_HEARTBEAT),
            Duration::from_micros(0),
            ms(1000),
        );

        // Systole plateau (5%..15%)
        engine.tick(ms(1070));
        assert!(uniform(engine.frames().0, RED));

        // Diastole plateau (35%..45%) at option brightness
        engine.tick(ms(1360));
        assert!(uniform(engine.frames().0, dimmed(RED, 224)));

        // Tail end of the cycle is dark
        engine.tick(ms(1950));
        assert!(uniform(engine.frames().0, BLACK));
    }

    #[test]
    fn test_firefly_idle_until_interval_expires() {
        let channel = CommandChannel::new();
        let mut engine = engine_at(&channel, formation(1, 1, 4, 4));

        let mut command = LightCommand::from_effect(EFFECT_FIREFLY);
        command.duration_ms = 200;
        engine.submit(1, &command, Duration::from_micros(0), ms(1000));

        // The packet carries no spawned instance: dark until the first
        // interval expires, whatever the generator decides afterwards.
        engine.tick(ms(1000));
        assert!(uniform(engine.frames().0, BLACK));
        engine.tick(ms(1150));
        assert!(uniform(engine.frames().0, BLACK));
    }

    #[test]
    fn test_progress_rainbow_saturated() {
        let channel = CommandChannel::new();
        let mut engine = engine_at(&channel, formation(1, 1, 4, 4));

        let mut command = LightCommand::from_effect(EFFECT_PROGRESS_RAINBOW);
        command.duration_ms = 300;
        engine.submit(1, &command, Duration::from_micros(0), ms(1000));
        engine.tick(ms(1000));

        // Fully saturated hue wave, written without gamma correction.
        for led in engine.frames().0 {
            assert_eq!(led.r.max(led.g).max(led.b), 255);
        }
    }
}
