mod common;

mod tests {
    use keyglow::color::BLACK;
    use keyglow::layout::corne;
    use keyglow::{
        AnimationState, BrightnessRange, Duration, EffectId, Hsb, Instant, KeyEvent, Speed,
        TickScheduler, UnderglowConfig, UnderglowError,
    };

    use crate::common::{
        KEYS, LEDS, MockHooks, RecordingSink, TestUnderglow, config_starting_off, delivered,
        running_engine,
    };

    const EFFECT_HEATMAP: u8 = EffectId::Heatmap as u8;
    const EFFECT_RIPPLE: u8 = EffectId::Ripple as u8;

    #[test]
    fn test_operations_fail_before_bind() {
        let mut engine =
            TestUnderglow::new(corne::LEFT, config_starting_off(), MockHooks::default());

        assert_eq!(engine.turn_on(), Err(UnderglowError::NotReady));
        assert_eq!(engine.get_on_state(), Err(UnderglowError::NotReady));
        assert_eq!(engine.select_effect(1), Err(UnderglowError::NotReady));
        assert_eq!(engine.adjust_hue(1), Err(UnderglowError::NotReady));
        assert_eq!(engine.set_color(Hsb::new(1, 2, 3)), Err(UnderglowError::NotReady));

        engine.tick();
        assert!(engine.sink().is_none());
    }

    #[test]
    fn test_solid_end_to_end() {
        let range = BrightnessRange::new(10, 90).unwrap();
        let config = UnderglowConfig {
            brightness: range,
            ..config_starting_off()
        };
        let mut engine = TestUnderglow::new(corne::LEFT, config, MockHooks::default());
        engine.bind(RecordingSink::default());
        assert_eq!(engine.get_on_state(), Ok(false));

        engine.turn_on().unwrap();
        assert_eq!(engine.get_on_state(), Ok(true));
        assert_eq!(engine.state().step, 0);

        let color = Hsb::new(120, 100, 50);
        engine.set_color(color).unwrap();

        let mut scheduler = TickScheduler::<4>::new();
        let start = Instant::from_millis(0);
        assert!(scheduler.service(&mut engine, start).rendered);

        let expected = range.scale_min_max(color).to_rgb();
        assert_eq!(delivered(&engine).len(), 1);
        assert!(delivered(&engine)[0].iter().all(|&pixel| pixel == expected));
        assert_eq!(delivered(&engine)[0].len(), LEDS);

        engine.turn_off().unwrap();
        let last = delivered(&engine).last().unwrap();
        assert!(last.iter().all(|&pixel| pixel == BLACK));
        assert_eq!(engine.get_on_state(), Ok(false));

        let frames = delivered(&engine).len();
        let result = scheduler.service(&mut engine, start + Duration::from_millis(50));
        assert!(!result.rendered);
        assert_eq!(scheduler.next_tick(), None);
        let result = scheduler.service(&mut engine, start + Duration::from_millis(500));
        assert!(!result.rendered);
        assert_eq!(delivered(&engine).len(), frames);
    }

    #[test]
    fn test_power_rail_follows_on_state() {
        let mut engine = running_engine();
        engine.toggle().unwrap();
        engine.toggle().unwrap();
        assert_eq!(engine.hooks().power, vec![true, false, true]);
    }

    #[test]
    fn test_turning_on_restarts_animation() {
        let mut engine = running_engine();
        engine.select_effect(EffectId::Spectrum as u8).unwrap();
        engine.tick();
        engine.tick();
        assert_eq!(engine.state().step, 6);

        engine.turn_off().unwrap();
        engine.turn_on().unwrap();
        assert_eq!(engine.state().step, 0);
    }

    #[test]
    fn test_select_effect_validates_id() {
        let mut engine = running_engine();
        assert!(matches!(
            engine.select_effect(EffectId::COUNT),
            Err(UnderglowError::InvalidArgument(_))
        ));
        assert_eq!(engine.state().effect, EffectId::Solid);
    }

    #[test]
    fn test_cycle_effect_wraps() {
        let mut engine = running_engine();
        engine.cycle_effect(-1).unwrap();
        assert_eq!(engine.state().effect, EffectId::Ripple);
        assert_eq!(engine.effect().id(), EffectId::Ripple);

        for _ in 0..EffectId::COUNT {
            engine.cycle_effect(1).unwrap();
        }
        assert_eq!(engine.state().effect, EffectId::Ripple);
    }

    #[test]
    fn test_set_color_rejects_out_of_range_channels() {
        let mut engine = running_engine();
        for color in [Hsb::new(360, 0, 0), Hsb::new(0, 101, 0), Hsb::new(0, 0, 101)] {
            assert!(matches!(
                engine.set_color(color),
                Err(UnderglowError::InvalidArgument(_))
            ));
        }
        assert_eq!(engine.state().color, Hsb::new(0, 100, 100));
    }

    #[test]
    fn test_adjustments_wrap_and_clamp() {
        let mut engine = running_engine();
        engine.adjust_hue(-1).unwrap();
        assert_eq!(engine.state().color.h, 350);
        engine.adjust_saturation(1).unwrap();
        assert_eq!(engine.state().color.s, 100);
        engine.adjust_brightness(-1).unwrap();
        assert_eq!(engine.state().color.b, 90);

        for _ in 0..10 {
            engine.adjust_speed(-1).unwrap();
        }
        assert_eq!(engine.state().speed, Speed::new(1));
        for _ in 0..10 {
            engine.adjust_speed(1).unwrap();
        }
        assert_eq!(engine.state().speed, Speed::new(5));
    }

    #[test]
    fn test_delivery_failure_does_not_stop_ticks() {
        let mut engine = running_engine();
        engine.sink_mut().unwrap().fail = true;
        engine.tick();
        assert!(delivered(&engine).is_empty());
        assert!(engine.is_on());

        engine.sink_mut().unwrap().fail = false;
        engine.tick();
        assert_eq!(delivered(&engine).len(), 1);
    }

    #[test]
    fn test_breathe_fades_to_black_and_wraps() {
        let mut engine = running_engine();
        engine.select_effect(EffectId::Breathe as u8).unwrap();

        engine.tick();
        assert_eq!(engine.pixels()[0], Hsb::new(0, 100, 100).to_rgb());
        assert_eq!(engine.state().step, 30);

        // speed 3 adds 30 per tick; step 1200 is the dark middle
        for _ in 0..39 {
            engine.tick();
        }
        assert_eq!(engine.state().step, 1200);
        engine.tick();
        assert!(engine.pixels().iter().all(|&pixel| pixel == BLACK));

        for _ in 0..40 {
            engine.tick();
        }
        assert_eq!(engine.state().step, 0);
    }

    #[test]
    fn test_spectrum_hue_wraps() {
        let mut engine = running_engine();
        engine.select_effect(EffectId::Spectrum as u8).unwrap();
        for _ in 0..121 {
            engine.tick();
        }
        // 121 * 3 = 363
        assert_eq!(engine.state().step, 3);
        assert_eq!(engine.pixels()[0], Hsb::new(0, 100, 100).to_rgb());
    }

    #[test]
    fn test_swirl_spreads_hues_along_strip() {
        let mut engine = running_engine();
        engine.select_effect(EffectId::Swirl as u8).unwrap();
        engine.tick();

        // 360 / 27 = 13 degrees apart
        assert_eq!(engine.pixels()[0], Hsb::new(0, 100, 100).to_rgb());
        assert_eq!(engine.pixels()[10], Hsb::new(130, 100, 100).to_rgb());
        assert_eq!(engine.state().step, 6);
    }

    #[test]
    fn test_bidirectional_swirl_turns_at_band_edges() {
        let mut engine = running_engine();
        engine.select_effect(EffectId::SwirlBidirectional as u8).unwrap();
        assert_eq!(engine.state().step, 280);

        for _ in 0..14 {
            engine.tick();
        }
        assert_eq!(engine.state().step, 320);
        engine.tick();
        assert_eq!(engine.state().step, 317);

        for _ in 0..100 {
            engine.tick();
            assert!((240..=320).contains(&engine.state().step));
        }
    }

    #[test]
    fn test_bidirectional_swirl_recovers_from_restart() {
        let mut engine = running_engine();
        engine.select_effect(EffectId::SwirlBidirectional as u8).unwrap();
        engine.turn_off().unwrap();
        engine.turn_on().unwrap();
        assert_eq!(engine.state().step, 0);

        engine.tick();
        assert!((240..=320).contains(&engine.state().step));
    }

    #[test]
    fn test_wave_groups_peak_at_different_levels() {
        let mut engine = running_engine();
        engine.select_effect(EffectId::Wave as u8).unwrap();
        engine.tick();

        // At step 0 the breathing level is 100, so only offsets above 100 show.
        let range = engine.config().brightness;
        let expected = range.scale_zero_max(Hsb::new(0, 100, 20)).to_rgb();
        assert_eq!(engine.pixels()[3], expected);
        assert_eq!(engine.pixels()[9], BLACK);
        assert_eq!(engine.pixels()[0], BLACK);
    }

    #[test]
    fn test_heatmap_counts_presses_only() {
        let mut engine = running_engine();
        engine.select_effect(EFFECT_HEATMAP).unwrap();

        for _ in 0..3 {
            engine.handle_key_event(KeyEvent::pressed(5));
            engine.handle_key_event(KeyEvent::released(5));
        }
        let heatmap = engine.effect().heatmap().unwrap();
        assert_eq!(heatmap.count(5), 3);
        assert_eq!(heatmap.total(), 4);

        engine.handle_key_event(KeyEvent::pressed(KEYS as u32));
        engine.handle_key_event(KeyEvent::pressed(u32::MAX));
        assert_eq!(engine.effect().heatmap().unwrap().total(), 4);
    }

    #[test]
    fn test_heatmap_shifts_hot_keys() {
        let mut engine = running_engine();
        engine.select_effect(EFFECT_HEATMAP).unwrap();
        for _ in 0..3 {
            engine.handle_key_event(KeyEvent::pressed(5));
        }
        engine.tick();

        let base = Hsb::new(0, 100, 100);
        // key 5 sits under LED 19 on the left half
        assert_eq!(engine.pixels()[19], base.with_hue_shift(180).to_rgb());
        assert_eq!(engine.pixels()[0], base.to_rgb());
        assert_eq!(engine.pixels()[20], base.to_rgb());
    }

    #[test]
    fn test_reselecting_effect_reinitializes_it() {
        let mut engine = running_engine();
        engine.select_effect(EFFECT_HEATMAP).unwrap();
        engine.handle_key_event(KeyEvent::pressed(1));
        engine.tick();

        engine.select_effect(EFFECT_HEATMAP).unwrap();
        assert_eq!(engine.state().step, 0);
        let heatmap = engine.effect().heatmap().unwrap();
        assert_eq!(heatmap.count(1), 0);
        assert_eq!(heatmap.total(), 1);
    }

    #[test]
    fn test_time_driven_effects_ignore_keys() {
        let mut engine = running_engine();
        engine.handle_key_event(KeyEvent::pressed(3));
        assert!(engine.effect().heatmap().is_none());
        assert!(engine.effect().ripples().is_none());
    }

    #[test]
    fn test_responsive_highlights_held_keys() {
        let mut engine = running_engine();
        engine.select_effect(EffectId::Responsive as u8).unwrap();
        let base = Hsb::new(0, 100, 100);

        engine.handle_key_event(KeyEvent::pressed(0));
        engine.tick();
        assert_eq!(engine.pixels()[24], base.with_hue_shift(180).to_rgb());
        assert_eq!(engine.pixels()[23], base.to_rgb());

        engine.handle_key_event(KeyEvent::released(0));
        engine.tick();
        assert_eq!(engine.pixels()[24], base.to_rgb());
    }

    #[test]
    fn test_ripple_layers_from_pressed_key() {
        let mut engine = running_engine();
        engine.select_effect(EFFECT_RIPPLE).unwrap();
        engine.handle_key_event(KeyEvent::pressed(0));

        let ripples = engine.effect().ripples().unwrap();
        let tree = ripples.views().next().unwrap();
        assert_eq!(tree.frame, 0);
        assert_eq!(tree.keys, &[0]);
        assert_eq!(tree.held, Some(0));
    }

    #[test]
    fn test_ripple_spreads_and_fades() {
        let mut engine = running_engine();
        engine.select_effect(EFFECT_RIPPLE).unwrap();
        engine.handle_key_event(KeyEvent::pressed(0));

        let base = Hsb::new(0, 100, 100);
        let accent = base.with_hue_shift(180);

        // two ticks per frame by default
        engine.tick();
        assert_eq!(engine.pixels()[24], accent.to_rgb());
        assert_eq!(engine.pixels()[23], base.to_rgb());
        engine.tick();
        engine.tick();

        // frame 1 is keys 1 and 12 (LEDs 23 and 25), 20% dimmer
        let ring = accent.with_brightness(80).to_rgb();
        assert_eq!(engine.pixels()[23], ring);
        assert_eq!(engine.pixels()[25], ring);
        assert_eq!(engine.pixels()[24], accent.to_rgb());
        assert_eq!(engine.pixels()[22], base.to_rgb());
    }

    #[test]
    fn test_ripple_pool_drops_new_presses_when_full() {
        let mut engine = running_engine();
        engine.select_effect(EFFECT_RIPPLE).unwrap();
        for key in 0..4 {
            engine.handle_key_event(KeyEvent::pressed(key));
        }
        engine.tick();
        engine.tick();

        engine.handle_key_event(KeyEvent::pressed(20));
        let ripples = engine.effect().ripples().unwrap();
        assert_eq!(ripples.active(), 4);
        assert!(ripples.views().all(|tree| tree.frame == 1 && tree.held != Some(20)));
    }

    #[test]
    fn test_ripple_release_frees_tree_early() {
        let mut engine = running_engine();
        engine.select_effect(EFFECT_RIPPLE).unwrap();
        engine.handle_key_event(KeyEvent::pressed(14));
        engine.handle_key_event(KeyEvent::pressed(16));
        for _ in 0..5 {
            engine.tick();
        }

        engine.handle_key_event(KeyEvent::released(14));
        let ripples = engine.effect().ripples().unwrap();
        assert_eq!(ripples.active(), 1);
        assert_eq!(ripples.views().next().unwrap().held, Some(16));
    }

    #[test]
    fn test_ripple_expires_after_last_frame() {
        let mut engine = running_engine();
        engine.select_effect(EFFECT_RIPPLE).unwrap();
        engine.handle_key_event(KeyEvent::pressed(14));

        // 6 frames, 2 ticks each
        for _ in 0..11 {
            engine.tick();
        }
        assert_eq!(engine.effect().ripples().unwrap().active(), 1);
        engine.tick();
        assert_eq!(engine.effect().ripples().unwrap().active(), 0);
    }

    #[test]
    fn test_ripples_started_while_off_do_not_survive_turn_on() {
        let mut engine = running_engine();
        engine.select_effect(EFFECT_RIPPLE).unwrap();
        engine.turn_off().unwrap();

        engine.handle_key_event(KeyEvent::pressed(0));
        engine.handle_key_event(KeyEvent::pressed(14));
        assert_eq!(engine.effect().ripples().unwrap().active(), 2);

        engine.turn_on().unwrap();
        assert_eq!(engine.effect().ripples().unwrap().active(), 0);
        engine.tick();
        let base = Hsb::new(0, 100, 100).to_rgb();
        assert!(engine.pixels().iter().all(|&pixel| pixel == base));
    }

    #[test]
    fn test_bind_restores_persisted_state() {
        let persisted = AnimationState {
            color: Hsb::new(200, 50, 60),
            speed: Speed::new(4),
            effect: EffectId::Spectrum,
            step: 33,
            on: false,
        };
        let hooks = MockHooks {
            stored: Some(persisted.to_record()),
            ..MockHooks::default()
        };
        let mut engine = TestUnderglow::new(corne::LEFT, UnderglowConfig::default(), hooks);
        engine.bind(RecordingSink::default());

        assert_eq!(engine.state(), &persisted);
        assert_eq!(engine.effect().id(), EffectId::Spectrum);
        assert!(engine.hooks().power.is_empty());
    }

    #[test]
    fn test_bind_enables_power_when_restored_on() {
        let mut engine =
            TestUnderglow::new(corne::LEFT, UnderglowConfig::default(), MockHooks::default());
        engine.bind(RecordingSink::default());
        assert!(engine.is_on());
        assert_eq!(engine.hooks().power, vec![true]);
    }

    #[test]
    fn test_bind_ignores_invalid_record() {
        let mut record = AnimationState {
            color: Hsb::new(10, 10, 10),
            speed: Speed::new(2),
            effect: EffectId::Wave,
            step: 0,
            on: true,
        }
        .to_record();
        record[5] = 42;
        let hooks = MockHooks {
            stored: Some(record),
            ..MockHooks::default()
        };
        let mut engine = TestUnderglow::new(corne::LEFT, config_starting_off(), hooks);
        engine.bind(RecordingSink::default());

        assert_eq!(engine.state(), &config_starting_off().start);
    }

    #[test]
    fn test_save_is_debounced() {
        let config = UnderglowConfig {
            save_debounce: Duration::from_millis(100),
            ..config_starting_off()
        };
        let mut engine = TestUnderglow::new(corne::LEFT, config, MockHooks::default());
        engine.bind(RecordingSink::default());
        let start = Instant::from_millis(1_000);

        engine.set_color(Hsb::new(90, 80, 70)).unwrap();
        assert!(!engine.poll_save(start));
        assert_eq!(engine.save_deadline(), Some(start + Duration::from_millis(100)));

        // another change pushes the save back
        engine.adjust_speed(1).unwrap();
        assert!(!engine.poll_save(start + Duration::from_millis(50)));
        assert!(!engine.poll_save(start + Duration::from_millis(100)));
        assert_eq!(engine.hooks().saves, 0);

        assert!(engine.poll_save(start + Duration::from_millis(150)));
        assert_eq!(engine.hooks().saves, 1);
        assert!(!engine.save_pending());

        let stored = engine.hooks().stored.unwrap();
        assert_eq!(AnimationState::from_record(&stored), Ok(*engine.state()));
    }

    #[test]
    fn test_flush_state_saves_immediately() {
        let mut engine = running_engine();
        assert!(engine.save_pending());
        engine.flush_state();
        assert!(!engine.save_pending());
        assert_eq!(engine.hooks().saves, 1);
    }
}
