mod tests {
    use keyglow::EffectId;
    use proptest::prelude::*;

    #[test]
    fn test_effect_id_parse() {
        assert_eq!(EffectId::parse_from_str("ripple"), Some(EffectId::Ripple));
        assert_eq!(
            EffectId::parse_from_str("swirl_bidirectional"),
            Some(EffectId::SwirlBidirectional)
        );
        assert_eq!(EffectId::parse_from_str("aurora"), None);
    }

    #[test]
    fn test_effect_id_names_round_trip() {
        for effect in EffectId::ALL {
            assert_eq!(EffectId::parse_from_str(effect.as_str()), Some(effect));
        }
    }

    #[test]
    fn test_effect_id_from_raw() {
        assert_eq!(EffectId::from_raw(0), Some(EffectId::Solid));
        assert_eq!(EffectId::from_raw(7), Some(EffectId::Heatmap));
        assert_eq!(EffectId::from_raw(8), Some(EffectId::Ripple));
        assert_eq!(EffectId::from_raw(EffectId::COUNT), None);
    }

    #[test]
    fn test_cycle_wraps_at_both_ends() {
        assert_eq!(EffectId::Ripple.cycled(1), EffectId::Solid);
        assert_eq!(EffectId::Solid.cycled(-1), EffectId::Ripple);
        assert_eq!(EffectId::Swirl.cycled(1), EffectId::SwirlBidirectional);
    }

    proptest! {
        #[test]
        fn prop_cycling_count_times_is_identity(raw in 0u8..EffectId::COUNT) {
            let start = EffectId::from_raw(raw).unwrap();
            let mut effect = start;
            for _ in 0..EffectId::COUNT {
                effect = effect.cycled(1);
            }
            prop_assert_eq!(effect, start);
        }

        #[test]
        fn prop_forward_then_back_is_identity(raw in 0u8..EffectId::COUNT) {
            let start = EffectId::from_raw(raw).unwrap();
            prop_assert_eq!(start.cycled(1).cycled(-1), start);
            prop_assert_eq!(start.cycled(-1).cycled(1), start);
        }
    }
}
