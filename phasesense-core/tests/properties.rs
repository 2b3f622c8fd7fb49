//! Property tests for configuration and the ratio policy

use phasesense_core::config::{ConfigError, CurrentSenseConfig, SyncConfig};
use phasesense_core::current::{ChannelAssignment, Phase, PhaseCurrent, Polarity};
use phasesense_core::sync::{judge, SyncOutcome, Verdict};
use phasesense_hal::AdcChannel;
use proptest::prelude::*;

fn channels() -> ChannelAssignment {
    ChannelAssignment::new(AdcChannel(0), AdcChannel(1), Some(AdcChannel(2)))
}

proptest! {
    #[test]
    fn ratio_is_derived_from_shunt_and_gain(shunt in 1e-4f32..10.0, gain in 0.5f32..500.0) {
        let config = CurrentSenseConfig::new(shunt, gain, channels());
        prop_assert_eq!(config.validate(), Ok(()));

        let expected = 1.0 / (shunt * gain);
        let ratio = config.volts_to_amps_ratio();
        prop_assert!((ratio - expected).abs() <= expected * 1e-6);
    }

    #[test]
    fn non_positive_shunt_is_rejected(shunt in -10.0f32..=0.0, gain in 0.5f32..500.0) {
        let config = CurrentSenseConfig::new(shunt, gain, channels());
        prop_assert_eq!(config.validate(), Err(ConfigError::InvalidShuntResistance));
    }

    #[test]
    fn driven_phase_is_confirmed(drive in 0.05f32..20.0, sign in prop::bool::ANY) {
        // Balanced divider: the return paths carry half the drive each
        let i = if sign { drive } else { -drive };
        let measured = PhaseCurrent::new(i, -i / 2.0, -i / 2.0);
        let verdict = judge(Phase::A, &measured, &[Phase::B, Phase::C], &SyncConfig::default());
        prop_assert_eq!(verdict, Verdict::Confirmed(Polarity::from_sign(i)));
    }

    #[test]
    fn ambiguous_ratios_never_guess(
        drive in 0.05f32..20.0,
        ratio_b in 0.75f32..1.45,
        ratio_c in 0.75f32..1.45,
    ) {
        let measured = PhaseCurrent::new(drive, -drive / ratio_b, -drive / ratio_c);
        let verdict = judge(Phase::A, &measured, &[Phase::B, Phase::C], &SyncConfig::default());
        prop_assert_eq!(verdict, Verdict::Ambiguous);
    }

    #[test]
    fn status_code_encodes_both_flags(pins_swapped in prop::bool::ANY, polarity_inverted in prop::bool::ANY) {
        let code = SyncOutcome { pins_swapped, polarity_inverted }.status_code();
        prop_assert!((1..=4).contains(&code));
        prop_assert_eq!(code >= 3, polarity_inverted);
        prop_assert_eq!(code % 2 == 0, pins_swapped);
    }
}
