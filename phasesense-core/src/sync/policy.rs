//! Ratio policy for one synchronization stage
//!
//! With one phase driven and the others held low, the driven phase
//! carries the full current and each return path about half of it. The
//! policy compares the channel assigned to the driven phase against its
//! alternates and decides whether the assignment holds, should be swapped,
//! or cannot be trusted.

use libm::fabsf;

use crate::config::SyncConfig;
use crate::current::{Phase, PhaseCurrent, Polarity};

/// Decision for one energized phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Verdict {
    /// The assigned channel carries the driven current
    Confirmed(Polarity),
    /// The channel assigned to `with` carries the driven current
    Swap { with: Phase, polarity: Polarity },
    /// No channel stands out
    Ambiguous,
}

/// Magnitude ratio of two currents
///
/// A zero denominator gives infinity unless both are zero, which has no
/// ratio at all.
pub fn current_ratio(dominant: f32, other: f32) -> Option<f32> {
    let dominant = fabsf(dominant);
    let other = fabsf(other);
    if other == 0.0 {
        if dominant == 0.0 {
            return None;
        }
        return Some(f32::INFINITY);
    }
    let ratio = dominant / other;
    if ratio.is_nan() {
        None
    } else {
        Some(ratio)
    }
}

/// Judge the averaged currents measured while `target` was energized
///
/// The target is confirmed when it clearly dominates the first alternate.
/// Otherwise the alternates are tried in order and the first one that
/// clearly dominates the target wins the swap.
pub fn judge(
    target: Phase,
    measured: &PhaseCurrent,
    alternates: &[Phase],
    config: &SyncConfig,
) -> Verdict {
    let Some(&reference) = alternates.first() else {
        // Nothing to compare against, only the sign is known
        return Verdict::Confirmed(Polarity::from_sign(measured.get(target)));
    };

    let dominant = measured.get(target);
    if let Some(ratio) = current_ratio(dominant, measured.get(reference)) {
        if ratio > config.confirm_ratio {
            return Verdict::Confirmed(Polarity::from_sign(dominant));
        }
    }

    for &alternate in alternates {
        let other = measured.get(alternate);
        if let Some(ratio) = current_ratio(dominant, other) {
            if ratio < config.swap_ratio {
                return Verdict::Swap {
                    with: alternate,
                    polarity: Polarity::from_sign(other),
                };
            }
        }
    }

    Verdict::Ambiguous
}

#[cfg(test)]
mod tests {
    use super::*;

    const A_ALTERNATES: [Phase; 2] = [Phase::B, Phase::C];
    const B_ALTERNATES: [Phase; 2] = [Phase::A, Phase::C];

    #[test]
    fn test_ratio_edge_cases() {
        assert_eq!(current_ratio(1.0, -0.5), Some(2.0));
        assert_eq!(current_ratio(-0.5, 1.0), Some(0.5));
        assert_eq!(current_ratio(1.0, 0.0), Some(f32::INFINITY));
        assert_eq!(current_ratio(0.0, 0.0), None);
        assert_eq!(current_ratio(f32::NAN, 1.0), None);
    }

    #[test]
    fn test_confirm_dominant_phase() {
        let measured = PhaseCurrent::new(1.0, -0.5, -0.5);
        let verdict = judge(Phase::A, &measured, &A_ALTERNATES, &SyncConfig::default());
        assert_eq!(verdict, Verdict::Confirmed(Polarity::Normal));
    }

    #[test]
    fn test_confirm_inverted_phase() {
        let measured = PhaseCurrent::new(-1.0, -0.5, -0.5);
        let verdict = judge(Phase::A, &measured, &A_ALTERNATES, &SyncConfig::default());
        assert_eq!(verdict, Verdict::Confirmed(Polarity::Inverted));
    }

    #[test]
    fn test_swap_with_first_alternate() {
        // Channel read as A sees a return path, channel read as B sees the drive
        let measured = PhaseCurrent::new(-0.5, 1.0, -0.5);
        let verdict = judge(Phase::A, &measured, &A_ALTERNATES, &SyncConfig::default());
        assert_eq!(
            verdict,
            Verdict::Swap {
                with: Phase::B,
                polarity: Polarity::Normal
            }
        );
    }

    #[test]
    fn test_swap_with_phase_c() {
        let measured = PhaseCurrent::new(-0.5, -0.5, -1.0);
        let verdict = judge(Phase::B, &measured, &B_ALTERNATES, &SyncConfig::default());
        assert_eq!(
            verdict,
            Verdict::Swap {
                with: Phase::C,
                polarity: Polarity::Inverted
            }
        );
    }

    #[test]
    fn test_ambiguous_band() {
        let measured = PhaseCurrent::new(1.0, -1.0, 0.9);
        let verdict = judge(Phase::A, &measured, &A_ALTERNATES, &SyncConfig::default());
        assert_eq!(verdict, Verdict::Ambiguous);
    }

    #[test]
    fn test_ambiguous_without_phase_c() {
        let measured = PhaseCurrent::new(1.0, -0.9, 0.0);
        let verdict = judge(Phase::A, &measured, &[Phase::B], &SyncConfig::default());
        assert_eq!(verdict, Verdict::Ambiguous);
    }

    #[test]
    fn test_no_current_is_ambiguous() {
        let verdict = judge(
            Phase::A,
            &PhaseCurrent::zero(),
            &A_ALTERNATES,
            &SyncConfig::default(),
        );
        assert_eq!(verdict, Verdict::Ambiguous);
    }

    #[test]
    fn test_custom_thresholds() {
        let measured = PhaseCurrent::new(1.0, -0.8, -0.8);
        let strict = SyncConfig::default();
        let loose = SyncConfig {
            confirm_ratio: 1.2,
            ..SyncConfig::default()
        };
        assert_eq!(judge(Phase::A, &measured, &A_ALTERNATES, &strict), Verdict::Ambiguous);
        assert_eq!(
            judge(Phase::A, &measured, &A_ALTERNATES, &loose),
            Verdict::Confirmed(Polarity::Normal)
        );
    }

    #[test]
    fn test_phase_c_sign_only() {
        let measured = PhaseCurrent::new(-0.5, -0.5, -1.0);
        let verdict = judge(Phase::C, &measured, &[], &SyncConfig::default());
        assert_eq!(verdict, Verdict::Confirmed(Polarity::Inverted));
    }
}
