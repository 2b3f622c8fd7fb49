//! Driver synchronization results and decision policy
//!
//! The hardware procedure lives in `phasesense-drivers`. This module holds
//! what it decides with and what it reports.

pub mod policy;

pub use policy::{current_ratio, judge, Verdict};

use crate::current::Phase;

/// Successful synchronization
///
/// The two facts are independent: a board can need a channel swap, a
/// polarity flip, both or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncOutcome {
    /// At least one pair of channels was exchanged
    pub pins_swapped: bool,
    /// At least one phase needs its sign flipped
    pub polarity_inverted: bool,
}

impl SyncOutcome {
    /// Nothing had to change
    pub fn is_unchanged(&self) -> bool {
        !self.pins_swapped && !self.polarity_inverted
    }

    /// Legacy numeric status
    ///
    /// 1 = unchanged, 2 = swapped, 3 = inverted, 4 = swapped and inverted.
    pub fn status_code(&self) -> u8 {
        let base = if self.pins_swapped { 2 } else { 1 };
        if self.polarity_inverted {
            base + 2
        } else {
            base
        }
    }
}

/// Errors from driver synchronization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncError {
    /// The energized phase's current could not be told apart from its
    /// neighbours (not measured, or bad connection)
    UnmeasurablePhase(Phase),
}

impl SyncError {
    /// Legacy numeric status, always 0
    pub fn status_code(&self) -> u8 {
        0
    }
}

/// Legacy numeric status of a synchronization result
pub fn status_code(result: &Result<SyncOutcome, SyncError>) -> u8 {
    match result {
        Ok(outcome) => outcome.status_code(),
        Err(e) => e.status_code(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let outcome = |pins_swapped, polarity_inverted| SyncOutcome {
            pins_swapped,
            polarity_inverted,
        };

        assert_eq!(outcome(false, false).status_code(), 1);
        assert_eq!(outcome(true, false).status_code(), 2);
        assert_eq!(outcome(false, true).status_code(), 3);
        assert_eq!(outcome(true, true).status_code(), 4);
        assert_eq!(status_code(&Err(SyncError::UnmeasurablePhase(Phase::B))), 0);
    }

    #[test]
    fn test_unchanged() {
        assert!(SyncOutcome::default().is_unchanged());
        assert!(!SyncOutcome {
            pins_swapped: true,
            polarity_inverted: false
        }
        .is_unchanged());
    }
}
