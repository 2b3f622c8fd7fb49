//! Phase synchronization tuning
//!
//! The defaults are empirical. The ratio bounds bracket the values a
//! three-phase divider produces when one phase is driven and the others
//! are grounded: about 2.0 for the driven phase against a neighbour and
//! about 0.5 the other way round.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::sense::{is_positive, ConfigError};
use crate::current::Phase;

/// Driver synchronization parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SyncConfig {
    /// Wait after energizing a phase before sampling (ms)
    pub settle_ms: u32,
    /// Wait between averaged samples (ms)
    pub sample_interval_ms: u32,
    /// Averaged samples when energizing phase A or B
    pub samples_ab: u16,
    /// Averaged samples when energizing phase C
    pub samples_c: u16,
    /// Weight of the running average in each smoothing step
    pub smoothing: f32,
    /// Dominant ratio above which a phase is confirmed
    pub confirm_ratio: f32,
    /// Ratio below which the alternate phase is taken as the driven one
    pub swap_ratio: f32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            settle_ms: 200,
            sample_interval_ms: 3,
            samples_ab: 100,
            samples_c: 50,
            smoothing: 0.6,
            confirm_ratio: 1.5,
            swap_ratio: 0.7,
        }
    }
}

impl SyncConfig {
    /// Check the thresholds leave a non-empty ambiguous band
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.samples_ab == 0 || self.samples_c == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if !(self.smoothing >= 0.0 && self.smoothing < 1.0) {
            return Err(ConfigError::InvalidSmoothing);
        }
        if !is_positive(self.swap_ratio)
            || !is_positive(self.confirm_ratio)
            || self.swap_ratio >= self.confirm_ratio
        {
            return Err(ConfigError::InvalidRatioThresholds);
        }
        Ok(())
    }

    /// Averaged samples for a stage
    pub fn samples_for(&self, phase: Phase) -> u16 {
        match phase {
            Phase::C => self.samples_c,
            _ => self.samples_ab,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SyncConfig::default();
        assert_eq!(config.settle_ms, 200);
        assert_eq!(config.sample_interval_ms, 3);
        assert_eq!(config.samples_for(Phase::A), 100);
        assert_eq!(config.samples_for(Phase::B), 100);
        assert_eq!(config.samples_for(Phase::C), 50);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let config = SyncConfig {
            confirm_ratio: 0.7,
            swap_ratio: 1.5,
            ..SyncConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidRatioThresholds));
    }

    #[test]
    fn test_rejects_bad_smoothing() {
        for smoothing in [1.0, -0.1, f32::NAN] {
            let config = SyncConfig {
                smoothing,
                ..SyncConfig::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::InvalidSmoothing));
        }
    }

    #[test]
    fn test_rejects_zero_samples() {
        let config = SyncConfig {
            samples_c: 0,
            ..SyncConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroSamples));
    }
}
