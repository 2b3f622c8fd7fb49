//! Shunt and amplifier parameters

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::current::ChannelAssignment;

/// Samples averaged per channel when measuring zero-current offsets
pub const DEFAULT_OFFSET_SAMPLES: u16 = 500;

/// Errors from configuration validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Shunt resistance is not a positive finite number
    InvalidShuntResistance,
    /// Amplifier gain is not a positive finite number
    InvalidAmpGain,
    /// Two phases share the same analog input
    DuplicateChannel,
    /// A sample count is zero
    ZeroSamples,
    /// Confirm and swap ratios do not bracket an ambiguous band
    InvalidRatioThresholds,
    /// Smoothing weight is outside [0, 1)
    InvalidSmoothing,
}

/// Inline current sense configuration
///
/// Everything here is fixed once the sensor is constructed, except the
/// channel assignment which synchronization may rearrange.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurrentSenseConfig {
    /// Shunt resistor value in ohms
    pub shunt_resistance: f32,
    /// Current sense amplifier gain (V/V)
    pub amp_gain: f32,
    /// Initial phase to analog input mapping
    pub channels: ChannelAssignment,
    /// Samples averaged per channel by offset calibration
    #[cfg_attr(feature = "serde", serde(default = "default_offset_samples"))]
    pub offset_samples: u16,
}

#[cfg(feature = "serde")]
fn default_offset_samples() -> u16 {
    DEFAULT_OFFSET_SAMPLES
}

impl CurrentSenseConfig {
    /// Create a config with the default offset sample count
    pub const fn new(shunt_resistance: f32, amp_gain: f32, channels: ChannelAssignment) -> Self {
        Self {
            shunt_resistance,
            amp_gain,
            channels,
            offset_samples: DEFAULT_OFFSET_SAMPLES,
        }
    }

    /// Amps per volt of amplifier output
    pub fn volts_to_amps_ratio(&self) -> f32 {
        1.0 / (self.shunt_resistance * self.amp_gain)
    }

    /// Check the parameters describe a usable sensor
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.shunt_resistance) {
            return Err(ConfigError::InvalidShuntResistance);
        }
        if !is_positive(self.amp_gain) {
            return Err(ConfigError::InvalidAmpGain);
        }
        if self.channels.has_duplicates() {
            return Err(ConfigError::DuplicateChannel);
        }
        if self.offset_samples == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        Ok(())
    }
}

/// Positive and finite (rejects NaN)
pub(crate) fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
