//! TOML sensor configuration
//!
//! Boards describe their shunt sensing in a small TOML document:
//!
//! ```toml
//! [sense]
//! shunt_resistance = 0.01
//! amp_gain = 50.0
//! offset_samples = 500     # optional
//!
//! [sense.channels]
//! a = 0
//! b = 1
//! c = 2                    # omit when phase C is not sensed
//!
//! [sync]                   # optional, every key defaults
//! settle_ms = 200
//! confirm_ratio = 1.5
//! swap_ratio = 0.7
//! ```
//!
//! Parsing goes through the `toml` crate and needs an allocator.

use serde::Deserialize;

use super::sense::{ConfigError, CurrentSenseConfig};
use super::sync::SyncConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Document is not valid TOML or does not match the schema
    Syntax,
    /// Values parsed but failed validation
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Complete sensor settings from one document
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SenseSettings {
    pub sense: CurrentSenseConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

/// Parse and validate TOML sensor settings
pub fn parse_config(input: &str) -> Result<SenseSettings, ParseError> {
    let settings: SenseSettings = ::toml::from_str(input).map_err(|_| ParseError::Syntax)?;
    settings.sense.validate()?;
    settings.sync.validate()?;
    Ok(settings)
}
