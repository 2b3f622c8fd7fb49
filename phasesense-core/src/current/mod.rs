//! Current sensing data model
//!
//! Logical phases, their mapping to physical ADC inputs, per-phase
//! polarity correction, zero-current offsets and current samples.

pub mod channels;
pub mod sample;

pub use channels::{ChannelAssignment, GainCorrection, Phase, Polarity};
pub use sample::{PhaseCurrent, PhaseOffsets};
