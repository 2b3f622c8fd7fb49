//! Inline shunt current sensing
//!
//! - [`InlineCurrentSense`]: reads phase currents from shunt amplifiers
//! - [`measure_offsets`]: zero-current offset calibration
//! - [`InlineCurrentSense::driver_sync`]: aligns the channel mapping and
//!   polarity with the motor driver's phase order

mod inline;
mod offset;
mod sync;

#[cfg(test)]
pub(crate) mod sim;

pub use inline::InlineCurrentSense;
pub use offset::measure_offsets;
