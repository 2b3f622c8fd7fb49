//! Sensor traits
//!
//! These traits define the interface between control loops and
//! current sensor implementations.

pub mod current;

pub use current::CurrentSense;
