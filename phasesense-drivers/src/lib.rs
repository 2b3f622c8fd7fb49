//! Current sensor implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in phasesense-core:
//!
//! - Inline shunt current sensing (two or three phases)
//! - Zero-current offset calibration
//! - Driver synchronization (phase order and polarity detection)

#![no_std]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible to the other modules
#[macro_use]
mod fmt;

pub mod current;
