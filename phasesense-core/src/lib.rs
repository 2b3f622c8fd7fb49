//! Board-agnostic core logic for phasesense
//!
//! This crate contains everything about inline current sensing that does
//! not touch hardware:
//!
//! - Phase, channel assignment and current sample types
//! - Sensing and synchronization configuration
//! - The ratio policy that decides whether a phase is wired correctly
//! - Calibration snapshots for persisting an alignment
//! - The [`traits::CurrentSense`] interface used by control loops

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod current;
pub mod sync;
pub mod traits;
