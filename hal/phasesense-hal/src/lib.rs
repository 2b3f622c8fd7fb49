//! phasesense Hardware Abstraction Layer
//!
//! This crate defines the hardware collaborators the current sensing code
//! talks to. Chip-specific crates implement them for their ADC and timer
//! peripherals; tests implement them with simulated signals.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Firmware (control loop, init)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  phasesense-drivers (InlineCurrentSense)│
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  phasesense-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  ADC channels │       │ 3-phase PWM   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`adc::AnalogInput`] - Shunt amplifier voltage sampling
//! - [`pwm::PhaseDriver`] - Per-phase drive voltage output
//!
//! Blocking delays use [`embedded_hal::delay::DelayNs`] directly.
//!
//! [`embedded_hal::delay::DelayNs`]: https://docs.rs/embedded-hal/1/embedded_hal/delay/trait.DelayNs.html

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod pwm;

// Re-export key traits at crate root for convenience
pub use adc::{AdcChannel, AnalogInput};
pub use pwm::PhaseDriver;
