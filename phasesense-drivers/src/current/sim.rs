//! Simulated motor, shunt amplifiers and driver for tests
//!
//! The three windings are star connected with equal resistance, so a
//! phase voltage command produces `(u - mean(u)) / R` on each phase. Every
//! analog input can be wired to any phase with its own polarity, scale and
//! zero-current offset.

use core::cell::RefCell;

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use phasesense_core::config::CurrentSenseConfig;
use phasesense_core::current::ChannelAssignment;
use phasesense_hal::{AdcChannel, AnalogInput, PhaseDriver};

/// Shunt resistance used by [`sense_config`]
pub const SHUNT: f32 = 0.01;
/// Amplifier gain used by [`sense_config`]
pub const GAIN: f32 = 50.0;

pub struct Plant {
    /// Last phase voltage command
    pub drive: [f32; 3],
    /// Winding resistance in ohms
    pub winding: f32,
    /// Phase seen by each input
    pub wiring: [usize; 3],
    /// -1.0 for an amplifier wired backwards
    pub sign: [f32; 3],
    pub scale: [f32; 3],
    pub offset: [f32; 3],
}

impl Plant {
    /// Correctly wired plant with slightly different offsets per input
    pub fn new() -> Self {
        Self {
            drive: [0.0; 3],
            winding: 1.0,
            wiring: [0, 1, 2],
            sign: [1.0; 3],
            scale: [1.0; 3],
            offset: [1.65, 1.62, 1.68],
        }
    }

    pub fn wired(wiring: [usize; 3]) -> Self {
        Self {
            wiring,
            ..Self::new()
        }
    }

    pub fn phase_currents(&self) -> [f32; 3] {
        let mean = (self.drive[0] + self.drive[1] + self.drive[2]) / 3.0;
        self.drive.map(|u| (u - mean) / self.winding)
    }

    fn voltage(&self, input: usize) -> f32 {
        let current = self.phase_currents()[self.wiring[input]];
        self.offset[input] + self.sign[input] * self.scale[input] * current * SHUNT * GAIN
    }
}

pub struct SimAdc<'a> {
    pub plant: &'a RefCell<Plant>,
    pub configured: Option<(AdcChannel, AdcChannel, Option<AdcChannel>)>,
}

impl<'a> SimAdc<'a> {
    pub fn new(plant: &'a RefCell<Plant>) -> Self {
        Self {
            plant,
            configured: None,
        }
    }
}

impl AnalogInput for SimAdc<'_> {
    fn configure(&mut self, a: AdcChannel, b: AdcChannel, c: Option<AdcChannel>) {
        self.configured = Some((a, b, c));
    }

    fn read_voltage(&mut self, channel: AdcChannel) -> f32 {
        self.plant.borrow().voltage(channel.id() as usize)
    }
}

pub struct SimDriver<'a> {
    pub plant: &'a RefCell<Plant>,
    pub commands: Vec<[f32; 3], 16>,
}

impl<'a> SimDriver<'a> {
    pub fn new(plant: &'a RefCell<Plant>) -> Self {
        Self {
            plant,
            commands: Vec::new(),
        }
    }
}

impl PhaseDriver for SimDriver<'_> {
    fn set_pwm(&mut self, ua: f32, ub: f32, uc: f32) {
        self.plant.borrow_mut().drive = [ua, ub, uc];
        let _ = self.commands.push([ua, ub, uc]);
    }
}

/// Delay that returns immediately and adds up the requested time
#[derive(Default)]
pub struct NoDelay {
    pub total_ns: u64,
}

impl NoDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

pub fn three_phase() -> ChannelAssignment {
    ChannelAssignment::new(AdcChannel(0), AdcChannel(1), Some(AdcChannel(2)))
}

pub fn sense_config(channels: ChannelAssignment) -> CurrentSenseConfig {
    CurrentSenseConfig::new(SHUNT, GAIN, channels)
}
