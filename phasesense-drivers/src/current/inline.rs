//! Inline shunt current sensor
//!
//! Each sensed phase has a shunt in series with the winding and an
//! amplifier whose output sits at a mid-rail offset at zero current:
//!
//! ```text
//! I = polarity * (V_adc - V_offset) / (R_shunt * G_amp)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let config = CurrentSenseConfig::new(0.01, 50.0, channels);
//! let mut sense = InlineCurrentSense::new(adc, config)?;
//! sense.init(); // motor unpowered
//! sense.driver_sync(&mut driver, &mut delay, 2.0)?;
//!
//! // In the control loop:
//! let currents = sense.get_phase_currents();
//! ```

use phasesense_core::config::{
    CalibrationError, ConfigError, CurrentSenseConfig, SenseCalibration, SyncConfig,
};
use phasesense_core::current::{ChannelAssignment, GainCorrection, Phase, PhaseCurrent, PhaseOffsets};
use phasesense_core::traits::CurrentSense;
use phasesense_hal::AnalogInput;

use super::offset::measure_offsets;

/// Inline current sensor over an analog input
pub struct InlineCurrentSense<A> {
    adc: A,
    config: CurrentSenseConfig,
    /// Active mapping, rearranged by synchronization
    pub(crate) channels: ChannelAssignment,
    /// Amps per volt, fixed at construction
    ratio: f32,
    /// Zero-current voltage per phase, follows the channel mapping
    pub(crate) offsets: PhaseOffsets,
    pub(crate) gains: GainCorrection,
    pub(crate) sync: SyncConfig,
}

impl<A: AnalogInput> InlineCurrentSense<A> {
    /// Create a sensor
    ///
    /// No hardware is touched until [`CurrentSense::init`]. Offsets start
    /// at 0 and all phases at normal polarity.
    pub fn new(adc: A, config: CurrentSenseConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            adc,
            channels: config.channels,
            ratio: config.volts_to_amps_ratio(),
            offsets: PhaseOffsets::default(),
            gains: GainCorrection::new(),
            sync: SyncConfig::default(),
            config,
        })
    }

    /// Replace the synchronization tuning
    pub fn set_sync_config(&mut self, sync: SyncConfig) -> Result<(), ConfigError> {
        sync.validate()?;
        self.sync = sync;
        Ok(())
    }

    /// Builder form of [`Self::set_sync_config`]
    pub fn with_sync_config(mut self, sync: SyncConfig) -> Result<Self, ConfigError> {
        self.set_sync_config(sync)?;
        Ok(self)
    }

    pub fn sync_config(&self) -> &SyncConfig {
        &self.sync
    }

    /// Get the configuration the sensor was built with
    pub fn config(&self) -> &CurrentSenseConfig {
        &self.config
    }

    pub fn offsets(&self) -> &PhaseOffsets {
        &self.offsets
    }

    /// Amps per volt of amplifier output
    pub fn volts_to_amps_ratio(&self) -> f32 {
        self.ratio
    }

    /// Access the underlying analog input
    pub fn adc(&mut self) -> &mut A {
        &mut self.adc
    }

    /// Snapshot the alignment for persistent storage
    pub fn calibration(&self) -> SenseCalibration {
        SenseCalibration::new(self.channels, self.offsets, self.gains)
    }

    /// Restore a stored alignment
    ///
    /// The snapshot must be intact and refer to the same physical inputs as
    /// this sensor's configuration, possibly in another order.
    pub fn apply_calibration(&mut self, data: &SenseCalibration) -> Result<(), CalibrationError> {
        data.check()?;
        if !data.channels.same_inputs(&self.config.channels) {
            return Err(CalibrationError::ChannelMismatch);
        }
        self.channels = data.channels;
        self.offsets = data.offsets;
        self.gains = data.gains;
        debug!("calibration restored: {}", data.channels);
        Ok(())
    }

    /// Read one phase with its offset removed, before polarity correction
    fn read_phase(&mut self, phase: Phase) -> f32 {
        match self.channels.get(phase) {
            Some(channel) => {
                (self.adc.read_voltage(channel) - self.offsets.get(phase)) * self.ratio
            }
            None => 0.0,
        }
    }

    /// Read all phases without polarity correction
    ///
    /// Synchronization judges these so its result does not depend on the
    /// polarity found by an earlier run.
    pub(crate) fn read_raw(&mut self) -> PhaseCurrent {
        let a = self.read_phase(Phase::A);
        let b = self.read_phase(Phase::B);
        let c = self.read_phase(Phase::C);
        PhaseCurrent::new(a, b, c)
    }
}

impl<A: AnalogInput> CurrentSense for InlineCurrentSense<A> {
    fn init(&mut self) {
        self.adc
            .configure(self.channels.a(), self.channels.b(), self.channels.c());
        self.calibrate_offsets();
    }

    fn calibrate_offsets(&mut self) {
        self.offsets = measure_offsets(&mut self.adc, &self.channels, self.config.offset_samples);
        debug!("offsets calibrated: {}", self.offsets);
    }

    fn get_phase_currents(&mut self) -> PhaseCurrent {
        let raw = self.read_raw();
        PhaseCurrent::new(
            raw.a * self.gains.a.factor(),
            raw.b * self.gains.b.factor(),
            raw.c * self.gains.c.factor(),
        )
    }

    fn channels(&self) -> &ChannelAssignment {
        &self.channels
    }

    fn gains(&self) -> &GainCorrection {
        &self.gains
    }
}
