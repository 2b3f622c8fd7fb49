//! Current sensor trait

use crate::current::{ChannelAssignment, GainCorrection, Phase, PhaseCurrent};

/// Trait for phase current sensors
///
/// Implementations handle the specific sensing topology (inline shunts,
/// low-side shunts, hall sensors). Control loops only depend on this.
pub trait CurrentSense {
    /// Prepare the hardware and measure zero-current offsets
    ///
    /// The motor must be stationary and unpowered.
    fn init(&mut self);

    /// Measure zero-current offsets again
    fn calibrate_offsets(&mut self);

    /// Read all phase currents in amps
    ///
    /// Takes `&mut self` because ADC reads typically require mutable access.
    fn get_phase_currents(&mut self) -> PhaseCurrent;

    /// Current phase to input mapping
    fn channels(&self) -> &ChannelAssignment;

    /// Current polarity correction
    fn gains(&self) -> &GainCorrection;

    /// Read a single phase current in amps
    ///
    /// Returns 0 for phase C when it is not sensed.
    fn get_current(&mut self, phase: Phase) -> f32 {
        self.get_phase_currents().get(phase)
    }
}
