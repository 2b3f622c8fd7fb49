//! Analog input abstractions
//!
//! Shunt amplifiers are read as plain voltages. Conversion from raw ADC
//! counts to volts is the implementation's job, since it depends on the
//! chip's resolution and reference.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Physical analog input identifier
///
/// The number is opaque to this crate. Chip HALs map it to an ADC channel
/// or a GPIO number, whichever their pin mux uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct AdcChannel(pub u8);

impl AdcChannel {
    /// Create a channel identifier
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw identifier
    pub const fn id(self) -> u8 {
        self.0
    }
}

impl From<u8> for AdcChannel {
    fn from(id: u8) -> Self {
        Self(id)
    }
}

/// Voltage sampler for shunt amplifier outputs
///
/// Reads are blocking and expected to take roughly the same time on every
/// channel, because phase samples are taken back to back and treated as
/// simultaneous.
pub trait AnalogInput {
    /// Prepare the inputs for sampling
    ///
    /// Called once before offset calibration. `c` is `None` when the
    /// board only senses two phases.
    fn configure(&mut self, a: AdcChannel, b: AdcChannel, c: Option<AdcChannel>);

    /// Read the instantaneous voltage on a channel, in volts
    ///
    /// Takes `&mut self` because ADC conversions typically require
    /// mutable access to the peripheral.
    fn read_voltage(&mut self, channel: AdcChannel) -> f32;
}

impl<T: AnalogInput + ?Sized> AnalogInput for &mut T {
    fn configure(&mut self, a: AdcChannel, b: AdcChannel, c: Option<AdcChannel>) {
        (**self).configure(a, b, c)
    }

    fn read_voltage(&mut self, channel: AdcChannel) -> f32 {
        (**self).read_voltage(channel)
    }
}
