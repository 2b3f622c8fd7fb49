//! Phase to ADC channel mapping and polarity correction

use heapless::Vec;
use phasesense_hal::AdcChannel;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Logical motor phase, in the driver's phase order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    A,
    B,
    C,
}

impl Phase {
    /// All phases in synchronization order
    pub const ALL: [Phase; 3] = [Phase::A, Phase::B, Phase::C];

    /// Phases a channel may be swapped with when this phase is energized
    ///
    /// The first entry is also the reference the dominant ratio is taken
    /// against. Phase C is only listed when the board senses it, and phase
    /// C itself has no alternates.
    pub fn alternates(self, has_phase_c: bool) -> Vec<Phase, 2> {
        let mut alternates = Vec::new();
        let candidates: &[Phase] = match self {
            Phase::A => &[Phase::B, Phase::C],
            Phase::B => &[Phase::A, Phase::C],
            Phase::C => &[],
        };
        for &phase in candidates {
            if phase != Phase::C || has_phase_c {
                // Capacity is 2 and at most 2 candidates exist
                let _ = alternates.push(phase);
            }
        }
        alternates
    }
}

/// Sign correction applied to a phase's current
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Polarity {
    /// Amplifier output rises with current into the motor
    #[default]
    Normal,
    /// Amplifier output falls with current into the motor
    Inverted,
}

impl Polarity {
    /// Polarity that makes `current` read positive
    ///
    /// Zero maps to [`Polarity::Normal`] so the correction stays ±1.
    pub fn from_sign(current: f32) -> Self {
        if current < 0.0 {
            Polarity::Inverted
        } else {
            Polarity::Normal
        }
    }

    /// Multiplier applied to the measured current
    pub const fn factor(self) -> f32 {
        match self {
            Polarity::Normal => 1.0,
            Polarity::Inverted => -1.0,
        }
    }

    pub const fn is_inverted(self) -> bool {
        matches!(self, Polarity::Inverted)
    }
}

/// Per-phase polarity correction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GainCorrection {
    pub a: Polarity,
    pub b: Polarity,
    pub c: Polarity,
}

impl GainCorrection {
    /// All phases normal
    pub const fn new() -> Self {
        Self {
            a: Polarity::Normal,
            b: Polarity::Normal,
            c: Polarity::Normal,
        }
    }

    pub fn get(&self, phase: Phase) -> Polarity {
        match phase {
            Phase::A => self.a,
            Phase::B => self.b,
            Phase::C => self.c,
        }
    }

    pub fn set(&mut self, phase: Phase, polarity: Polarity) {
        match phase {
            Phase::A => self.a = polarity,
            Phase::B => self.b = polarity,
            Phase::C => self.c = polarity,
        }
    }

    /// Check if any phase needs its sign flipped
    pub fn any_inverted(&self) -> bool {
        self.a.is_inverted() || self.b.is_inverted() || self.c.is_inverted()
    }
}

/// Mapping from logical phases to physical analog inputs
///
/// Phase C is optional; boards with two shunts leave it unset and
/// reconstruct the third current elsewhere if they need it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChannelAssignment {
    a: AdcChannel,
    b: AdcChannel,
    #[cfg_attr(feature = "serde", serde(default))]
    c: Option<AdcChannel>,
}

impl ChannelAssignment {
    /// Create an assignment, `c` is `None` when phase C is not sensed
    pub const fn new(a: AdcChannel, b: AdcChannel, c: Option<AdcChannel>) -> Self {
        Self { a, b, c }
    }

    /// Create a two-shunt assignment
    pub const fn two_phase(a: AdcChannel, b: AdcChannel) -> Self {
        Self::new(a, b, None)
    }

    pub const fn a(&self) -> AdcChannel {
        self.a
    }

    pub const fn b(&self) -> AdcChannel {
        self.b
    }

    pub const fn c(&self) -> Option<AdcChannel> {
        self.c
    }

    /// Check if phase C is sensed
    pub const fn has_phase_c(&self) -> bool {
        self.c.is_some()
    }

    /// Get the channel currently assigned to a phase
    pub fn get(&self, phase: Phase) -> Option<AdcChannel> {
        match phase {
            Phase::A => Some(self.a),
            Phase::B => Some(self.b),
            Phase::C => self.c,
        }
    }

    /// Exchange the physical inputs of two phases
    ///
    /// Returns false and leaves the assignment untouched if either phase
    /// has no channel.
    pub fn swap(&mut self, first: Phase, second: Phase) -> bool {
        let (Some(x), Some(y)) = (self.get(first), self.get(second)) else {
            return false;
        };
        self.put(first, y);
        self.put(second, x);
        true
    }

    fn put(&mut self, phase: Phase, channel: AdcChannel) {
        match phase {
            Phase::A => self.a = channel,
            Phase::B => self.b = channel,
            Phase::C => self.c = Some(channel),
        }
    }

    /// Check if two phases share a physical input
    pub fn has_duplicates(&self) -> bool {
        self.a == self.b || self.c == Some(self.a) || self.c == Some(self.b)
    }

    /// Check if both assignments use the same physical inputs, in any order
    pub fn same_inputs(&self, other: &ChannelAssignment) -> bool {
        let mut ours = self.inputs();
        let mut theirs = other.inputs();
        ours.sort_unstable();
        theirs.sort_unstable();
        ours == theirs
    }

    fn inputs(&self) -> Vec<AdcChannel, 3> {
        let mut channels = Vec::new();
        for phase in Phase::ALL {
            if let Some(channel) = self.get(phase) {
                let _ = channels.push(channel);
            }
        }
        channels
    }
}
