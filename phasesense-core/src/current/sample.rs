//! Phase current samples and zero-current offsets

use core::ops::Sub;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::channels::Phase;

/// Instantaneous phase currents in amps
///
/// `c` is 0 when phase C is not sensed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseCurrent {
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl PhaseCurrent {
    pub const fn new(a: f32, b: f32, c: f32) -> Self {
        Self { a, b, c }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn get(&self, phase: Phase) -> f32 {
        match phase {
            Phase::A => self.a,
            Phase::B => self.b,
            Phase::C => self.c,
        }
    }

    /// Exponential moving average step
    ///
    /// `keep` is the weight of the current value, the new sample gets
    /// `1 - keep`.
    pub fn blend(self, sample: PhaseCurrent, keep: f32) -> Self {
        let take = 1.0 - keep;
        Self {
            a: self.a * keep + sample.a * take,
            b: self.b * keep + sample.b * take,
            c: self.c * keep + sample.c * take,
        }
    }
}

impl Sub<PhaseCurrent> for PhaseCurrent {
    type Output = Self;
    fn sub(self, c: PhaseCurrent) -> Self::Output {
        PhaseCurrent::new(self.a - c.a, self.b - c.b, self.c - c.c)
    }
}

/// Zero-current amplifier output voltage per channel
///
/// Each offset belongs to the physical input currently assigned to the
/// phase, so a channel swap must swap the offsets with it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhaseOffsets {
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl PhaseOffsets {
    pub const fn new(a: f32, b: f32, c: f32) -> Self {
        Self { a, b, c }
    }

    pub fn get(&self, phase: Phase) -> f32 {
        match phase {
            Phase::A => self.a,
            Phase::B => self.b,
            Phase::C => self.c,
        }
    }

    fn get_mut(&mut self, phase: Phase) -> &mut f32 {
        match phase {
            Phase::A => &mut self.a,
            Phase::B => &mut self.b,
            Phase::C => &mut self.c,
        }
    }

    /// Exchange the offsets of two phases
    pub fn swap(&mut self, first: Phase, second: Phase) {
        let x = self.get(first);
        let y = self.get(second);
        *self.get_mut(first) = y;
        *self.get_mut(second) = x;
    }
}
