//! Driver synchronization
//!
//! Finds which analog input carries which driver phase, and with which
//! sign, by energizing one phase at a time:
//!
//! 1. Drive A with B and C low. A must read about twice B (or C), else
//!    swap A with whichever channel carries the driven current.
//! 2. Same for B against A and C.
//! 3. Drive C, when it is sensed, and record only its sign.
//!
//! The motor is powered for about 1.4 s in total and must be free to
//! align with each energized phase.

use embedded_hal::delay::DelayNs;
use phasesense_core::current::{Phase, PhaseCurrent, Polarity};
use phasesense_core::sync::{current_ratio, judge, SyncError, SyncOutcome, Verdict};
use phasesense_hal::{AnalogInput, PhaseDriver};

use super::inline::InlineCurrentSense;

impl<A: AnalogInput> InlineCurrentSense<A> {
    /// Align the channel mapping and polarity with the driver
    ///
    /// `voltage` is applied to one phase at a time and must be low enough
    /// to be safe for the windings at standstill. Offsets must already be
    /// calibrated. On success the mapping, offsets and polarity are
    /// updated and stay in effect for [`CurrentSense::get_phase_currents`].
    /// On failure the driver is left de-energized and the mapping may be
    /// partially updated.
    ///
    /// Running it again on a correctly aligned sensor changes nothing.
    ///
    /// [`CurrentSense::get_phase_currents`]: phasesense_core::traits::CurrentSense::get_phase_currents
    pub fn driver_sync<D, T>(
        &mut self,
        driver: &mut D,
        delay: &mut T,
        voltage: f32,
    ) -> Result<SyncOutcome, SyncError>
    where
        D: PhaseDriver,
        T: DelayNs,
    {
        info!("driver sync: {} V per phase", voltage);
        let has_c = self.channels.has_phase_c();
        let mut pins_swapped = false;

        for phase in [Phase::A, Phase::B] {
            let measured = self.energize(driver, delay, phase, voltage);
            let alternates = phase.alternates(has_c);
            if let Some(&reference) = alternates.first() {
                let ratio = current_ratio(measured.get(phase), measured.get(reference));
                debug!("phase {}: ratio to {} = {}", phase, reference, ratio);
            }

            match judge(phase, &measured, &alternates, &self.sync) {
                Verdict::Confirmed(polarity) => {
                    debug!("phase {}: confirmed, {}", phase, polarity);
                    self.gains.set(phase, polarity);
                }
                Verdict::Swap { with, polarity } => {
                    if phase == Phase::B && with == Phase::A {
                        // Phase A's channel was settled by the previous stage
                        warn!("phase B: taking the channel confirmed for phase A");
                    }
                    info!("phase {}: swapping channels with phase {}", phase, with);
                    self.channels.swap(phase, with);
                    self.offsets.swap(phase, with);
                    self.gains.set(phase, polarity);
                    pins_swapped = true;
                }
                Verdict::Ambiguous => {
                    error!(
                        "phase {}: no dominant current, not measured or bad connection",
                        phase
                    );
                    return Err(SyncError::UnmeasurablePhase(phase));
                }
            }
        }

        if has_c {
            let measured = self.energize(driver, delay, Phase::C, voltage);
            let polarity = Polarity::from_sign(measured.c);
            debug!("phase C: {}", polarity);
            self.gains.set(Phase::C, polarity);
        }

        let outcome = SyncOutcome {
            pins_swapped,
            polarity_inverted: self.gains.any_inverted(),
        };
        info!(
            "driver sync done: swapped={} inverted={}",
            outcome.pins_swapped, outcome.polarity_inverted
        );
        Ok(outcome)
    }

    /// Energize one phase, settle, average the raw currents and de-energize
    fn energize<D, T>(
        &mut self,
        driver: &mut D,
        delay: &mut T,
        phase: Phase,
        voltage: f32,
    ) -> PhaseCurrent
    where
        D: PhaseDriver,
        T: DelayNs,
    {
        match phase {
            Phase::A => driver.set_pwm(voltage, 0.0, 0.0),
            Phase::B => driver.set_pwm(0.0, voltage, 0.0),
            Phase::C => driver.set_pwm(0.0, 0.0, voltage),
        }
        delay.delay_ms(self.sync.settle_ms);

        let mut average = self.read_raw();
        for _ in 0..self.sync.samples_for(phase) {
            average = average.blend(self.read_raw(), self.sync.smoothing);
            delay.delay_ms(self.sync.sample_interval_ms);
        }

        driver.stop();
        debug!("phase {} energized: {}", phase, average);
        average
    }
}
