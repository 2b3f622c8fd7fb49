//! Zero-current offset calibration

use phasesense_core::current::{ChannelAssignment, Phase, PhaseOffsets};
use phasesense_hal::AnalogInput;

/// Measure the amplifier output of every assigned channel at zero current
///
/// The channels are read interleaved, A then B then C, `samples` times and
/// the mean is returned. Phase C is skipped and left at 0 when it is not
/// sensed. The motor must be unpowered while this runs.
pub fn measure_offsets<A: AnalogInput>(
    adc: &mut A,
    channels: &ChannelAssignment,
    samples: u16,
) -> PhaseOffsets {
    let mut sums = [0.0f32; 3];

    for _ in 0..samples {
        for (sum, phase) in sums.iter_mut().zip(Phase::ALL) {
            if let Some(channel) = channels.get(phase) {
                *sum += adc.read_voltage(channel);
            }
        }
    }

    if samples == 0 {
        return PhaseOffsets::default();
    }

    let n = samples as f32;
    PhaseOffsets::new(sums[0] / n, sums[1] / n, sums[2] / n)
}
