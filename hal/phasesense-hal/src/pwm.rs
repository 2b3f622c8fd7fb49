//! Three-phase drive output
//!
//! Only the voltage command is abstracted here. Dead time, switching
//! frequency and modulation belong to the implementation.

/// Three-phase motor driver
///
/// Implementations translate per-phase voltages into duty cycles for
/// their timer peripheral.
pub trait PhaseDriver {
    /// Command the drive voltage of each phase
    fn set_pwm(&mut self, ua: f32, ub: f32, uc: f32);

    /// Remove all drive voltage
    fn stop(&mut self) {
        self.set_pwm(0.0, 0.0, 0.0);
    }
}

impl<T: PhaseDriver + ?Sized> PhaseDriver for &mut T {
    fn set_pwm(&mut self, ua: f32, ub: f32, uc: f32) {
        (**self).set_pwm(ua, ub, uc)
    }

    fn stop(&mut self) {
        (**self).stop()
    }
}
