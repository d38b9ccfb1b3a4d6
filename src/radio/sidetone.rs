//! Side-tone Generator
//!
//! Fixed-frequency square wave on the tone output while transmitting.
//! Runs on its own PWM timer, independent of the shared capture/compare
//! counter.

use crate::config::SIDETONE_HZ;

/// PWM output driving the side-tone pin
pub trait TonePwm {
    /// Configure a 50% duty square wave at `hz` and start it
    fn run(&mut self, hz: u32);

    /// Stop the timer and leave the output low
    fn halt(&mut self);
}

/// Side-tone generator
///
/// Tracks whether the oscillator is running so repeated `start`/`stop`
/// calls never reconfigure the hardware (no audible glitch on a second
/// `start`).
pub struct Sidetone<P> {
    pwm: P,
    frequency_hz: u32,
    running: bool,
}

impl<P: TonePwm> Sidetone<P> {
    /// Create a generator at the configured side-tone frequency
    ///
    /// The output is halted so it starts low.
    pub fn new(pwm: P) -> Self {
        Self::with_frequency(pwm, SIDETONE_HZ)
    }

    /// Create a generator at a custom frequency
    pub fn with_frequency(mut pwm: P, frequency_hz: u32) -> Self {
        pwm.halt();
        Self {
            pwm,
            frequency_hz,
            running: false,
        }
    }

    /// Start the oscillator (no-op if already running)
    pub fn start(&mut self) {
        if !self.running {
            self.pwm.run(self.frequency_hz);
            self.running = true;
        }
    }

    /// Stop the oscillator (no-op if already stopped)
    pub fn stop(&mut self) {
        if self.running {
            self.pwm.halt();
            self.running = false;
        }
    }

    /// Check if the oscillator is running
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Get the tone frequency
    #[must_use]
    pub const fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }

    /// Borrow the PWM output
    #[must_use]
    pub const fn pwm(&self) -> &P {
        &self.pwm
    }
}

#[cfg(feature = "embedded")]
impl<P> defmt::Format for Sidetone<P> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Sidetone({}Hz, run={})", self.frequency_hz, self.running);
    }
}
