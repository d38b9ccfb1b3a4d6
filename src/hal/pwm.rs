//! PWM Driver
//!
//! Side-tone square wave on a PWM channel of its own timer.

use embassy_stm32::time::Hertz;
use embassy_stm32::timer::simple_pwm::SimplePwm;
use embassy_stm32::timer::{Channel, GeneralInstance4Channel};

use crate::radio::sidetone::TonePwm;

/// Side-tone PWM output
pub struct SidetonePwm<'d, T: GeneralInstance4Channel> {
    pwm: SimplePwm<'d, T>,
    channel: Channel,
}

impl<'d, T: GeneralInstance4Channel> SidetonePwm<'d, T> {
    /// Wrap a PWM timer and the channel wired to the tone output
    #[must_use]
    pub fn new(pwm: SimplePwm<'d, T>, channel: Channel) -> Self {
        Self { pwm, channel }
    }
}

impl<T: GeneralInstance4Channel> TonePwm for SidetonePwm<'_, T> {
    fn run(&mut self, hz: u32) {
        self.pwm.set_frequency(Hertz(hz));
        let mut ch = self.pwm.channel(self.channel);
        ch.set_duty_cycle_fraction(1, 2);
        ch.enable();
    }

    fn halt(&mut self) {
        let mut ch = self.pwm.channel(self.channel);
        ch.set_duty_cycle_fully_off();
        ch.disable();
    }
}
