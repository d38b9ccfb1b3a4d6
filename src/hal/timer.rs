//! Shared Capture/Compare Counter
//!
//! TIM3 runs free at `TIMER_TICK_HZ` over its full 16-bit range and lends
//! one capture/compare channel to each state machine. A capture is
//! requested by software through the event generation register, which
//! latches the counter at the instant the request is accepted.

use embassy_stm32::pac::timer::{vals, TimGp16};
use embassy_stm32::timer::low_level::Timer;
use embassy_stm32::timer::GeneralInstance4Channel;

use crate::capture::CaptureCompare;
use crate::config::TIMER_PRESCALER;

/// Free-running counter shared by the capture/compare channels
#[derive(Clone, Copy)]
pub struct SharedCounter {
    regs: TimGp16,
}

impl SharedCounter {
    /// Configure `timer` as a free-running counter and start it
    ///
    /// The timer must outlive every channel handed out, so it is borrowed
    /// for `'static` (its clock is gated off when dropped).
    #[must_use]
    pub fn start<T: GeneralInstance4Channel>(timer: &'static Timer<'static, T>) -> Self {
        let regs = timer.regs_gp16();
        regs.cr1().modify(|w| w.set_cen(false));
        regs.dier().write(|_| {});
        regs.psc().write_value((TIMER_PRESCALER - 1) as u16);
        regs.arr().write(|w| w.set_arr(u16::MAX));
        regs.egr().write(|w| w.set_ug(true));
        regs.sr().write(|_| {});
        regs.cr1().modify(|w| w.set_cen(true));
        Self { regs }
    }

    /// Hand out capture/compare channel `index` (0-3)
    #[must_use]
    pub const fn channel(&self, index: usize) -> TimerChannel {
        TimerChannel {
            regs: self.regs,
            index,
        }
    }

    /// Current counter value
    #[must_use]
    pub fn now(&self) -> u16 {
        self.regs.cnt().read().cnt()
    }
}

/// One capture/compare channel of the shared counter
#[derive(Clone, Copy)]
pub struct TimerChannel {
    regs: TimGp16,
    index: usize,
}

impl TimerChannel {
    /// Acknowledge the channel's event if it is enabled and flagged
    ///
    /// Called from the shared interrupt vector to decide which owner to
    /// dispatch to.
    pub fn take_event(&self) -> bool {
        let enabled = self.regs.dier().read().ccie(self.index);
        let flagged = self.regs.sr().read().ccif(self.index);
        if enabled && flagged {
            self.regs.sr().modify(|w| w.set_ccif(self.index, false));
            true
        } else {
            false
        }
    }

    /// Channel index
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    fn quiesce(&self) {
        self.regs.dier().modify(|w| w.set_ccie(self.index, false));
        self.regs.ccer().modify(|w| w.set_cce(self.index, false));
        self.regs.sr().modify(|w| w.set_ccif(self.index, false));
    }
}

impl CaptureCompare for TimerChannel {
    fn arm_capture(&mut self) {
        self.quiesce();
        // CCxS = 01: input mapped on its own TI; the capture itself is
        // triggered through EGR, not by the pin
        self.regs
            .ccmr_input(self.index / 2)
            .modify(|w| w.set_ccs(self.index % 2, vals::CcmrInputCcs::from_bits(0b01)));
        self.regs.ccer().modify(|w| w.set_cce(self.index, true));
        self.regs.dier().modify(|w| w.set_ccie(self.index, true));
        self.regs.egr().write(|w| w.set_ccg(self.index, true));
    }

    fn arm_compare(&mut self, at: u16) {
        self.quiesce();
        self.regs.ccmr_output(self.index / 2).modify(|w| {
            w.set_ccs(self.index % 2, vals::CcmrOutputCcs::from_bits(0b00));
            w.set_ocm(self.index % 2, vals::Ocm::from_bits(0b0000));
        });
        self.regs.ccr(self.index).write(|w| w.set_ccr(at));
        self.regs.dier().modify(|w| w.set_ccie(self.index, true));
    }

    fn disable(&mut self) {
        self.quiesce();
    }

    fn captured(&self) -> u16 {
        self.regs.ccr(self.index).read().ccr()
    }

    fn now(&self) -> u16 {
        self.regs.cnt().read().cnt()
    }
}

impl defmt::Format for TimerChannel {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "CC{}", self.index + 1);
    }
}
