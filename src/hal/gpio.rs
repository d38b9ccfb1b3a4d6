//! GPIO Abstractions
//!
//! Type-safe GPIO pin wrappers for the radio interface board.
//! Provides semantic meaning to pins through the type system.

use core::convert::Infallible;

use embassy_stm32::gpio::{Input, Output};
use embassy_stm32::pac;
use embedded_hal::digital::OutputPin;

use crate::radio::debounce::EdgeInput;
use crate::radio::ptt::TxLine;
use crate::types::Transition;

/// Status LED state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LedState {
    /// LED is off
    #[default]
    Off,
    /// LED is on
    On,
}

impl defmt::Format for LedState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Off => defmt::write!(f, "OFF"),
            Self::On => defmt::write!(f, "ON"),
        }
    }
}

/// Status LED driver
pub struct StatusLed<'d> {
    pin: Output<'d>,
    state: LedState,
}

impl<'d> StatusLed<'d> {
    /// Create a new status LED (initially off)
    #[must_use]
    pub fn new(mut pin: Output<'d>) -> Self {
        pin.set_low();
        Self {
            pin,
            state: LedState::Off,
        }
    }

    /// Turn LED on
    pub fn on(&mut self) {
        self.pin.set_high();
        self.state = LedState::On;
    }

    /// Turn LED off
    pub fn off(&mut self) {
        self.pin.set_low();
        self.state = LedState::Off;
    }

    /// Get current state
    #[must_use]
    pub const fn state(&self) -> LedState {
        self.state
    }
}

/// Transmit-enable output (active high)
///
/// Generic over any infallible `embedded-hal` output so the same wrapper
/// drives an on-chip pin or an expander.
pub struct PttOutput<P> {
    pin: P,
}

impl<P: OutputPin<Error = Infallible>> PttOutput<P> {
    /// Wrap an output pin
    #[must_use]
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: OutputPin<Error = Infallible>> TxLine for PttOutput<P> {
    fn assert(&mut self) {
        let _ = self.pin.set_high();
    }

    fn deassert(&mut self) {
        let _ = self.pin.set_low();
    }
}

/// PTT push-button on an EXTI line (active low with pull-up)
///
/// The embassy EXTI driver is not used: the button's vector belongs to the
/// debouncer, which needs to mask and re-arm the line itself.
pub struct PttButton<'d> {
    pin: Input<'d>,
    line: usize,
}

impl<'d> PttButton<'d> {
    /// Route GPIO `port` (0 = A, 1 = B, ...) line `line` to EXTI and wrap it
    ///
    /// The line starts masked; the debouncer enables it.
    #[must_use]
    pub fn new(pin: Input<'d>, port: u8, line: usize) -> Self {
        pac::RCC.apb2enr().modify(|w| w.set_syscfgen(true));
        pac::SYSCFG
            .exticr(line / 4)
            .modify(|w| w.set_exti(line % 4, port));
        pac::EXTI.imr(0).modify(|w| w.set_line(line, false));
        pac::EXTI.pr(0).write(|w| w.set_line(line, true));
        Self { pin, line }
    }

    /// Check if the line has latched an edge
    #[must_use]
    pub fn is_pending(&self) -> bool {
        pac::EXTI.pr(0).read().line(self.line)
    }
}

impl EdgeInput for PttButton<'_> {
    fn enable_interrupt(&mut self) {
        pac::EXTI.imr(0).modify(|w| w.set_line(self.line, true));
    }

    fn disable_interrupt(&mut self) {
        pac::EXTI.imr(0).modify(|w| w.set_line(self.line, false));
    }

    fn clear_pending(&mut self) {
        pac::EXTI.pr(0).write(|w| w.set_line(self.line, true));
    }

    fn listen_for(&mut self, transition: Transition) {
        // Active low: press is the falling edge
        let falling = transition == Transition::Press;
        pac::EXTI.ftsr(0).modify(|w| w.set_line(self.line, falling));
        pac::EXTI.rtsr(0).modify(|w| w.set_line(self.line, !falling));
    }

    fn is_active(&self) -> bool {
        self.pin.is_low()
    }
}
