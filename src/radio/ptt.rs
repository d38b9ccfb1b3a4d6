//! PTT Timing Engine
//!
//! Owns the transmit-enable line and the side-tone, and schedules delayed
//! transmit on its capture/compare channel of the shared counter.
//!
//! [`PttState`] is the single source of truth for transmit-enable. Every
//! mutation starts by disabling the delay channel, which both cancels any
//! delayed-on in flight and masks the only interrupt that could race the
//! update.

use crate::capture::{CaptureCompare, ChannelEvent, OneShot};
use crate::radio::sidetone::{Sidetone, TonePwm};
use crate::types::{PttAction, Ticks};

/// Transmit-enable output to the radio
pub trait TxLine {
    /// Drive the line to its transmitting level
    fn assert(&mut self);

    /// Drive the line to its receiving level
    fn deassert(&mut self);
}

/// PTT state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PttState {
    /// Line deasserted, side-tone stopped
    #[default]
    Off,
    /// Line asserted, side-tone running
    On,
    /// Line deasserted, side-tone stopped, delay channel armed
    Pending {
        /// Scheduled delay as armed on the channel
        delay: Ticks,
    },
}

impl PttState {
    /// Check if transmit is asserted (pending does not count)
    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }

    /// Check if a delayed-on is armed
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for PttState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Off => defmt::write!(f, "OFF"),
            Self::On => defmt::write!(f, "ON"),
            Self::Pending { delay } => defmt::write!(f, "PENDING({})", delay),
        }
    }
}

/// PTT timing engine
pub struct PttEngine<L, P, C> {
    line: L,
    tone: Sidetone<P>,
    delay: OneShot<C>,
    state: PttState,
}

impl<L, P, C> PttEngine<L, P, C>
where
    L: TxLine,
    P: TonePwm,
    C: CaptureCompare,
{
    /// Create an engine in the OFF state
    ///
    /// The line is deasserted, the side-tone halted and the delay channel
    /// disabled before the engine is returned.
    pub fn new(line: L, pwm: P, channel: C) -> Self {
        Self::with_sidetone(line, Sidetone::new(pwm), channel)
    }

    /// Create an engine around a preconfigured side-tone generator
    pub fn with_sidetone(mut line: L, mut tone: Sidetone<P>, channel: C) -> Self {
        line.deassert();
        tone.stop();
        Self {
            line,
            tone,
            delay: OneShot::new(channel),
            state: PttState::Off,
        }
    }

    /// Assert or deassert transmit immediately
    ///
    /// Cancels any pending delayed-on. Asserting while already on leaves
    /// the running side-tone untouched.
    pub fn set(&mut self, on: bool) {
        self.delay.cancel();
        if on {
            self.line.assert();
            self.tone.start();
            self.state = PttState::On;
        } else {
            self.line.deassert();
            self.tone.stop();
            self.state = PttState::Off;
        }

        #[cfg(feature = "embedded")]
        defmt::debug!("PTT {}", self.state);
    }

    /// Flip transmit state
    ///
    /// A pending delayed-on reports as not yet on, so toggling it asserts.
    pub fn toggle(&mut self) {
        let on = !self.get();
        self.set(on);
    }

    /// Apply an immediate action
    pub fn apply(&mut self, action: PttAction) {
        match action {
            PttAction::On => self.set(true),
            PttAction::Off => self.set(false),
            PttAction::Toggle => self.toggle(),
        }
    }

    /// Schedule transmit after `seconds`
    ///
    /// The request is clamped to the representable range and the delay
    /// actually armed is returned. Callers reject negative delays before
    /// getting here.
    pub fn on_delay(&mut self, seconds: f32) -> f32 {
        self.schedule(Ticks::from_seconds(seconds)).as_seconds()
    }

    /// Schedule transmit after `delay` ticks, returning the armed delay
    pub fn schedule(&mut self, delay: Ticks) -> Ticks {
        self.delay.cancel();
        self.line.deassert();
        self.tone.stop();
        self.state = PttState::Pending { delay };
        self.delay.start(delay);

        #[cfg(feature = "embedded")]
        defmt::debug!("PTT {}", self.state);

        delay
    }

    /// Service the delay channel interrupt
    pub fn on_timer_event(&mut self) -> ChannelEvent {
        let event = self.delay.on_event();

        #[cfg(feature = "embedded")]
        defmt::trace!("PTT delay channel: {}", event);

        if event == ChannelEvent::Expired && self.state.is_pending() {
            self.set(true);
        }
        event
    }

    /// Check if transmit is asserted
    #[must_use]
    pub const fn get(&self) -> bool {
        self.state.is_on()
    }

    /// Get current state
    #[must_use]
    pub const fn state(&self) -> PttState {
        self.state
    }

    /// Ticks left before a pending delayed-on fires
    #[must_use]
    pub fn pending_remaining(&self) -> Option<Ticks> {
        if self.state.is_pending() {
            self.delay.remaining()
        } else {
            None
        }
    }

    /// Borrow the side-tone generator
    #[must_use]
    pub const fn sidetone(&self) -> &Sidetone<P> {
        &self.tone
    }

    /// Borrow the transmit line
    #[must_use]
    pub const fn line(&self) -> &L {
        &self.line
    }

    /// Borrow the delay schedule
    #[must_use]
    pub const fn delay_schedule(&self) -> &OneShot<C> {
        &self.delay
    }
}

#[cfg(feature = "embedded")]
impl<L, P, C> defmt::Format for PttEngine<L, P, C> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Ptt({}, {})", self.state, self.tone);
    }
}
