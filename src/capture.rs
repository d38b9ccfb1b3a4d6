//! Capture/Compare Channel Sequencing
//!
//! Both state machines measure time on one free-running 16-bit counter.
//! Each owns a single capture/compare channel and drives it through the
//! same two-phase sequence: capture the counter at the instant a request
//! is accepted, then compare against `captured + delay`. Anchoring the
//! deadline on the captured value makes the schedule independent of how
//! long the interrupt took to reach the reprogramming code.
//!
//! ```text
//!            start()               capture event            compare event
//!  Idle ───────────────► ArmedCapture ─────────► ArmedCompare ─────────► Idle
//!    ▲                        │                        │              (Expired)
//!    └──────── cancel() ──────┴────────────────────────┘
//! ```

use crate::types::Ticks;

/// One capture/compare channel of the shared counter
///
/// Implementations touch only their own channel's registers. Every method
/// is called with the channel's interrupt masked or from its own handler.
pub trait CaptureCompare {
    /// Latch the counter into the capture register and raise an event
    fn arm_capture(&mut self);

    /// Raise an event when the counter equals `at`
    fn arm_compare(&mut self, at: u16);

    /// Disable the channel and its interrupt, dropping any pending event
    fn disable(&mut self);

    /// Value latched by the most recent capture
    fn captured(&self) -> u16;

    /// Current value of the shared counter
    fn now(&self) -> u16;
}

/// Phase of a channel's capture-then-compare sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ChannelPhase {
    /// Channel disabled
    #[default]
    Idle,
    /// Waiting for the capture that anchors the schedule
    ArmedCapture,
    /// Waiting for the counter to reach the deadline
    ArmedCompare {
        /// Counter value the compare fires at
        deadline: u16,
    },
}

#[cfg(feature = "embedded")]
impl defmt::Format for ChannelPhase {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Idle => defmt::write!(f, "Idle"),
            Self::ArmedCapture => defmt::write!(f, "ArmedCapture"),
            Self::ArmedCompare { deadline } => defmt::write!(f, "ArmedCompare({})", deadline),
        }
    }
}

/// Result of servicing a channel event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelEvent {
    /// Capture taken, compare armed for the deadline
    Armed {
        /// Counter value at the capture
        captured: u16,
        /// Counter value the compare will fire at
        deadline: u16,
    },
    /// Schedule elapsed, channel disabled
    Expired,
    /// Event arrived with no schedule armed (channel was disabled)
    Spurious,
}

#[cfg(feature = "embedded")]
impl defmt::Format for ChannelEvent {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Armed { captured, deadline } => {
                defmt::write!(f, "Armed({} -> {})", captured, deadline);
            }
            Self::Expired => defmt::write!(f, "Expired"),
            Self::Spurious => defmt::write!(f, "Spurious"),
        }
    }
}

/// One-shot schedule on a capture/compare channel
pub struct OneShot<C> {
    channel: C,
    phase: ChannelPhase,
    delay: Ticks,
}

impl<C: CaptureCompare> OneShot<C> {
    /// Wrap a channel, leaving it disabled
    pub fn new(mut channel: C) -> Self {
        channel.disable();
        Self {
            channel,
            phase: ChannelPhase::Idle,
            delay: Ticks::MIN,
        }
    }

    /// Start a schedule of `delay` ticks measured from the capture
    ///
    /// Any schedule already in flight is discarded first.
    pub fn start(&mut self, delay: Ticks) {
        self.channel.disable();
        self.delay = delay;
        self.phase = ChannelPhase::ArmedCapture;
        self.channel.arm_capture();
    }

    /// Abandon the current schedule
    pub fn cancel(&mut self) {
        self.channel.disable();
        self.phase = ChannelPhase::Idle;
    }

    /// Service a channel interrupt
    pub fn on_event(&mut self) -> ChannelEvent {
        match self.phase {
            ChannelPhase::ArmedCapture => {
                let captured = self.channel.captured();
                let delay = self.delay.as_raw();
                // Interrupt latency may already have consumed the whole delay;
                // the compare would then only match after a full wrap.
                if self.channel.now().wrapping_sub(captured) >= delay {
                    self.cancel();
                    return ChannelEvent::Expired;
                }
                let deadline = captured.wrapping_add(delay);
                self.channel.arm_compare(deadline);
                self.phase = ChannelPhase::ArmedCompare { deadline };
                ChannelEvent::Armed { captured, deadline }
            }
            ChannelPhase::ArmedCompare { .. } => {
                self.cancel();
                ChannelEvent::Expired
            }
            ChannelPhase::Idle => {
                self.channel.disable();
                ChannelEvent::Spurious
            }
        }
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> ChannelPhase {
        self.phase
    }

    /// Check if a schedule is in flight
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.phase != ChannelPhase::Idle
    }

    /// Ticks left before the schedule expires
    ///
    /// Before the capture has been serviced the full delay is still ahead.
    #[must_use]
    pub fn remaining(&self) -> Option<Ticks> {
        match self.phase {
            ChannelPhase::Idle => None,
            ChannelPhase::ArmedCapture => Some(self.delay),
            ChannelPhase::ArmedCompare { deadline } => {
                let left = deadline.wrapping_sub(self.channel.now());
                Some(Ticks::saturating(u32::from(left)))
            }
        }
    }

    /// Delay of the current or most recent schedule
    #[must_use]
    pub const fn delay(&self) -> Ticks {
        self.delay
    }

    /// Borrow the underlying channel
    #[must_use]
    pub const fn channel(&self) -> &C {
        &self.channel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Register-level stand-in: records the last programming request
    #[derive(Default)]
    struct Regs {
        counter: u16,
        latched: u16,
        compare: Option<u16>,
        enabled: bool,
    }

    impl CaptureCompare for Regs {
        fn arm_capture(&mut self) {
            self.latched = self.counter;
            self.enabled = true;
        }

        fn arm_compare(&mut self, at: u16) {
            self.compare = Some(at);
            self.enabled = true;
        }

        fn disable(&mut self) {
            self.compare = None;
            self.enabled = false;
        }

        fn captured(&self) -> u16 {
            self.latched
        }

        fn now(&self) -> u16 {
            self.counter
        }
    }

    fn ticks(raw: u16) -> Ticks {
        Ticks::new(raw).unwrap()
    }

    #[test]
    fn sequence_returns_to_idle() {
        let mut shot = OneShot::new(Regs::default());
        assert!(!shot.channel().enabled);

        shot.start(ticks(10));
        assert_eq!(shot.phase(), ChannelPhase::ArmedCapture);
        assert_eq!(
            shot.on_event(),
            ChannelEvent::Armed {
                captured: 0,
                deadline: 10
            }
        );
        assert_eq!(shot.channel().compare, Some(10));

        assert_eq!(shot.on_event(), ChannelEvent::Expired);
        assert!(!shot.channel().enabled);
        assert!(!shot.is_armed());
    }

    #[test]
    fn deadline_wraps() {
        let mut shot = OneShot::new(Regs {
            counter: u16::MAX,
            ..Regs::default()
        });

        shot.start(ticks(2));
        assert_eq!(
            shot.on_event(),
            ChannelEvent::Armed {
                captured: u16::MAX,
                deadline: 1
            }
        );
    }

    #[test]
    fn latency_past_deadline_expires() {
        let mut shot = OneShot::new(Regs::default());

        shot.start(ticks(3));
        shot.channel.counter = 3;

        assert_eq!(shot.on_event(), ChannelEvent::Expired);
        assert_eq!(shot.channel().compare, None);
    }

    #[test]
    fn idle_event_is_spurious() {
        let mut shot = OneShot::new(Regs::default());
        assert_eq!(shot.on_event(), ChannelEvent::Spurious);
        assert_eq!(shot.remaining(), None);
    }
}
