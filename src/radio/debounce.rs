//! Button Debounce Engine
//!
//! Turns the raw edge interrupts of the PTT push-button into one clean
//! event per physical transition.
//!
//! The first edge masks the line's interrupt and starts a window on the
//! debounce capture/compare channel. The window is anchored on the counter
//! value captured when the edge was taken, so its length does not depend
//! on interrupt latency. Bounces inside the window are never seen; when
//! the window expires the line is unmasked and the captured transition is
//! reported.
//!
//! ```text
//!   Idle ──(edge)──► Captured ──(window expiry)──► Idle
//!                    edges masked                  report transition
//! ```

use crate::capture::{CaptureCompare, ChannelEvent, ChannelPhase, OneShot};
use crate::config::DEBOUNCE_TICKS;
use crate::types::{Ticks, Transition};

/// Edge-capable button input
pub trait EdgeInput {
    /// Unmask the line's edge interrupt
    fn enable_interrupt(&mut self);

    /// Mask the line's edge interrupt
    fn disable_interrupt(&mut self);

    /// Acknowledge any latched edge
    fn clear_pending(&mut self);

    /// Select which transition raises the interrupt
    fn listen_for(&mut self, transition: Transition);

    /// Sample the line (true while the button is held)
    fn is_active(&self) -> bool;
}

/// Debounce state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DebounceState {
    /// Waiting for an edge, line interrupt enabled
    #[default]
    Idle,
    /// Window open, line interrupt masked
    Captured {
        /// Transition that opened the window
        edge: Transition,
    },
}

#[cfg(feature = "embedded")]
impl defmt::Format for DebounceState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Idle => defmt::write!(f, "Idle"),
            Self::Captured { edge } => defmt::write!(f, "Captured({})", edge),
        }
    }
}

/// Button debouncer
pub struct Debouncer<I, C> {
    input: I,
    window: OneShot<C>,
    window_ticks: Ticks,
    state: DebounceState,
    expect: Transition,
    ignored_edges: u32,
    confirmed_presses: u32,
}

impl<I, C> Debouncer<I, C>
where
    I: EdgeInput,
    C: CaptureCompare,
{
    /// Create a debouncer with the configured window
    pub fn new(input: I, channel: C) -> Self {
        Self::with_window(input, channel, DEBOUNCE_TICKS)
    }

    /// Create a debouncer with a custom window length
    ///
    /// The line is armed for the transition away from its current level
    /// and its interrupt enabled.
    pub fn with_window(mut input: I, channel: C, window: Ticks) -> Self {
        let expect = Transition::expected_from_level(input.is_active());
        input.listen_for(expect);
        input.clear_pending();
        input.enable_interrupt();
        Self {
            input,
            window: OneShot::new(channel),
            window_ticks: window,
            state: DebounceState::Idle,
            expect,
            ignored_edges: 0,
            confirmed_presses: 0,
        }
    }

    /// Service the button edge interrupt
    ///
    /// Returns true if the edge opened a debounce window.
    pub fn on_edge_interrupt(&mut self) -> bool {
        self.input.clear_pending();

        if let DebounceState::Captured { .. } = self.state {
            // Latched before the mask took effect; the open window covers it.
            self.ignored_edges = self.ignored_edges.saturating_add(1);
            return false;
        }

        self.input.disable_interrupt();
        let edge = self.expect;
        self.expect = edge.opposite();
        self.input.listen_for(self.expect);
        self.state = DebounceState::Captured { edge };
        self.window.start(self.window_ticks);

        #[cfg(feature = "embedded")]
        defmt::trace!("debounce: {} captured", edge);

        true
    }

    /// Service the debounce channel interrupt
    ///
    /// Returns the debounced transition when the window expires, `None`
    /// while the window is still being armed.
    pub fn on_timer_event(&mut self) -> Option<Transition> {
        match self.window.on_event() {
            ChannelEvent::Armed { .. } | ChannelEvent::Spurious => None,
            ChannelEvent::Expired => self.on_debounce_expired(),
        }
    }

    fn on_debounce_expired(&mut self) -> Option<Transition> {
        let DebounceState::Captured { edge } = self.state else {
            return None;
        };
        self.state = DebounceState::Idle;

        // Re-sync with the line: a release inside the window would
        // otherwise leave us waiting for an edge that already happened.
        self.input.clear_pending();
        self.expect = Transition::expected_from_level(self.input.is_active());
        self.input.listen_for(self.expect);
        self.input.enable_interrupt();

        if edge == Transition::Press {
            self.confirmed_presses = self.confirmed_presses.saturating_add(1);
        }

        #[cfg(feature = "embedded")]
        defmt::debug!("debounce: {} confirmed, next {}", edge, self.expect);

        Some(edge)
    }

    /// Get current state
    #[must_use]
    pub const fn state(&self) -> DebounceState {
        self.state
    }

    /// Check if a debounce window is open
    #[must_use]
    pub const fn is_window_open(&self) -> bool {
        matches!(self.state, DebounceState::Captured { .. })
    }

    /// Phase of the debounce channel
    #[must_use]
    pub const fn window_phase(&self) -> ChannelPhase {
        self.window.phase()
    }

    /// Transition the line is currently armed for
    #[must_use]
    pub const fn expected(&self) -> Transition {
        self.expect
    }

    /// Window length
    #[must_use]
    pub const fn window(&self) -> Ticks {
        self.window_ticks
    }

    /// Edges acknowledged while a window was already open
    #[must_use]
    pub const fn ignored_edges(&self) -> u32 {
        self.ignored_edges
    }

    /// Presses confirmed by an expired window
    #[must_use]
    pub const fn confirmed_presses(&self) -> u32 {
        self.confirmed_presses
    }

    /// Borrow the button input
    #[must_use]
    pub const fn input(&self) -> &I {
        &self.input
    }
}

#[cfg(feature = "embedded")]
impl<I, C> defmt::Format for Debouncer<I, C> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Debounce({}, presses={}, ignored={})",
            self.state,
            self.confirmed_presses,
            self.ignored_edges
        );
    }
}
