//! Radio Interface
//!
//! Composition root for the button and PTT state machines. Interrupt
//! handlers and the command layer reach both machines only through this
//! type, which keeps the two disjoint channels of the shared counter
//! routed to their owners.

use crate::capture::{CaptureCompare, ChannelEvent};
use crate::radio::debounce::{Debouncer, EdgeInput};
use crate::radio::ptt::{PttEngine, TxLine};
use crate::radio::sidetone::TonePwm;
use crate::types::Transition;

/// Button-to-PTT interface
///
/// `D` is the debounce channel, `T` the PTT delay channel; both belong to
/// the same counter.
pub struct RadioInterface<I, D, L, P, T> {
    debounce: Debouncer<I, D>,
    ptt: PttEngine<L, P, T>,
}

impl<I, D, L, P, T> RadioInterface<I, D, L, P, T>
where
    I: EdgeInput,
    D: CaptureCompare,
    L: TxLine,
    P: TonePwm,
    T: CaptureCompare,
{
    /// Compose a debouncer and a PTT engine
    pub fn new(debounce: Debouncer<I, D>, ptt: PttEngine<L, P, T>) -> Self {
        Self { debounce, ptt }
    }

    /// Button line edge interrupt
    pub fn on_button_edge(&mut self) -> bool {
        self.debounce.on_edge_interrupt()
    }

    /// Debounce channel interrupt
    ///
    /// A confirmed press toggles PTT; a confirmed release does nothing.
    pub fn on_debounce_timer(&mut self) -> Option<Transition> {
        let confirmed = self.debounce.on_timer_event();
        if confirmed == Some(Transition::Press) {
            self.ptt.toggle();
        }
        confirmed
    }

    /// PTT delay channel interrupt
    pub fn on_delay_timer(&mut self) -> ChannelEvent {
        self.ptt.on_timer_event()
    }

    /// Force transmit off and drop any pending delayed-on
    pub fn closeout(&mut self) {
        self.ptt.set(false);
    }

    /// Borrow the PTT engine
    #[must_use]
    pub const fn ptt(&self) -> &PttEngine<L, P, T> {
        &self.ptt
    }

    /// Mutably borrow the PTT engine (command layer)
    pub fn ptt_mut(&mut self) -> &mut PttEngine<L, P, T> {
        &mut self.ptt
    }

    /// Borrow the debouncer
    #[must_use]
    pub const fn debouncer(&self) -> &Debouncer<I, D> {
        &self.debounce
    }
}

#[cfg(feature = "embedded")]
impl<I, D, L, P, T> defmt::Format for RadioInterface<I, D, L, P, T> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}, {}", self.ptt, self.debounce);
    }
}
