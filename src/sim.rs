//! Host Simulation
//!
//! Simulated counter, capture/compare channels, button, transmit line and
//! side-tone PWM for exercising the state machines without hardware.
//! Handles are cheap clones sharing state, so a test can keep one copy for
//! inspection after moving another into an engine.
//!
//! Time only moves when [`SimTimer::tick`] is called. A software capture
//! latches the counter and raises its event immediately, like a capture
//! generated through the event register on the target; a compare raises
//! its event on the tick the counter reaches the programmed value.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::vec::Vec;

use crate::capture::CaptureCompare;
use crate::config::DEBOUNCE_TICKS;
use crate::radio::debounce::{Debouncer, EdgeInput};
use crate::radio::interface::RadioInterface;
use crate::radio::ptt::{PttEngine, TxLine};
use crate::radio::sidetone::TonePwm;
use crate::types::{Ticks, Transition};

/// Channel configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ChannelMode {
    /// Channel and interrupt disabled
    #[default]
    Disabled,
    /// Capture taken, event pending service
    Capture,
    /// Event when the counter reaches the value
    Compare(u16),
}

#[derive(Debug, Default)]
struct ChannelRegs {
    mode: ChannelMode,
    latched: u16,
    pending: bool,
    captures: u32,
    compares: u32,
}

/// Simulated capture/compare channel
#[derive(Clone, Debug)]
pub struct SimChannel {
    counter: Rc<Cell<u16>>,
    regs: Rc<RefCell<ChannelRegs>>,
}

impl SimChannel {
    /// Current configuration
    #[must_use]
    pub fn mode(&self) -> ChannelMode {
        self.regs.borrow().mode
    }

    /// Check if an event is waiting for service
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.regs.borrow().pending
    }

    /// Acknowledge a pending event, returning whether there was one
    pub fn take_pending(&self) -> bool {
        let mut regs = self.regs.borrow_mut();
        let pending = regs.pending && regs.mode != ChannelMode::Disabled;
        regs.pending = false;
        pending
    }

    /// Number of captures armed since creation
    #[must_use]
    pub fn capture_count(&self) -> u32 {
        self.regs.borrow().captures
    }

    /// Number of compares armed since creation
    #[must_use]
    pub fn compare_count(&self) -> u32 {
        self.regs.borrow().compares
    }
}

impl CaptureCompare for SimChannel {
    fn arm_capture(&mut self) {
        let mut regs = self.regs.borrow_mut();
        regs.mode = ChannelMode::Capture;
        regs.latched = self.counter.get();
        regs.pending = true;
        regs.captures += 1;
    }

    fn arm_compare(&mut self, at: u16) {
        let mut regs = self.regs.borrow_mut();
        regs.mode = ChannelMode::Compare(at);
        regs.pending = false;
        regs.compares += 1;
    }

    fn disable(&mut self) {
        let mut regs = self.regs.borrow_mut();
        regs.mode = ChannelMode::Disabled;
        regs.pending = false;
    }

    fn captured(&self) -> u16 {
        self.regs.borrow().latched
    }

    fn now(&self) -> u16 {
        self.counter.get()
    }
}

/// Simulated free-running 16-bit counter
#[derive(Debug, Default)]
pub struct SimTimer {
    counter: Rc<Cell<u16>>,
    channels: Vec<Rc<RefCell<ChannelRegs>>>,
}

impl SimTimer {
    /// Create a counter at zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a counter at `count` (useful for wrap-around cases)
    #[must_use]
    pub fn starting_at(count: u16) -> Self {
        let timer = Self::default();
        timer.counter.set(count);
        timer
    }

    /// Allocate a new channel on this counter
    pub fn channel(&mut self) -> SimChannel {
        let regs = Rc::new(RefCell::new(ChannelRegs::default()));
        self.channels.push(Rc::clone(&regs));
        SimChannel {
            counter: Rc::clone(&self.counter),
            regs,
        }
    }

    /// Current counter value
    #[must_use]
    pub fn now(&self) -> u16 {
        self.counter.get()
    }

    /// Advance one tick, raising compare events that match
    pub fn tick(&mut self) {
        let now = self.counter.get().wrapping_add(1);
        self.counter.set(now);
        for regs in &self.channels {
            let mut regs = regs.borrow_mut();
            if regs.mode == ChannelMode::Compare(now) {
                regs.pending = true;
            }
        }
    }

    /// Advance several ticks without servicing anything
    pub fn advance(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.tick();
        }
    }
}

#[derive(Debug, Default)]
struct LineState {
    asserted: Cell<bool>,
    asserts: Cell<u32>,
    deasserts: Cell<u32>,
}

/// Simulated transmit-enable line
#[derive(Clone, Debug, Default)]
pub struct SimLine {
    state: Rc<LineState>,
}

impl SimLine {
    /// Create a deasserted line
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the line level
    #[must_use]
    pub fn is_asserted(&self) -> bool {
        self.state.asserted.get()
    }

    /// Number of assert writes
    #[must_use]
    pub fn assert_count(&self) -> u32 {
        self.state.asserts.get()
    }

    /// Number of deassert writes
    #[must_use]
    pub fn deassert_count(&self) -> u32 {
        self.state.deasserts.get()
    }
}

impl TxLine for SimLine {
    fn assert(&mut self) {
        self.state.asserted.set(true);
        self.state.asserts.set(self.state.asserts.get() + 1);
    }

    fn deassert(&mut self) {
        self.state.asserted.set(false);
        self.state.deasserts.set(self.state.deasserts.get() + 1);
    }
}

#[derive(Debug, Default)]
struct ToneState {
    running: Cell<bool>,
    frequency_hz: Cell<u32>,
    runs: Cell<u32>,
    halts: Cell<u32>,
}

/// Simulated side-tone PWM
#[derive(Clone, Debug, Default)]
pub struct SimTone {
    state: Rc<ToneState>,
}

impl SimTone {
    /// Create a halted PWM
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the output is oscillating
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.running.get()
    }

    /// Frequency of the last `run`
    #[must_use]
    pub fn frequency_hz(&self) -> u32 {
        self.state.frequency_hz.get()
    }

    /// Number of times the PWM was configured and started
    #[must_use]
    pub fn run_count(&self) -> u32 {
        self.state.runs.get()
    }

    /// Number of times the PWM was halted
    #[must_use]
    pub fn halt_count(&self) -> u32 {
        self.state.halts.get()
    }
}

impl TonePwm for SimTone {
    fn run(&mut self, hz: u32) {
        self.state.running.set(true);
        self.state.frequency_hz.set(hz);
        self.state.runs.set(self.state.runs.get() + 1);
    }

    fn halt(&mut self) {
        self.state.running.set(false);
        self.state.halts.set(self.state.halts.get() + 1);
    }
}

#[derive(Debug)]
struct ButtonState {
    active: Cell<bool>,
    enabled: Cell<bool>,
    pending: Cell<bool>,
    listening: Cell<Transition>,
}

/// Simulated push-button line with edge detection
///
/// Edges latch the pending flag whether or not the interrupt is enabled;
/// an interrupt is requested only while both are set.
#[derive(Clone, Debug)]
pub struct SimButton {
    state: Rc<ButtonState>,
}

impl SimButton {
    /// Create a released button with its interrupt masked
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Rc::new(ButtonState {
                active: Cell::new(false),
                enabled: Cell::new(false),
                pending: Cell::new(false),
                listening: Cell::new(Transition::Press),
            }),
        }
    }

    /// Drive the line active
    pub fn press(&self) {
        self.drive(true);
    }

    /// Drive the line idle
    pub fn release(&self) {
        self.drive(false);
    }

    fn drive(&self, active: bool) {
        if self.state.active.get() == active {
            return;
        }
        self.state.active.set(active);
        let transition = if active {
            Transition::Press
        } else {
            Transition::Release
        };
        if self.state.listening.get() == transition {
            self.state.pending.set(true);
        }
    }

    /// Check if the line is requesting an interrupt
    #[must_use]
    pub fn interrupt_requested(&self) -> bool {
        self.state.enabled.get() && self.state.pending.get()
    }

    /// Check if the line interrupt is enabled
    #[must_use]
    pub fn interrupt_enabled(&self) -> bool {
        self.state.enabled.get()
    }

    /// Check if an edge is latched
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state.pending.get()
    }

    /// Transition the line is armed for
    #[must_use]
    pub fn listening(&self) -> Transition {
        self.state.listening.get()
    }
}

impl Default for SimButton {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeInput for SimButton {
    fn enable_interrupt(&mut self) {
        self.state.enabled.set(true);
    }

    fn disable_interrupt(&mut self) {
        self.state.enabled.set(false);
    }

    fn clear_pending(&mut self) {
        self.state.pending.set(false);
    }

    fn listen_for(&mut self, transition: Transition) {
        self.state.listening.set(transition);
    }

    fn is_active(&self) -> bool {
        self.state.active.get()
    }
}

/// Simulated PTT engine
pub type SimPtt = PttEngine<SimLine, SimTone, SimChannel>;

/// Simulated debouncer
pub type SimDebouncer = Debouncer<SimButton, SimChannel>;

/// Simulated radio interface
pub type SimInterface = RadioInterface<SimButton, SimChannel, SimLine, SimTone, SimChannel>;

/// A PTT change observed by the board
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PttChange {
    /// Ticks since the board was created
    pub at: u64,
    /// New transmit state
    pub on: bool,
}

/// Whole board in simulation
///
/// Owns a [`SimInterface`] wired to one simulated counter and dispatches
/// pending interrupts to it after every stimulus, the way the interrupt
/// controller would.
pub struct SimBoard {
    timer: SimTimer,
    button: SimButton,
    line: SimLine,
    tone: SimTone,
    delay_channel: SimChannel,
    debounce_channel: SimChannel,
    interface: SimInterface,
    elapsed: u64,
    last_ptt: bool,
    changes: Vec<PttChange>,
}

impl SimBoard {
    /// Create a board with the configured debounce window
    #[must_use]
    pub fn new() -> Self {
        Self::with_window(DEBOUNCE_TICKS)
    }

    /// Create a board with a custom debounce window
    #[must_use]
    pub fn with_window(window: Ticks) -> Self {
        Self::build(SimTimer::new(), window)
    }

    /// Create a board whose counter starts at `count`
    #[must_use]
    pub fn starting_at(count: u16) -> Self {
        Self::build(SimTimer::starting_at(count), DEBOUNCE_TICKS)
    }

    fn build(mut timer: SimTimer, window: Ticks) -> Self {
        let button = SimButton::new();
        let line = SimLine::new();
        let tone = SimTone::new();
        let delay_channel = timer.channel();
        let debounce_channel = timer.channel();

        let debounce = Debouncer::with_window(button.clone(), debounce_channel.clone(), window);
        let ptt = PttEngine::new(line.clone(), tone.clone(), delay_channel.clone());

        Self {
            timer,
            button,
            line,
            tone,
            delay_channel,
            debounce_channel,
            interface: RadioInterface::new(debounce, ptt),
            elapsed: 0,
            last_ptt: false,
            changes: Vec::new(),
        }
    }

    /// Dispatch every pending interrupt until none remain
    pub fn service(&mut self) {
        loop {
            let mut serviced = false;
            if self.delay_channel.take_pending() {
                self.interface.on_delay_timer();
                serviced = true;
            }
            if self.debounce_channel.take_pending() {
                self.interface.on_debounce_timer();
                serviced = true;
            }
            if self.button.interrupt_requested() {
                self.interface.on_button_edge();
                serviced = true;
            }
            self.record();
            if !serviced {
                break;
            }
        }
    }

    fn record(&mut self) {
        let on = self.interface.ptt().get();
        if on != self.last_ptt {
            self.last_ptt = on;
            self.changes.push(PttChange {
                at: self.elapsed,
                on,
            });
        }
    }

    /// Advance one tick and service interrupts
    pub fn tick(&mut self) {
        self.timer.tick();
        self.elapsed += 1;
        self.service();
    }

    /// Advance several ticks, servicing after each
    pub fn run(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// Press the button and service the edge
    pub fn press(&mut self) {
        self.button.press();
        self.service();
    }

    /// Release the button and service the edge
    pub fn release(&mut self) {
        self.button.release();
        self.service();
    }

    /// Main-context command: run `f` against the PTT engine, then service
    pub fn command<R>(&mut self, f: impl FnOnce(&mut SimPtt) -> R) -> R {
        let result = f(self.interface.ptt_mut());
        self.service();
        result
    }

    /// Ticks since creation
    #[must_use]
    pub const fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// PTT changes observed so far
    #[must_use]
    pub fn ptt_changes(&self) -> &[PttChange] {
        &self.changes
    }

    /// Borrow the interface
    #[must_use]
    pub const fn interface(&self) -> &SimInterface {
        &self.interface
    }

    /// Mutably borrow the interface
    pub fn interface_mut(&mut self) -> &mut SimInterface {
        &mut self.interface
    }

    /// Button handle
    #[must_use]
    pub const fn button(&self) -> &SimButton {
        &self.button
    }

    /// Transmit line handle
    #[must_use]
    pub const fn line(&self) -> &SimLine {
        &self.line
    }

    /// Side-tone handle
    #[must_use]
    pub const fn tone(&self) -> &SimTone {
        &self.tone
    }

    /// Delay channel handle
    #[must_use]
    pub const fn delay_channel(&self) -> &SimChannel {
        &self.delay_channel
    }

    /// Debounce channel handle
    #[must_use]
    pub const fn debounce_channel(&self) -> &SimChannel {
        &self.debounce_channel
    }

    /// Counter handle
    #[must_use]
    pub const fn timer(&self) -> &SimTimer {
        &self.timer
    }
}

impl Default for SimBoard {
    fn default() -> Self {
        Self::new()
    }
}
