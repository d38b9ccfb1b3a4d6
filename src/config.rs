//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the radio interface board.
//! All pin mappings, clock frequencies, and timing parameters are centralized here.

use crate::types::Ticks;

/// System clock frequency (STM32G474 @ 170MHz)
pub const SYSTEM_CLOCK_HZ: u32 = 170_000_000;

/// Tick rate of the shared capture/compare counter
///
/// 5 kHz is the slowest rate that divides the system clock exactly with a
/// 16-bit prescaler, which keeps the longest schedulable delay above 13 s.
pub const TIMER_TICK_HZ: u32 = 5_000;

/// Prescaler divide ratio for the shared counter (PSC register holds this minus one)
pub const TIMER_PRESCALER: u32 = SYSTEM_CLOCK_HZ / TIMER_TICK_HZ;

/// Width of the shared counter; it wraps after this many ticks
pub const TIMER_PERIOD_TICKS: u32 = 1 << 16;

/// Button quiet period before a new edge is honoured
pub const DEBOUNCE_WINDOW_MS: u32 = 100;

/// Debounce window expressed in counter ticks
pub const DEBOUNCE_TICKS: Ticks = Ticks::from_millis(DEBOUNCE_WINDOW_MS);

/// Longest delay the PTT delay channel can schedule
pub const MAX_DELAY_TICKS: Ticks = Ticks::MAX;

/// Side-tone frequency while transmitting
pub const SIDETONE_HZ: u32 = 400;

/// Reply buffer size for PTT command responses
pub const REPLY_BUFFER_SIZE: usize = 96;

/// Device identification string reported to the host
pub const DEVICE_TYPE: &str = "MCV radio interface v0.1";

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the schematic

    /// Status LED (directly on MCU)
    pub const LED_STATUS: &str = "PA5";

    /// PTT push-button input (active low, pull-up, EXTI line 2)
    pub const PTT_BUTTON: &str = "PA2";

    /// Transmit-enable output to the radio (active high)
    pub const PTT_OUT: &str = "PB0";

    /// Side-tone square wave output (TIM4 CH1)
    pub const SIDETONE: &str = "PB6";
}

/// Timer assignments
pub mod timers {
    //! Hardware timer and channel assignments

    /// Shared free-running counter for debounce and PTT delay
    pub const SHARED: u8 = 3;

    /// Capture/compare channel used by the PTT delay (zero-based)
    pub const DELAY_CHANNEL: usize = 0;

    /// Capture/compare channel used by the button debounce (zero-based)
    pub const DEBOUNCE_CHANNEL: usize = 1;

    /// Side-tone PWM timer
    pub const SIDETONE: u8 = 4;

    /// Embassy time driver (kept away from the shared counter)
    pub const TIME_DRIVER: u8 = 2;
}

/// EXTI line of the PTT push-button
pub const BUTTON_EXTI_LINE: usize = 2;
