//! Configuration and Constants Tests
//!
//! Tests to verify configuration values are valid and consistent.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test config_tests

use radio_interface::config::*;
use radio_interface::types::Ticks;

// =============================================================================
// Clock and Counter Tests
// =============================================================================

#[test]
fn system_clock_valid() {
    // STM32G474 max clock is 170 MHz
    assert_eq!(SYSTEM_CLOCK_HZ, 170_000_000);
}

#[test]
fn prescaler_divides_clock_exactly() {
    assert_eq!(TIMER_PRESCALER * TIMER_TICK_HZ, SYSTEM_CLOCK_HZ);
}

#[test]
fn prescaler_fits_register() {
    // PSC is 16 bits and holds the ratio minus one
    assert!(TIMER_PRESCALER - 1 <= u32::from(u16::MAX));
}

#[test]
fn counter_is_sixteen_bits() {
    assert_eq!(TIMER_PERIOD_TICKS, u32::from(u16::MAX) + 1);
    assert_eq!(u32::from(MAX_DELAY_TICKS.as_raw()), TIMER_PERIOD_TICKS - 1);
}

// =============================================================================
// Timing Tests
// =============================================================================

#[test]
fn debounce_window_ticks() {
    assert_eq!(DEBOUNCE_TICKS, Ticks::from_millis(DEBOUNCE_WINDOW_MS));
    assert_eq!(DEBOUNCE_TICKS.as_raw(), 500);
}

#[test]
fn debounce_window_reasonable() {
    // Long enough to swallow contact bounce, short enough to feel immediate
    assert!(DEBOUNCE_WINDOW_MS >= 20);
    assert!(DEBOUNCE_WINDOW_MS <= 250);
}

#[test]
fn max_delay_covers_ten_seconds() {
    assert_eq!(MAX_DELAY_TICKS, Ticks::MAX);
    assert!(MAX_DELAY_TICKS.as_seconds() > 10.0);
}

#[test]
fn sidetone_audible() {
    assert!(SIDETONE_HZ >= 300);
    assert!(SIDETONE_HZ <= 1_000);
}

// =============================================================================
// Timer Assignment Tests
// =============================================================================

#[test]
fn shared_channels_distinct() {
    assert_ne!(timers::DELAY_CHANNEL, timers::DEBOUNCE_CHANNEL);
    assert!(timers::DELAY_CHANNEL < 4);
    assert!(timers::DEBOUNCE_CHANNEL < 4);
}

#[test]
fn timers_distinct() {
    assert_ne!(timers::SHARED, timers::SIDETONE);
    assert_ne!(timers::SHARED, timers::TIME_DRIVER);
    assert_ne!(timers::SIDETONE, timers::TIME_DRIVER);
}

// =============================================================================
// Pin and Identification Tests
// =============================================================================

#[test]
fn button_exti_matches_pin() {
    assert!(pins::PTT_BUTTON.ends_with(&BUTTON_EXTI_LINE.to_string()));
}

#[test]
fn pins_unique() {
    let all = [pins::LED_STATUS, pins::PTT_BUTTON, pins::PTT_OUT, pins::SIDETONE];
    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn reply_buffer_fits_longest_error() {
    // "Error : delay of -xxxx.xxxxxx is not valid. ..." plus CRLF
    assert!(REPLY_BUFFER_SIZE >= 90);
}

#[test]
fn device_type_present() {
    assert!(!DEVICE_TYPE.is_empty());
}
