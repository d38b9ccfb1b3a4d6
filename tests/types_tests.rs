//! Type System Tests
//!
//! Tests for tick conversions and the small domain enums.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test types_tests

use radio_interface::config::TIMER_TICK_HZ;
use radio_interface::types::{PttAction, Ticks, Transition};

// =============================================================================
// Ticks Construction Tests
// =============================================================================

#[test]
fn ticks_new_rejects_zero() {
    assert!(Ticks::new(0).is_none());
    assert_eq!(Ticks::new(1), Some(Ticks::MIN));
    assert_eq!(Ticks::new(u16::MAX), Some(Ticks::MAX));
}

#[test]
fn ticks_saturating_clamps_both_ends() {
    assert_eq!(Ticks::saturating(0), Ticks::MIN);
    assert_eq!(Ticks::saturating(1234).as_raw(), 1234);
    assert_eq!(Ticks::saturating(70_000), Ticks::MAX);
}

#[test]
fn ticks_from_millis() {
    assert_eq!(Ticks::from_millis(100).as_raw(), 500);
    assert_eq!(Ticks::from_millis(1).as_raw(), 5);
    assert_eq!(Ticks::from_millis(0), Ticks::MIN);
    assert_eq!(Ticks::from_millis(u32::MAX), Ticks::MAX);
}

#[test]
fn ticks_as_millis() {
    assert_eq!(Ticks::saturating(500).as_millis(), 100);
    assert_eq!(Ticks::MAX.as_millis(), 13_107);
}

// =============================================================================
// Seconds Conversion Tests
// =============================================================================

#[test]
fn ticks_from_seconds_in_range() {
    let ticks = Ticks::from_seconds(0.1);
    assert_eq!(ticks.as_raw(), 500);
    assert_eq!(ticks.as_seconds(), 0.1);
}

#[test]
fn ticks_from_seconds_one_second() {
    let ticks = Ticks::from_seconds(1.0);
    assert_eq!(ticks.as_raw() as u32, TIMER_TICK_HZ);
    assert_eq!(ticks.as_seconds(), 1.0);
}

#[test]
fn ticks_from_seconds_rounds_to_nearest() {
    // 1.55 ticks
    assert_eq!(Ticks::from_seconds(0.000_31).as_raw(), 2);
    // 1.2 ticks
    assert_eq!(Ticks::from_seconds(0.000_24).as_raw(), 1);
}

#[test]
fn ticks_from_seconds_below_one_tick_clamps_to_min() {
    assert_eq!(Ticks::from_seconds(0.000_1), Ticks::MIN);
    assert_eq!(Ticks::from_seconds(0.0), Ticks::MIN);
    assert_eq!(Ticks::from_seconds(-5.0), Ticks::MIN);
    assert_eq!(Ticks::from_seconds(f32::NAN), Ticks::MIN);
}

#[test]
fn ticks_from_seconds_above_range_clamps_to_max() {
    assert_eq!(Ticks::from_seconds(100.0), Ticks::MAX);
    assert_eq!(Ticks::from_seconds(f32::INFINITY), Ticks::MAX);
}

#[test]
fn ticks_max_in_seconds() {
    let max = Ticks::MAX.as_seconds();
    assert!((max - 13.107).abs() < 1e-4);
}

#[test]
fn ticks_ordering() {
    assert!(Ticks::MIN < Ticks::from_seconds(0.1));
    assert!(Ticks::from_seconds(0.1) < Ticks::MAX);
}

// =============================================================================
// Transition Tests
// =============================================================================

#[test]
fn transition_opposite() {
    assert_eq!(Transition::Press.opposite(), Transition::Release);
    assert_eq!(Transition::Release.opposite(), Transition::Press);
}

#[test]
fn transition_expected_from_level() {
    // Held button: the next edge can only be a release
    assert_eq!(Transition::expected_from_level(true), Transition::Release);
    assert_eq!(Transition::expected_from_level(false), Transition::Press);
}

// =============================================================================
// PTT Action Tests
// =============================================================================

#[test]
fn ptt_action_from_bool() {
    assert_eq!(PttAction::from(true), PttAction::On);
    assert_eq!(PttAction::from(false), PttAction::Off);
}
