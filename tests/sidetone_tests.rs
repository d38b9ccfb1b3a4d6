//! Side-tone Generator Tests
//!
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test sidetone_tests

use radio_interface::config::SIDETONE_HZ;
use radio_interface::radio::sidetone::Sidetone;
use radio_interface::sim::SimTone;

#[test]
fn new_halts_output() {
    let pwm = SimTone::new();
    let tone = Sidetone::new(pwm.clone());

    assert!(!tone.is_running());
    assert!(!pwm.is_running());
    assert_eq!(pwm.halt_count(), 1);
    assert_eq!(tone.frequency_hz(), SIDETONE_HZ);
}

#[test]
fn start_runs_configured_frequency() {
    let pwm = SimTone::new();
    let mut tone = Sidetone::new(pwm.clone());

    tone.start();

    assert!(tone.is_running());
    assert!(pwm.is_running());
    assert_eq!(pwm.frequency_hz(), SIDETONE_HZ);
}

#[test]
fn custom_frequency() {
    let pwm = SimTone::new();
    let mut tone = Sidetone::with_frequency(pwm.clone(), 700);

    tone.start();

    assert_eq!(tone.frequency_hz(), 700);
    assert_eq!(pwm.frequency_hz(), 700);
}

#[test]
fn repeated_start_does_not_reconfigure() {
    let pwm = SimTone::new();
    let mut tone = Sidetone::new(pwm.clone());

    tone.start();
    tone.start();
    tone.start();

    assert_eq!(pwm.run_count(), 1);
}

#[test]
fn repeated_stop_halts_once() {
    let pwm = SimTone::new();
    let mut tone = Sidetone::new(pwm.clone());

    tone.start();
    tone.stop();
    tone.stop();

    assert!(!pwm.is_running());
    // One halt from construction, one from the first stop
    assert_eq!(pwm.halt_count(), 2);
}

#[test]
fn restart_after_stop() {
    let pwm = SimTone::new();
    let mut tone = Sidetone::new(pwm.clone());

    tone.start();
    tone.stop();
    tone.start();

    assert!(pwm.is_running());
    assert_eq!(pwm.run_count(), 2);
}

#[test]
fn pwm_accessor() {
    let tone = Sidetone::new(SimTone::new());
    assert!(!tone.pwm().is_running());
}
