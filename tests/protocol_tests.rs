//! PTT Command Protocol Tests
//!
//! Tests for request validation, execution and reply formatting.

use radio_interface::protocol::{CommandError, PttReply, PttRequest, PttResponse};
use radio_interface::radio::ptt::PttEngine;
use radio_interface::sim::{SimLine, SimPtt, SimTimer, SimTone};
use radio_interface::types::Ticks;

fn engine() -> (SimTimer, SimPtt) {
    let mut timer = SimTimer::new();
    let channel = timer.channel();
    let ptt = PttEngine::new(SimLine::new(), SimTone::new(), channel);
    (timer, ptt)
}

// ============================================================================
// Request Validation Tests
// ============================================================================

#[test]
fn test_delay_positive_accepted() {
    assert_eq!(PttRequest::delay(0.1), Ok(PttRequest::Delay(0.1)));
    assert_eq!(PttRequest::delay(100.0), Ok(PttRequest::Delay(100.0)));
}

#[test]
fn test_delay_zero_rejected() {
    assert_eq!(PttRequest::delay(0.0), Err(CommandError::NegativeDelay(0.0)));
}

#[test]
fn test_delay_negative_rejected() {
    assert_eq!(
        PttRequest::delay(-1.5),
        Err(CommandError::NegativeDelay(-1.5))
    );
}

#[test]
fn test_delay_non_finite_rejected() {
    assert_eq!(PttRequest::delay(f32::NAN), Err(CommandError::InvalidDelay));
    assert_eq!(
        PttRequest::delay(f32::INFINITY),
        Err(CommandError::InvalidDelay)
    );
    assert_eq!(
        PttRequest::delay(f32::NEG_INFINITY),
        Err(CommandError::InvalidDelay)
    );
}

// ============================================================================
// Execution Tests
// ============================================================================

#[test]
fn test_execute_status() {
    let (_timer, mut ptt) = engine();

    assert_eq!(PttRequest::Status.execute(&mut ptt), PttReply::Status(false));

    ptt.set(true);
    assert_eq!(PttRequest::Status.execute(&mut ptt), PttReply::Status(true));
}

#[test]
fn test_execute_on_off() {
    let (_timer, mut ptt) = engine();

    assert_eq!(PttRequest::On.execute(&mut ptt), PttReply::Done);
    assert!(ptt.get());

    assert_eq!(PttRequest::Off.execute(&mut ptt), PttReply::Done);
    assert!(!ptt.get());
}

#[test]
fn test_execute_delay_reports_armed_delay() {
    let (_timer, mut ptt) = engine();

    let reply = PttRequest::delay(0.1).unwrap().execute(&mut ptt);

    assert_eq!(reply, PttReply::Scheduled(0.1));
    assert!(ptt.state().is_pending());
}

#[test]
fn test_execute_delay_clamped() {
    let (_timer, mut ptt) = engine();

    let reply = PttRequest::delay(60.0).unwrap().execute(&mut ptt);

    assert_eq!(reply, PttReply::Scheduled(Ticks::MAX.as_seconds()));
}

#[test]
fn test_status_while_pending_reads_off() {
    let (_timer, mut ptt) = engine();

    PttRequest::delay(1.0).unwrap().execute(&mut ptt);

    assert_eq!(PttRequest::Status.execute(&mut ptt), PttReply::Status(false));
}

// ============================================================================
// Reply Formatting Tests
// ============================================================================

#[test]
fn test_reply_display() {
    assert_eq!(PttReply::Status(true).to_string(), "PTT status : on");
    assert_eq!(PttReply::Status(false).to_string(), "PTT status : off");
    assert_eq!(PttReply::Done.to_string(), "");
    assert_eq!(PttReply::Scheduled(0.1).to_string(), "PTT in 0.100000 sec");
}

#[test]
fn test_error_display() {
    assert_eq!(
        CommandError::NegativeDelay(-1.0).to_string(),
        "Error : delay of -1.000000 is not valid. Valid delays must be greater than zero"
    );
    assert_eq!(
        CommandError::InvalidDelay.to_string(),
        "Error : delay value is not a finite number"
    );
}

#[test]
fn test_response_creation() {
    let response = PttResponse::new();
    assert!(response.as_str().is_empty());

    let response = PttResponse::default();
    assert!(response.as_bytes().is_empty());
}

#[test]
fn test_response_status_line() {
    let mut response = PttResponse::new();
    response.reply(&PttReply::Status(false));
    assert_eq!(response.as_str(), "PTT status : off\r\n");
}

#[test]
fn test_response_scheduled_line() {
    let mut response = PttResponse::new();
    response.reply(&PttReply::Scheduled(Ticks::MAX.as_seconds()));
    assert_eq!(response.as_str(), "PTT in 13.107000 sec\r\n");
}

#[test]
fn test_response_done_is_silent() {
    let mut response = PttResponse::new();
    response.reply(&PttReply::Status(true));
    response.reply(&PttReply::Done);
    assert!(response.as_str().is_empty());
}

#[test]
fn test_response_error_line() {
    let mut response = PttResponse::new();
    response.error(&CommandError::NegativeDelay(0.0));
    assert_eq!(
        response.as_bytes(),
        b"Error : delay of 0.000000 is not valid. Valid delays must be greater than zero\r\n"
    );
}

#[test]
fn test_response_result() {
    let (_timer, mut ptt) = engine();
    let mut response = PttResponse::new();

    let result = PttRequest::delay(-2.0).map(|req| req.execute(&mut ptt));
    response.result(&result);
    assert!(response.as_str().starts_with("Error : delay of -2.000000"));
    assert!(!ptt.state().is_pending());

    let result = PttRequest::delay(0.5).map(|req| req.execute(&mut ptt));
    response.result(&result);
    assert_eq!(response.as_str(), "PTT in 0.500000 sec\r\n");
}

#[test]
fn test_response_clear() {
    let mut response = PttResponse::new();
    response.reply(&PttReply::Status(true));
    response.clear();
    assert!(response.as_str().is_empty());
}
