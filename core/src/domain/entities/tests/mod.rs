//! Unit tests for verification session entity

use chrono::{Duration, Utc};

use crate::domain::entities::verification_session::{VerificationSession, VerificationStep};
use crate::domain::value_objects::{PhoneNumber, PinId};

fn phone() -> PhoneNumber {
    PhoneNumber::parse("11999998888").unwrap()
}

fn pin_id() -> PinId {
    PinId::new("PIN-1").unwrap()
}

#[test]
fn test_new_session_awaits_phone() {
    let session = VerificationSession::new();

    assert_eq!(session.step(), VerificationStep::AwaitingPhone);
    assert!(session.phone_number().is_none());
    assert!(session.pin_id().is_none());
    assert!(session.pending_pin().is_none());
    assert_eq!(session.created_at, session.updated_at);
}

#[test]
fn test_sessions_have_distinct_ids() {
    assert_ne!(VerificationSession::new().id, VerificationSession::new().id);
}

#[test]
fn test_await_pin_stores_phone_and_pin_id() {
    let mut session = VerificationSession::new();
    session.await_pin(phone(), pin_id());

    assert_eq!(session.step(), VerificationStep::AwaitingPin);
    assert_eq!(session.phone_number(), Some(&phone()));
    assert_eq!(session.pin_id(), Some(&pin_id()));
    assert_eq!(session.pending_pin(), Some((&phone(), &pin_id())));
}

#[test]
fn test_reset_clears_everything() {
    let mut session = VerificationSession::new();
    let id = session.id;
    session.await_pin(phone(), pin_id());
    session.reset();

    assert_eq!(session.step(), VerificationStep::AwaitingPhone);
    assert!(session.phone_number().is_none());
    assert!(session.pin_id().is_none());
    assert_eq!(session.id, id);
}

#[test]
fn test_idle_detection() {
    let session = VerificationSession::new();
    let timeout = Duration::minutes(15);

    assert!(!session.is_idle(Utc::now(), timeout));
    assert!(session.is_idle(session.updated_at + Duration::minutes(16), timeout));
}

#[test]
fn test_step_display() {
    assert_eq!(VerificationStep::AwaitingPhone.to_string(), "awaiting_phone");
    assert_eq!(VerificationStep::AwaitingPin.to_string(), "awaiting_pin");
    assert_eq!(
        serde_json::to_string(&VerificationStep::AwaitingPin).unwrap(),
        "\"awaiting_pin\""
    );
}
