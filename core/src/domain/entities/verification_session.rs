//! Verification session entity for the two-step phone verification flow.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::value_objects::{PhoneNumber, PinId};

/// Step of the verification flow a session is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStep {
    /// Waiting for the user to submit a phone number
    AwaitingPhone,
    /// A PIN was sent; waiting for the user to submit it
    AwaitingPin,
}

impl fmt::Display for VerificationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationStep::AwaitingPhone => write!(f, "awaiting_phone"),
            VerificationStep::AwaitingPin => write!(f, "awaiting_pin"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionState {
    AwaitingPhone,
    AwaitingPin {
        phone_number: PhoneNumber,
        pin_id: PinId,
    },
}

/// Ephemeral state of one user's verification interaction.
///
/// The phone number and PIN id exist only while awaiting a PIN, so a
/// verification can never be attempted without a transaction id. State
/// changes go through the verification service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationSession {
    /// Unique identifier for the session
    pub id: Uuid,

    state: SessionState,

    /// Timestamp when the session was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last state change or access
    pub updated_at: DateTime<Utc>,
}

impl VerificationSession {
    /// Creates a session in the initial step with no phone or PIN id
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            state: SessionState::AwaitingPhone,
            created_at: now,
            updated_at: now,
        }
    }

    /// Current step
    pub fn step(&self) -> VerificationStep {
        match self.state {
            SessionState::AwaitingPhone => VerificationStep::AwaitingPhone,
            SessionState::AwaitingPin { .. } => VerificationStep::AwaitingPin,
        }
    }

    /// Phone number the pending PIN was sent to
    pub fn phone_number(&self) -> Option<&PhoneNumber> {
        match &self.state {
            SessionState::AwaitingPin { phone_number, .. } => Some(phone_number),
            SessionState::AwaitingPhone => None,
        }
    }

    /// Transaction id of the pending PIN
    pub fn pin_id(&self) -> Option<&PinId> {
        match &self.state {
            SessionState::AwaitingPin { pin_id, .. } => Some(pin_id),
            SessionState::AwaitingPhone => None,
        }
    }

    /// Phone number and PIN id together, present only while awaiting a PIN
    pub fn pending_pin(&self) -> Option<(&PhoneNumber, &PinId)> {
        match &self.state {
            SessionState::AwaitingPin { phone_number, pin_id } => Some((phone_number, pin_id)),
            SessionState::AwaitingPhone => None,
        }
    }

    /// Records a sent PIN and moves to `AwaitingPin`
    pub(crate) fn await_pin(&mut self, phone_number: PhoneNumber, pin_id: PinId) {
        self.state = SessionState::AwaitingPin { phone_number, pin_id };
        self.touch();
    }

    /// Clears all fields and returns to `AwaitingPhone`
    pub(crate) fn reset(&mut self) {
        self.state = SessionState::AwaitingPhone;
        self.touch();
    }

    /// Marks the session as used now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Whether the session has been idle for longer than `timeout` at `now`
    pub fn is_idle(&self, now: DateTime<Utc>, timeout: Duration) -> bool {
        now - self.updated_at > timeout
    }
}

impl Default for VerificationSession {
    fn default() -> Self {
        Self::new()
    }
}
