//! Types for verification service results

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::domain::entities::{VerificationSession, VerificationStep};
use crate::domain::value_objects::PhoneNumber;

/// Delivery statuses the gateway reports for a PIN that will never arrive
pub const TERMINAL_DELIVERY_STATUSES: [&str; 2] = ["MESSAGE_NOT_SENT", "REJECTED"];

/// Whether a reported SMS status means the PIN was not delivered
pub fn is_terminal_delivery_status(status: &str) -> bool {
    TERMINAL_DELIVERY_STATUSES.contains(&status)
}

/// Why a PIN could not be sent. The display string is the user-facing reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PinRequestFailure {
    /// The gateway accepted the request but will not deliver the SMS
    #[error("{status}")]
    DeliveryRejected { status: String },

    /// The gateway answered with a non-200 status
    #[error("API error: {0}")]
    HttpStatus(u16),

    /// The gateway answered 200 without a usable PIN id
    #[error("Malformed gateway response: {0}")]
    MalformedResponse(String),

    /// The request never completed (network, timeout, undecodable body)
    #[error("{0}")]
    Transport(String),
}

/// Detailed result of checking a PIN with the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinCheck {
    /// The gateway confirmed the PIN
    Verified,
    /// The gateway answered and the PIN did not match
    Rejected,
    /// The gateway answered with a non-200 status
    HttpStatus(u16),
    /// The gateway answered 200 without a boolean verification field
    MalformedResponse(String),
    /// The request never completed
    Transport(String),
}

impl PinCheck {
    pub fn is_verified(&self) -> bool {
        matches!(self, PinCheck::Verified)
    }
}

/// Result of submitting a phone number
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitPhoneOutcome {
    /// A PIN was sent; the session now awaits it
    PinSent { phone: PhoneNumber },
    /// The input is not a valid mobile number
    InvalidPhone,
    /// The gateway could not send a PIN
    DeliveryFailed(PinRequestFailure),
}

impl SubmitPhoneOutcome {
    /// User-facing notice for this outcome
    pub fn notice(&self) -> Notice {
        match self {
            SubmitPhoneOutcome::PinSent { phone } => {
                Notice::info(format!("Code sent to: {}", phone.masked()))
            }
            SubmitPhoneOutcome::InvalidPhone => Notice::warning("Invalid phone number."),
            SubmitPhoneOutcome::DeliveryFailed(failure) => {
                Notice::error(format!("Failed: {}", failure))
            }
        }
    }
}

/// Result of submitting a PIN
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitCodeOutcome {
    /// The PIN was confirmed; the session has been reset
    Verified {
        phone: PhoneNumber,
        /// How long clients should show the confirmation before restarting
        confirmation_delay: Duration,
    },
    /// The PIN was not confirmed; the session still awaits a PIN
    IncorrectCode(PinCheck),
    /// Nothing was entered; the gateway was not called
    MissingCode,
}

impl SubmitCodeOutcome {
    /// User-facing notice for this outcome
    pub fn notice(&self) -> Notice {
        match self {
            SubmitCodeOutcome::Verified { .. } => Notice::success("ACCESS GRANTED"),
            SubmitCodeOutcome::IncorrectCode(_) => Notice::error("Incorrect code."),
            SubmitCodeOutcome::MissingCode => Notice::warning("Enter the PIN you received."),
        }
    }
}

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
    Success,
}

/// Message shown to the user after an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }
}

/// What the UI renders after each action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    /// Current step of the session
    pub step: VerificationStep,
    /// Masked phone number the pending PIN was sent to
    pub phone: Option<String>,
    /// Message produced by the last action
    pub notice: Option<Notice>,
    /// Seconds to keep a success confirmation visible before restarting
    pub reset_after_secs: Option<u64>,
}

impl DisplayState {
    /// Display state for a session with no notice
    pub fn for_session(session: &VerificationSession) -> Self {
        Self {
            step: session.step(),
            phone: session.phone_number().map(PhoneNumber::masked),
            notice: None,
            reset_after_secs: None,
        }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }

    /// Display state after a phone submission
    pub fn after_phone(session: &VerificationSession, outcome: &SubmitPhoneOutcome) -> Self {
        Self::for_session(session).with_notice(outcome.notice())
    }

    /// Display state after a code submission
    pub fn after_code(session: &VerificationSession, outcome: &SubmitCodeOutcome) -> Self {
        let mut state = Self::for_session(session).with_notice(outcome.notice());
        if let SubmitCodeOutcome::Verified { confirmation_delay, .. } = outcome {
            state.reset_after_secs = Some(confirmation_delay.as_secs());
        }
        state
    }
}
