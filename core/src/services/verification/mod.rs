//! Verification service module for SMS PIN authentication
//!
//! This module provides the two-step verification workflow:
//! - Phone number normalization and PIN request
//! - PIN verification against the gateway
//! - Session transitions between the phone and PIN steps
//! - Display state for the UI layer

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use traits::PinGatewayTrait;
pub use types::{
    is_terminal_delivery_status, DisplayState, Notice, NoticeLevel, PinCheck, PinRequestFailure,
    SubmitCodeOutcome, SubmitPhoneOutcome, TERMINAL_DELIVERY_STATUSES,
};
