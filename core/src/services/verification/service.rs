//! Main verification service implementation

use std::sync::Arc;

use crate::domain::entities::{VerificationSession, VerificationStep};
use crate::domain::value_objects::PhoneNumber;
use crate::errors::{DomainError, DomainResult};

use super::config::VerificationServiceConfig;
use super::traits::PinGatewayTrait;
use super::types::{SubmitCodeOutcome, SubmitPhoneOutcome};

/// Drives a [`VerificationSession`] through the two-step PIN flow.
///
/// The service holds no per-user state: callers pass the session in and
/// must not run two actions on the same session concurrently.
pub struct VerificationService<G: PinGatewayTrait + ?Sized> {
    /// Gateway used to send and check PINs
    gateway: Arc<G>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<G: PinGatewayTrait + ?Sized> VerificationService<G> {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `gateway` - PIN gateway implementation
    /// * `config` - Service configuration
    pub fn new(gateway: Arc<G>, config: VerificationServiceConfig) -> Self {
        Self { gateway, config }
    }

    /// Name of the gateway provider serving this service
    pub fn provider_name(&self) -> &str {
        self.gateway.provider_name()
    }

    /// Submit a phone number for a session awaiting one
    ///
    /// This method:
    /// 1. Normalizes the raw input
    /// 2. Requests a PIN from the gateway (once, no retry)
    /// 3. On success stores the phone number and PIN id and moves the
    ///    session to `AwaitingPin`
    ///
    /// Invalid input and gateway failures leave the session unchanged and
    /// are reported in the outcome.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidTransition` if the session is not awaiting a
    /// phone number.
    pub async fn submit_phone(
        &self,
        session: &mut VerificationSession,
        raw_phone: &str,
    ) -> DomainResult<SubmitPhoneOutcome> {
        Self::require_step(session, VerificationStep::AwaitingPhone, "submit a phone number")?;

        let Some(phone) = PhoneNumber::parse(raw_phone) else {
            tracing::info!(
                session_id = %session.id,
                event = "phone_invalid",
                "Rejected phone number input"
            );
            return Ok(SubmitPhoneOutcome::InvalidPhone);
        };

        match self.gateway.request_pin(&phone).await {
            Ok(pin_id) => {
                tracing::info!(
                    session_id = %session.id,
                    phone = %phone.masked(),
                    provider = self.gateway.provider_name(),
                    event = "pin_sent",
                    "PIN requested"
                );
                session.await_pin(phone.clone(), pin_id);
                Ok(SubmitPhoneOutcome::PinSent { phone })
            }
            Err(failure) => {
                tracing::warn!(
                    session_id = %session.id,
                    phone = %phone.masked(),
                    provider = self.gateway.provider_name(),
                    error = ?failure,
                    event = "pin_request_failed",
                    "PIN request failed"
                );
                Ok(SubmitPhoneOutcome::DeliveryFailed(failure))
            }
        }
    }

    /// Submit a PIN for a session awaiting one
    ///
    /// A confirmed PIN resets the session to `AwaitingPhone` with all fields
    /// cleared. Any other result keeps the session, its phone number and PIN
    /// id so the user can try again without a new PIN being sent.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidTransition` if the session is not awaiting a PIN.
    pub async fn submit_code(
        &self,
        session: &mut VerificationSession,
        code: &str,
    ) -> DomainResult<SubmitCodeOutcome> {
        let (phone, pin_id) = match session.pending_pin() {
            Some((phone, pin_id)) => (phone.clone(), pin_id.clone()),
            None => {
                return Err(DomainError::InvalidTransition {
                    action: "submit a code",
                    step: session.step(),
                })
            }
        };

        let code = code.trim();
        if code.is_empty() {
            return Ok(SubmitCodeOutcome::MissingCode);
        }

        let check = self.gateway.check_pin(&pin_id, code).await;
        if check.is_verified() {
            tracing::info!(
                session_id = %session.id,
                phone = %phone.masked(),
                event = "pin_verified",
                "PIN verified, access granted"
            );
            session.reset();
            Ok(SubmitCodeOutcome::Verified {
                phone,
                confirmation_delay: self.config.confirmation_delay,
            })
        } else {
            tracing::info!(
                session_id = %session.id,
                phone = %phone.masked(),
                result = ?check,
                event = "pin_not_verified",
                "PIN not verified"
            );
            session.touch();
            Ok(SubmitCodeOutcome::IncorrectCode(check))
        }
    }

    /// Abandon a pending PIN and return to the phone step
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidTransition` if the session is not awaiting a PIN.
    pub fn cancel(&self, session: &mut VerificationSession) -> DomainResult<()> {
        Self::require_step(session, VerificationStep::AwaitingPin, "cancel")?;

        tracing::debug!(session_id = %session.id, event = "verification_cancelled");
        session.reset();
        Ok(())
    }

    fn require_step(
        session: &VerificationSession,
        expected: VerificationStep,
        action: &'static str,
    ) -> DomainResult<()> {
        let step = session.step();
        if step == expected {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition { action, step })
        }
    }
}
