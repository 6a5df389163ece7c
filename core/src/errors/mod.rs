//! Domain-specific error types and error handling.

use thiserror::Error;

use crate::domain::entities::VerificationStep;

/// Core domain errors.
///
/// Recoverable verification failures (bad input, delivery rejection, wrong
/// PIN) are reported as outcomes, not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Cannot {action} while the session is {step}")]
    InvalidTransition {
        action: &'static str,
        step: VerificationStep,
    },
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_message() {
        let error = DomainError::InvalidTransition {
            action: "submit a code",
            step: VerificationStep::AwaitingPhone,
        };
        assert_eq!(
            error.to_string(),
            "Cannot submit a code while the session is awaiting_phone"
        );
    }
}
