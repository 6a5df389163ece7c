//! Business services containing domain logic and use cases.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    DisplayState, Notice, NoticeLevel, PinCheck, PinGatewayTrait, PinRequestFailure,
    SubmitCodeOutcome, SubmitPhoneOutcome, VerificationService, VerificationServiceConfig,
};
