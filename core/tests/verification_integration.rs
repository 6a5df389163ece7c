//! Integration tests for the two-step verification flow

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use pv_core::domain::{PhoneNumber, PinId, VerificationSession, VerificationStep};
    use pv_core::services::verification::{
        DisplayState, NoticeLevel, PinCheck, PinGatewayTrait, PinRequestFailure,
        SubmitCodeOutcome, SubmitPhoneOutcome, VerificationService, VerificationServiceConfig,
    };

    // Gateway that issues one PIN per phone and checks codes against it
    struct InMemoryGateway {
        pins: RwLock<HashMap<String, (String, String)>>, // pin_id -> (phone, code)
        rejected_prefix: &'static str,
    }

    impl InMemoryGateway {
        fn new() -> Self {
            Self {
                pins: RwLock::new(HashMap::new()),
                rejected_prefix: "5599",
            }
        }

        async fn code_for(&self, phone: &str) -> Option<String> {
            self.pins
                .read()
                .await
                .values()
                .find(|(p, _)| p == phone)
                .map(|(_, code)| code.clone())
        }
    }

    #[async_trait]
    impl PinGatewayTrait for InMemoryGateway {
        async fn request_pin(&self, phone: &PhoneNumber) -> Result<PinId, PinRequestFailure> {
            if phone.as_str().starts_with(self.rejected_prefix) {
                return Err(PinRequestFailure::DeliveryRejected {
                    status: "MESSAGE_NOT_SENT".to_string(),
                });
            }
            let mut pins = self.pins.write().await;
            let pin_id = format!("pin-{}", pins.len() + 1);
            let code = format!("{:06}", 100_000 + pins.len());
            pins.insert(pin_id.clone(), (phone.as_str().to_string(), code));
            Ok(PinId::new(pin_id).unwrap())
        }

        async fn check_pin(&self, pin_id: &PinId, code: &str) -> PinCheck {
            match self.pins.read().await.get(pin_id.as_str()) {
                Some((_, expected)) if expected == code => PinCheck::Verified,
                Some(_) => PinCheck::Rejected,
                None => PinCheck::HttpStatus(404),
            }
        }

        fn provider_name(&self) -> &str {
            "in-memory"
        }
    }

    fn create_service() -> (VerificationService<InMemoryGateway>, Arc<InMemoryGateway>) {
        let gateway = Arc::new(InMemoryGateway::new());
        let service = VerificationService::new(gateway.clone(), VerificationServiceConfig::default());
        (service, gateway)
    }

    #[tokio::test]
    async fn test_full_verification_flow() {
        let (service, gateway) = create_service();
        let mut session = VerificationSession::new();

        let outcome = service.submit_phone(&mut session, "(11) 99999-8888").await.unwrap();
        let state = DisplayState::after_phone(&session, &outcome);
        assert_eq!(state.step, VerificationStep::AwaitingPin);
        assert_eq!(state.phone.as_deref(), Some("5511****8888"));
        assert_eq!(state.notice.unwrap().level, NoticeLevel::Info);

        let wrong = service.submit_code(&mut session, "999999").await.unwrap();
        let state = DisplayState::after_code(&session, &wrong);
        assert_eq!(state.step, VerificationStep::AwaitingPin);
        assert_eq!(state.notice.unwrap().message, "Incorrect code.");

        let code = gateway.code_for("5511999998888").await.unwrap();
        let verified = service.submit_code(&mut session, &code).await.unwrap();
        assert!(matches!(verified, SubmitCodeOutcome::Verified { .. }));

        let state = DisplayState::after_code(&session, &verified);
        assert_eq!(state.step, VerificationStep::AwaitingPhone);
        assert!(state.phone.is_none());
        assert_eq!(state.reset_after_secs, Some(4));

        // The session is single use: the flow starts over
        assert!(session.pin_id().is_none());
        let again = service.submit_phone(&mut session, "11999998888").await.unwrap();
        assert!(matches!(again, SubmitPhoneOutcome::PinSent { .. }));
    }

    #[tokio::test]
    async fn test_delivery_rejection_keeps_phone_step() {
        let (service, _gateway) = create_service();
        let mut session = VerificationSession::new();

        let outcome = service.submit_phone(&mut session, "5599999998888").await.unwrap();
        let state = DisplayState::after_phone(&session, &outcome);

        assert_eq!(state.step, VerificationStep::AwaitingPhone);
        let notice = state.notice.unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Failed: MESSAGE_NOT_SENT");
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let (service, gateway) = create_service();
        let mut first = VerificationSession::new();
        let mut second = VerificationSession::new();

        service.submit_phone(&mut first, "11999998888").await.unwrap();
        service.submit_phone(&mut second, "21988887777").await.unwrap();
        assert_ne!(first.pin_id(), second.pin_id());

        // Cancelling one session leaves the other untouched
        service.cancel(&mut first).unwrap();
        assert_eq!(first.step(), VerificationStep::AwaitingPhone);
        assert_eq!(second.step(), VerificationStep::AwaitingPin);

        let code = gateway.code_for("5521988887777").await.unwrap();
        let outcome = service.submit_code(&mut second, &code).await.unwrap();
        assert!(matches!(outcome, SubmitCodeOutcome::Verified { .. }));
    }
}
