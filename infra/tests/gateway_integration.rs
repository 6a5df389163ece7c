//! Integration tests for the verification flow over the Infobip gateway

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pv_core::domain::{VerificationSession, VerificationStep};
use pv_core::services::verification::{
    NoticeLevel, SubmitCodeOutcome, SubmitPhoneOutcome, VerificationService,
    VerificationServiceConfig,
};
use pv_infra::gateway::InfobipPinGateway;
use pv_shared::GatewayCredentials;

fn service_for(server: &MockServer) -> VerificationService<InfobipPinGateway> {
    let credentials = GatewayCredentials {
        base_url: server.uri(),
        api_key: "integration-key".to_string(),
        application_id: "APP-1".to_string(),
        message_id: "MSG-1".to_string(),
    };
    let gateway = InfobipPinGateway::new(credentials, Duration::from_secs(5)).unwrap();
    VerificationService::new(Arc::new(gateway), VerificationServiceConfig::default())
}

#[tokio::test]
async fn test_complete_verification_workflow() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2fa/2/pin"))
        .and(body_json(json!({
            "applicationId": "APP-1",
            "messageId": "MSG-1",
            "to": "5511999998888"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pinId": "PIN-42",
            "smsStatus": "MESSAGE_SENT"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/2fa/2/pin/PIN-42/verify"))
        .and(body_json(json!({ "pin": "000000" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "verified": false })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/2fa/2/pin/PIN-42/verify"))
        .and(body_json(json!({ "pin": "123456" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "verified": true })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let mut session = VerificationSession::new();

    let sent = service.submit_phone(&mut session, "(11) 99999-8888").await.unwrap();
    assert_eq!(sent.notice().message, "Code sent to: 5511****8888");
    assert_eq!(session.step(), VerificationStep::AwaitingPin);

    let wrong = service.submit_code(&mut session, "000000").await.unwrap();
    assert_eq!(wrong.notice().message, "Incorrect code.");
    assert_eq!(session.pin_id().unwrap().as_str(), "PIN-42");

    let granted = service.submit_code(&mut session, " 123456 ").await.unwrap();
    assert!(matches!(granted, SubmitCodeOutcome::Verified { .. }));
    assert_eq!(granted.notice().level, NoticeLevel::Success);
    assert_eq!(session.step(), VerificationStep::AwaitingPhone);
    assert!(session.phone_number().is_none());
}

#[tokio::test]
async fn test_rejected_delivery_keeps_phone_step() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2fa/2/pin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pinId": "PIN-9",
            "smsStatus": "MESSAGE_NOT_SENT"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let mut session = VerificationSession::new();

    let outcome = service.submit_phone(&mut session, "11999998888").await.unwrap();

    assert!(matches!(outcome, SubmitPhoneOutcome::DeliveryFailed(_)));
    assert_eq!(outcome.notice().message, "Failed: MESSAGE_NOT_SENT");
    assert_eq!(outcome.notice().level, NoticeLevel::Error);
    assert_eq!(session.step(), VerificationStep::AwaitingPhone);
}

#[tokio::test]
async fn test_gateway_outage_reported_as_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2fa/2/pin"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let mut session = VerificationSession::new();

    let outcome = service.submit_phone(&mut session, "11999998888").await.unwrap();

    assert_eq!(outcome.notice().message, "Failed: API error: 503");
    assert_eq!(session.step(), VerificationStep::AwaitingPhone);
}

#[tokio::test]
async fn test_invalid_phone_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let mut session = VerificationSession::new();

    let outcome = service.submit_phone(&mut session, "999").await.unwrap();

    assert_eq!(outcome, SubmitPhoneOutcome::InvalidPhone);
    assert_eq!(outcome.notice().message, "Invalid phone number.");
}
