//! Mock PIN Gateway Implementation
//!
//! Stands in for the 2FA provider during development. No SMS is sent: every
//! issued PIN id accepts the same configured code.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use pv_core::domain::{PhoneNumber, PinId};
use pv_core::services::verification::{PinCheck, PinGatewayTrait, PinRequestFailure};

/// Mock PIN gateway for development and testing
///
/// This implementation:
/// - Issues `mock_` prefixed PIN ids
/// - Accepts the configured code for any PIN id it issued
/// - Answers unknown PIN ids with HTTP 404, like the real API
/// - Forgets the oldest outstanding PIN id once the limit is reached
/// - Optionally rejects delivery with a fixed SMS status
/// Outstanding PIN ids kept before the oldest is forgotten
pub const DEFAULT_MAX_OUTSTANDING_PINS: usize = 1024;

pub struct MockPinGateway {
    /// Code accepted for every issued PIN
    pin_code: String,
    /// PIN ids issued and not yet verified, oldest first
    issued: Mutex<VecDeque<String>>,
    /// Bound on `issued`
    max_outstanding: usize,
    /// Number of PINs requested
    request_count: AtomicU64,
    /// SMS status reported instead of issuing a PIN
    delivery_status: Option<String>,
}

impl MockPinGateway {
    /// Create a mock gateway accepting `pin_code`
    pub fn new(pin_code: impl Into<String>) -> Self {
        Self {
            pin_code: pin_code.into(),
            issued: Mutex::new(VecDeque::new()),
            max_outstanding: DEFAULT_MAX_OUTSTANDING_PINS,
            request_count: AtomicU64::new(0),
            delivery_status: None,
        }
    }

    /// Reject every PIN request as undeliverable with `status`
    pub fn rejecting_delivery(mut self, status: impl Into<String>) -> Self {
        self.delivery_status = Some(status.into());
        self
    }

    /// Keep at most `limit` unverified PIN ids (at least one)
    pub fn with_max_outstanding(mut self, limit: usize) -> Self {
        self.max_outstanding = limit.max(1);
        self
    }

    /// Total number of PIN requests received
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PinGatewayTrait for MockPinGateway {
    async fn request_pin(&self, phone: &PhoneNumber) -> Result<PinId, PinRequestFailure> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        if let Some(status) = &self.delivery_status {
            warn!(phone = %phone.masked(), sms_status = %status, "Mock gateway rejecting delivery");
            return Err(PinRequestFailure::DeliveryRejected {
                status: status.clone(),
            });
        }

        let raw_id = format!("mock_{}", Uuid::new_v4().simple());
        let pin_id = PinId::new(raw_id.clone()).ok_or_else(|| {
            PinRequestFailure::MalformedResponse("mock gateway produced an empty PIN id".to_string())
        })?;
        {
            let mut issued = self.issued.lock().await;
            while issued.len() >= self.max_outstanding {
                issued.pop_front();
            }
            issued.push_back(raw_id);
        }

        info!(
            target: "pin_gateway",
            provider = "mock",
            phone = %phone.masked(),
            pin_id = %pin_id,
            "PIN issued (mock), enter {}",
            self.pin_code
        );

        Ok(pin_id)
    }

    async fn check_pin(&self, pin_id: &PinId, code: &str) -> PinCheck {
        let mut issued = self.issued.lock().await;
        let Some(position) = issued.iter().position(|id| id == pin_id.as_str()) else {
            return PinCheck::HttpStatus(404);
        };

        if code == self.pin_code {
            issued.remove(position);
            PinCheck::Verified
        } else {
            PinCheck::Rejected
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
