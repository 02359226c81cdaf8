//! Payment gateway interface.

use crate::services::ServiceError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shopfront_commerce::checkout::{GatewayAuthorization, GatewayProof};

/// What the gateway's hosted UI resolved to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum GatewayOutcome {
    /// The payer approved; the proof must still be verified server-side.
    Approved(GatewayProof),
    /// The payer cancelled or navigated away.
    Cancelled,
}

/// The externally hosted payment SDK, loaded on demand only when the
/// gateway path is chosen.
///
/// `authorize` opens the gateway UI with the order's authorization token
/// and resolves when the payer approves or cancels. A load or transport
/// failure surfaces as a `ServiceError`; the orchestrator maps it to a
/// payment error that leaves the order pending.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn authorize(
        &self,
        authorization: &GatewayAuthorization,
    ) -> Result<GatewayOutcome, ServiceError>;
}
