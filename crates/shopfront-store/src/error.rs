//! Store error types.

use crate::services::ServiceError;
use shopfront_commerce::CommerceError;
use thiserror::Error;

/// Payment-path failures. The order stays pending on the server; none of
/// these ever finalize a checkout or clear the cart.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaymentError {
    /// The payer dismissed the gateway UI.
    #[error("Payment cancelled by the payer")]
    Cancelled,

    /// The gateway SDK failed to load or respond.
    #[error("Payment gateway unavailable: {0}")]
    GatewayUnavailable(String),

    /// The order service rejected the gateway proof during verification.
    #[error("Payment proof rejected: {0}")]
    VerificationRejected(String),
}

/// Errors surfaced by the cart store and checkout orchestrator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Local domain or business-rule failure. No request was made, or the
    /// request was never attempted.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// A service call failed or timed out. Retryable; any optimistic state
    /// has been rolled back.
    #[error("Network error: {0}")]
    Network(#[from] ServiceError),

    /// The payment path failed. The order remains pending.
    #[error(transparent)]
    Payment(#[from] PaymentError),
}

impl StoreError {
    /// Whether retrying the same call can succeed without changed input.
    pub fn is_retryable(&self) -> bool {
        match self {
            StoreError::Network(e) => !matches!(e, ServiceError::Unauthorized),
            StoreError::Payment(_) => true,
            StoreError::Commerce(_) => false,
        }
    }

    /// Whether the caller should route the user through sign-in.
    pub fn requires_sign_in(&self) -> bool {
        matches!(self, StoreError::Network(ServiceError::Unauthorized))
    }
}
