//! Order service interface.

use crate::services::ServiceError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shopfront_commerce::cart::Totals;
use shopfront_commerce::checkout::{CheckoutDraft, GatewayProof, OrderReceipt};
use shopfront_commerce::OrderId;

/// Result of server-side verification of a gateway proof.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ConfirmOutcome {
    /// Signature verified; payment is confirmed.
    Verified,
    /// The proof failed verification.
    Rejected { reason: String },
}

/// The order creation and confirmation collaborator.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Create an order from a checkout draft and the submitted totals.
    ///
    /// For the gateway payment path the receipt carries the gateway
    /// authorization token.
    async fn create(
        &self,
        draft: &CheckoutDraft,
        totals: &Totals,
    ) -> Result<OrderReceipt, ServiceError>;

    /// Confirm payment for a created order by verifying the gateway proof
    /// server-side.
    async fn confirm(
        &self,
        order_id: &OrderId,
        proof: &GatewayProof,
    ) -> Result<ConfirmOutcome, ServiceError>;
}
