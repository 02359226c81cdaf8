//! Client-side order reference types.
//!
//! Orders are owned by the order service. The client holds only a
//! reference to the created order and, on the gateway path, the
//! authorization token and the proof returned by the payer's approval.

use crate::cart::{CartLine, Totals};
use crate::ids::OrderId;
use serde::{Deserialize, Serialize};

/// What the order service returns from order creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderReceipt {
    /// Reference to the externally owned order.
    pub order_id: OrderId,
    /// Gateway authorization token, present only for the gateway path.
    pub gateway_authorization: Option<GatewayAuthorization>,
}

/// Token the payment gateway's hosted UI is opened with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayAuthorization {
    /// Opaque gateway token for this order.
    pub token: String,
}

impl GatewayAuthorization {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

/// Evidence of payer approval returned by the gateway.
///
/// The order service must verify the signature server-side before payment
/// is treated as confirmed; the client never trusts it on its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayProof {
    /// Gateway-side payment reference.
    pub payment_ref: String,
    /// Signature over the payment details.
    pub signature: String,
}

impl GatewayProof {
    pub fn new(payment_ref: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            payment_ref: payment_ref.into(),
            signature: signature.into(),
        }
    }
}

/// Payload for the purchase-confirmation notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderNotification {
    /// The confirmed order.
    pub order_id: OrderId,
    /// Lines that were ordered.
    pub line_items: Vec<CartLine>,
    /// Totals as submitted.
    pub totals: Totals,
    /// Shipping email the confirmation is sent to.
    pub email: String,
}
