//! Checkout draft types.

use crate::cart::{CartLine, CouponResult, LineKey};
use crate::checkout::ShippingDetails;
use serde::{Deserialize, Serialize};

/// How the order will be paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Pay on delivery; no gateway involvement.
    CashOnDelivery,
    /// Externally hosted payment gateway.
    Gateway,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "cash_on_delivery",
            PaymentMethod::Gateway => "gateway",
        }
    }
}

/// The ephemeral bundle a checkout attempt is built from.
///
/// Created when shipping details validate, destroyed on completion or
/// abandonment. Never persisted across sessions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutDraft {
    /// Validated shipping details.
    pub shipping: ShippingDetails,
    /// Chosen payment path.
    pub payment_method: PaymentMethod,
    /// The cart lines this checkout covers.
    pub cart_snapshot: Vec<CartLine>,
    /// Validated coupon, if one was applied.
    pub coupon: Option<CouponResult>,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl CheckoutDraft {
    /// Create a draft from validated shipping details and a cart snapshot.
    pub fn new(
        shipping: ShippingDetails,
        payment_method: PaymentMethod,
        cart_snapshot: Vec<CartLine>,
    ) -> Self {
        Self {
            shipping,
            payment_method,
            cart_snapshot,
            coupon: None,
            created_at: current_timestamp(),
        }
    }

    /// Identities of the lines this checkout covers. Used for
    /// post-purchase cleanup: only these lines are removed, never lines
    /// added to the cart while checkout was in progress.
    pub fn line_keys(&self) -> Vec<LineKey> {
        self.cart_snapshot.iter().map(CartLine::key).collect()
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
