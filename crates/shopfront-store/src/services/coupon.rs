//! Coupon validation service interface.

use crate::services::ServiceError;
use async_trait::async_trait;
use shopfront_commerce::Money;
use serde::{Deserialize, Serialize};

/// Outcome of validating a coupon code against a pre-discount total.
///
/// Eligibility (expiry, minimum spend, usage limits) is the collaborator's
/// decision; the client only bounds the returned amount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CouponVerdict {
    /// Code accepted with an absolute discount amount.
    Accepted { discount: Money, message: String },
    /// Code rejected with a user-facing reason.
    Rejected { reason: String },
}

/// The coupon validation collaborator.
#[async_trait]
pub trait CouponService: Send + Sync {
    /// Validate a code against the current pre-discount total.
    async fn validate(
        &self,
        code: &str,
        total_before_discount: Money,
    ) -> Result<CouponVerdict, ServiceError>;
}
