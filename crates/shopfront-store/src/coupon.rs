//! Coupon resolution.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use shopfront_commerce::cart::CouponResult;
use shopfront_commerce::{CommerceError, Money};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::services::{CouponService, CouponVerdict};
use crate::store::bounded;

/// Validates a coupon code against a pre-discount total and bounds the
/// returned discount to `[0, total]`.
///
/// The result belongs to a single checkout attempt and must be discarded
/// (and re-validated) if the cart total changes after it was obtained.
pub struct CouponResolver<C> {
    service: Arc<C>,
    request_timeout: Duration,
}

impl<C: CouponService> CouponResolver<C> {
    pub fn new(service: Arc<C>, config: &StoreConfig) -> Self {
        Self {
            service,
            request_timeout: config.request_timeout,
        }
    }

    /// Validate `code` against the current pre-discount total.
    ///
    /// Rejections and out-of-bounds discounts surface as business-rule
    /// errors; transport failures as retryable network errors.
    pub async fn apply(
        &self,
        code: &str,
        total_before_discount: Money,
    ) -> Result<CouponResult, StoreError> {
        let verdict = bounded(
            self.request_timeout,
            self.service.validate(code, total_before_discount),
        )
        .await?;

        match verdict {
            CouponVerdict::Accepted { discount, message } => {
                debug!(code, %discount, message, "coupon accepted");
                Ok(CouponResult::bounded(code, discount, total_before_discount)?)
            }
            CouponVerdict::Rejected { reason } => {
                Err(CommerceError::BusinessRule(reason).into())
            }
        }
    }
}
