//! Coupon result types.

use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A validated coupon, scoped to a single checkout attempt.
///
/// Never persisted. Becomes stale, and must be re-validated, if the cart's
/// pre-discount total changes after it was obtained.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CouponResult {
    /// The coupon code as entered.
    pub code: String,
    /// Absolute discount amount, within `[0, total_at_validation]`.
    pub discount: Money,
    /// The pre-discount total the code was validated against.
    pub total_at_validation: Money,
}

impl CouponResult {
    /// Build a coupon result, enforcing the discount bound.
    ///
    /// The validation collaborator decides eligibility; this constructor
    /// enforces that the returned amount is usable: a negative discount or
    /// one larger than the pre-discount total is a business-rule error,
    /// never a negative payable amount.
    pub fn bounded(
        code: impl Into<String>,
        discount: Money,
        total_before_discount: Money,
    ) -> Result<Self, CommerceError> {
        let code = code.into();
        if discount.currency != total_before_discount.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: total_before_discount.currency.code().to_string(),
                got: discount.currency.code().to_string(),
            });
        }
        if discount.is_negative() {
            return Err(CommerceError::BusinessRule(format!(
                "coupon {code} returned a negative discount"
            )));
        }
        if discount.amount_cents > total_before_discount.amount_cents {
            return Err(CommerceError::BusinessRule(format!(
                "coupon {code} discount {} exceeds order total {}",
                discount, total_before_discount
            )));
        }
        Ok(Self {
            code,
            discount,
            total_at_validation: total_before_discount,
        })
    }

    /// Whether the cart total has moved since this coupon was validated.
    pub fn is_stale(&self, current_total_before_discount: Money) -> bool {
        self.total_at_validation != current_total_before_discount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_bounded_accepts_in_range() {
        let coupon = CouponResult::bounded(
            "SAVE10",
            Money::new(1000, Currency::USD),
            Money::new(5000, Currency::USD),
        )
        .unwrap();
        assert_eq!(coupon.discount.amount_cents, 1000);
    }

    #[test]
    fn test_bounded_accepts_full_total() {
        // Discount equal to the total is allowed: payable amount becomes 0.
        let coupon = CouponResult::bounded(
            "FREEBIE",
            Money::new(5000, Currency::USD),
            Money::new(5000, Currency::USD),
        );
        assert!(coupon.is_ok());
    }

    #[test]
    fn test_bounded_rejects_over_total() {
        let result = CouponResult::bounded(
            "TOOBIG",
            Money::new(9000, Currency::USD),
            Money::new(5000, Currency::USD),
        );
        assert!(matches!(result, Err(CommerceError::BusinessRule(_))));
    }

    #[test]
    fn test_bounded_rejects_negative() {
        let result = CouponResult::bounded(
            "NEG",
            Money::new(-100, Currency::USD),
            Money::new(5000, Currency::USD),
        );
        assert!(matches!(result, Err(CommerceError::BusinessRule(_))));
    }

    #[test]
    fn test_staleness() {
        let coupon = CouponResult::bounded(
            "SAVE10",
            Money::new(1000, Currency::USD),
            Money::new(5000, Currency::USD),
        )
        .unwrap();
        assert!(!coupon.is_stale(Money::new(5000, Currency::USD)));
        assert!(coupon.is_stale(Money::new(6000, Currency::USD)));
    }
}
