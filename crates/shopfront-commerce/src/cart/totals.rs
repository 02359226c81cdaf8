//! Totals computation.
//!
//! The single totals implementation in the workspace: the cart view and the
//! checkout flow both call [`compute_totals`], so displayed and submitted
//! amounts can never diverge.

use crate::cart::CartLine;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Totals breakdown for a cart snapshot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Totals {
    /// Sum of line totals before tax and discount.
    pub subtotal: Money,
    /// Tax on the subtotal, rounded half-up.
    pub tax: Money,
    /// Payable total, clamped at zero.
    pub total: Money,
}

impl Totals {
    /// The amount a coupon is validated against: subtotal plus tax,
    /// before any discount.
    pub fn before_discount(&self) -> Result<Money, CommerceError> {
        self.subtotal.try_add(&self.tax).ok_or(CommerceError::Overflow)
    }
}

/// Compute subtotal, tax, and payable total for a cart snapshot.
///
/// Pure and deterministic: identical inputs always yield identical totals.
/// The total is clamped at zero; a discount computed against a larger cart
/// can never produce a negative payable amount.
pub fn compute_totals(
    lines: &[CartLine],
    tax_rate: f64,
    discount: Money,
    currency: Currency,
) -> Result<Totals, CommerceError> {
    if !tax_rate.is_finite() || tax_rate < 0.0 {
        return Err(CommerceError::validation(
            "tax_rate",
            format!("must be a finite non-negative number, got {tax_rate}"),
        ));
    }
    if discount.is_negative() {
        return Err(CommerceError::BusinessRule(
            "discount amount cannot be negative".to_string(),
        ));
    }

    let mut subtotal = Money::zero(currency);
    for line in lines {
        let line_total = line.line_total()?;
        subtotal = subtotal
            .try_add(&line_total)
            .ok_or_else(|| mismatch_or_overflow(&subtotal, &line_total))?;
    }

    let tax = subtotal.mul_rate(tax_rate);

    let gross = subtotal.try_add(&tax).ok_or(CommerceError::Overflow)?;
    let total = gross
        .try_sub(&discount)
        .ok_or_else(|| mismatch_or_overflow(&gross, &discount))?
        .clamp_non_negative();

    Ok(Totals {
        subtotal,
        tax,
        total,
    })
}

fn mismatch_or_overflow(expected: &Money, got: &Money) -> CommerceError {
    if expected.currency != got.currency {
        CommerceError::CurrencyMismatch {
            expected: expected.currency.code().to_string(),
            got: got.currency.code().to_string(),
        }
    } else {
        CommerceError::Overflow
    }
}
