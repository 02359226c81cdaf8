//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in cart and checkout operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Local field validation failed. Never reaches the network layer.
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// An `add` was attempted for a line identity already in the cart.
    /// The caller should route to `update` instead.
    #[error("Line already in cart: {product_id} ({variant_key})")]
    DuplicateLine {
        product_id: String,
        variant_key: String,
    },

    /// Quantity must be at least 1.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds the per-line maximum.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// No cart line matches the given identity.
    #[error("Line not in cart: {product_id} ({variant_key})")]
    LineNotFound {
        product_id: String,
        variant_key: String,
    },

    /// A business rule rejected the operation (invalid coupon, empty cart,
    /// insufficient stock). Not retryable without changed input.
    #[error("{0}")]
    BusinessRule(String),

    /// Currency mismatch in a money calculation.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow in a money calculation.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

impl CommerceError {
    /// Build a validation error for a named field.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
