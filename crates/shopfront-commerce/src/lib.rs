//! Cart and checkout domain types and logic for Shopfront.
//!
//! This crate holds the pure, I/O-free half of the storefront client:
//!
//! - **Money**: cents-based amounts with fallible arithmetic
//! - **Cart**: line items keyed by `(product, variant)` identity, coupon
//!   results, and the shared totals computation
//! - **Checkout**: shipping field validation, the ephemeral checkout
//!   draft, and client-side order references
//!
//! The async state container and orchestration live in `shopfront-store`.

pub mod cart;
pub mod checkout;
pub mod error;
pub mod ids;
pub mod money;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    pub use crate::cart::{
        compute_totals, CartLine, CouponResult, LineKey, Totals, VariantKey,
        MAX_QUANTITY_PER_LINE,
    };

    pub use crate::checkout::{
        CheckoutDraft, GatewayAuthorization, GatewayProof, OrderNotification, OrderReceipt,
        PaymentMethod, ShippingDetails,
    };
}
