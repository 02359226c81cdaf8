//! Interfaces to the external backend collaborators.
//!
//! Each collaborator is a capability trait so the store and orchestrator
//! are testable without real network dependencies. Implementations are
//! responsible for attaching the bearer credential to every call; a
//! missing or expired credential surfaces as [`ServiceError::Unauthorized`]
//! and the embedding UI routes the user through sign-in.

mod cart;
mod coupon;
mod notify;
mod orders;
mod payment;

pub use cart::CartService;
pub use coupon::{CouponService, CouponVerdict};
pub use notify::NotificationService;
pub use orders::{ConfirmOutcome, OrderService};
pub use payment::{GatewayOutcome, PaymentGateway};

use std::time::Duration;
use thiserror::Error;

/// Transport-level failure of a service call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// HTTP error status from the collaborator.
    #[error("HTTP error: {status}")]
    Http { status: u16 },

    /// The call exceeded the configured bound.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Connection-level failure.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The response body could not be decoded.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Bearer credential missing or expired.
    #[error("Unauthorized")]
    Unauthorized,
}
