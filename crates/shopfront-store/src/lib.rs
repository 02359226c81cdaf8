//! Async client-side state and checkout orchestration for Shopfront.
//!
//! Builds on the pure domain types in `shopfront-commerce`:
//!
//! - [`CartStore`]: the single owner of local cart state, with optimistic
//!   updates, per-key sequence numbers, exact rollback, and bounded calls
//! - [`CouponResolver`]: validates coupon codes and bounds discounts
//! - [`CheckoutOrchestrator`]: drives shipping validation, order creation,
//!   the COD and gateway payment paths, and post-purchase cleanup
//!
//! Backend collaborators are capability traits under [`services`]; tests
//! run against scripted in-memory implementations.

pub mod config;
pub mod coupon;
pub mod error;
pub mod orchestrator;
pub mod services;
pub mod store;

#[cfg(test)]
mod testkit;

pub use config::StoreConfig;
pub use coupon::CouponResolver;
pub use error::{PaymentError, StoreError};
pub use orchestrator::{CheckoutOrchestrator, CheckoutState, CheckoutSummary};
pub use store::CartStore;
