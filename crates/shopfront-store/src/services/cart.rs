//! Cart persistence service interface.

use crate::services::ServiceError;
use async_trait::async_trait;
use shopfront_commerce::cart::{CartLine, LineKey};

/// The server-side cart, keyed by user and `(product, variant)` identity.
///
/// The server is authoritative: every mutation that changes quantities
/// returns the full canonical line list, which the store accepts wholesale
/// instead of merging locally. Deletion is the exception; an HTTP success
/// is sufficient to drop the local line.
#[async_trait]
pub trait CartService: Send + Sync {
    /// Add a new line. The identity must not already exist server-side.
    async fn add_line(&self, line: &CartLine) -> Result<Vec<CartLine>, ServiceError>;

    /// Set the quantity of an existing line.
    async fn update_quantity(
        &self,
        key: &LineKey,
        quantity: i64,
    ) -> Result<Vec<CartLine>, ServiceError>;

    /// Delete a line.
    async fn remove_line(&self, key: &LineKey) -> Result<(), ServiceError>;

    /// Fetch the canonical line list.
    async fn fetch_lines(&self) -> Result<Vec<CartLine>, ServiceError>;
}
