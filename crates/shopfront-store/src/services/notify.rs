//! Transactional notification service interface.

use crate::services::ServiceError;
use async_trait::async_trait;
use shopfront_commerce::checkout::OrderNotification;

/// Sends the purchase-confirmation notification.
///
/// Fire-and-forget from the orchestrator's perspective: a delivery failure
/// after a successful order is logged, never reversed, and never blocks
/// post-purchase cleanup.
#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn send_confirmation(
        &self,
        notification: &OrderNotification,
    ) -> Result<(), ServiceError>;
}
