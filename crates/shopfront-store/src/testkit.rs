//! Scripted mock collaborators for tests.
//!
//! Each mock keeps a call log (for "no network call was made" assertions)
//! and a per-method script of [`Behavior`]s consumed in call order; an
//! unscripted call succeeds immediately.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use shopfront_commerce::cart::{CartLine, LineKey, Totals};
use shopfront_commerce::checkout::{
    CheckoutDraft, GatewayAuthorization, GatewayProof, OrderNotification, OrderReceipt,
};
use shopfront_commerce::{Money, OrderId};

use crate::services::{
    CartService, ConfirmOutcome, CouponService, CouponVerdict, GatewayOutcome,
    NotificationService, OrderService, PaymentGateway, ServiceError,
};

/// How a single scripted call behaves.
#[derive(Debug, Clone, Default)]
pub struct Behavior {
    pub delay: Duration,
    pub failure: Option<ServiceError>,
}

impl Behavior {
    pub fn delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn fail(error: ServiceError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn and_fail(mut self, error: ServiceError) -> Self {
        self.failure = Some(error);
        self
    }

    async fn run(self) -> Result<(), ServiceError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn pop(script: &Mutex<VecDeque<Behavior>>) -> Behavior {
    lock(script).pop_front().unwrap_or_default()
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

// =============================================================================
// Cart
// =============================================================================

/// In-memory cart service with scripted failures and delays.
pub struct MockCartService {
    lines: Mutex<Vec<CartLine>>,
    update_script: Mutex<VecDeque<Behavior>>,
    remove_script: Mutex<VecDeque<Behavior>>,
    calls: Mutex<Vec<String>>,
}

impl MockCartService {
    pub fn with_lines(lines: Vec<CartLine>) -> Self {
        Self {
            lines: Mutex::new(lines),
            update_script: Mutex::new(VecDeque::new()),
            remove_script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn script_update(&self, behavior: Behavior) {
        lock(&self.update_script).push_back(behavior);
    }

    pub fn script_remove(&self, behavior: Behavior) {
        lock(&self.remove_script).push_back(behavior);
    }

    pub fn call_log(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    pub fn server_quantity(&self, key: &LineKey) -> Option<i64> {
        lock(&self.lines)
            .iter()
            .find(|l| l.matches(key))
            .map(|l| l.quantity)
    }

    fn record(&self, call: &str) {
        lock(&self.calls).push(call.to_string());
    }
}

#[async_trait]
impl CartService for MockCartService {
    async fn add_line(&self, line: &CartLine) -> Result<Vec<CartLine>, ServiceError> {
        self.record("add_line");
        lock(&self.lines).push(line.clone());
        Ok(lock(&self.lines).clone())
    }

    async fn update_quantity(
        &self,
        key: &LineKey,
        quantity: i64,
    ) -> Result<Vec<CartLine>, ServiceError> {
        self.record("update_quantity");
        let behavior = pop(&self.update_script);
        if behavior.failure.is_none() {
            let mut lines = lock(&self.lines);
            if let Some(line) = lines.iter_mut().find(|l| l.matches(key)) {
                line.quantity = quantity;
            }
        }
        let payload = lock(&self.lines).clone();
        behavior.run().await?;
        Ok(payload)
    }

    async fn remove_line(&self, key: &LineKey) -> Result<(), ServiceError> {
        self.record("remove_line");
        let behavior = pop(&self.remove_script);
        if behavior.failure.is_none() {
            lock(&self.lines).retain(|l| !l.matches(key));
        }
        behavior.run().await
    }

    async fn fetch_lines(&self) -> Result<Vec<CartLine>, ServiceError> {
        self.record("fetch_lines");
        Ok(lock(&self.lines).clone())
    }
}

// =============================================================================
// Coupons
// =============================================================================

/// Coupon service returning scripted verdicts.
pub struct MockCouponService {
    verdicts: Mutex<VecDeque<Result<CouponVerdict, ServiceError>>>,
    calls: Mutex<Vec<String>>,
}

impl MockCouponService {
    pub fn new() -> Self {
        Self {
            verdicts: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn accepting(discount: Money) -> Self {
        let mock = Self::new();
        mock.script(Ok(CouponVerdict::Accepted {
            discount,
            message: "coupon applied".to_string(),
        }));
        mock
    }

    pub fn rejecting(reason: &str) -> Self {
        let mock = Self::new();
        mock.script(Ok(CouponVerdict::Rejected {
            reason: reason.to_string(),
        }));
        mock
    }

    pub fn script(&self, verdict: Result<CouponVerdict, ServiceError>) {
        lock(&self.verdicts).push_back(verdict);
    }

    pub fn call_log(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl CouponService for MockCouponService {
    async fn validate(
        &self,
        code: &str,
        _total_before_discount: Money,
    ) -> Result<CouponVerdict, ServiceError> {
        lock(&self.calls).push(format!("validate:{code}"));
        lock(&self.verdicts)
            .pop_front()
            .unwrap_or(Err(ServiceError::Connection("unscripted call".to_string())))
    }
}

// =============================================================================
// Orders
// =============================================================================

/// Order service with scripted creation and confirmation outcomes.
pub struct MockOrderService {
    create_results: Mutex<VecDeque<Result<OrderReceipt, ServiceError>>>,
    confirm_results: Mutex<VecDeque<Result<ConfirmOutcome, ServiceError>>>,
    create_delay: Mutex<Duration>,
    calls: Mutex<Vec<String>>,
    created: Mutex<Vec<(CheckoutDraft, Totals)>>,
}

impl MockOrderService {
    pub fn new() -> Self {
        Self {
            create_results: Mutex::new(VecDeque::new()),
            confirm_results: Mutex::new(VecDeque::new()),
            create_delay: Mutex::new(Duration::ZERO),
            calls: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
        }
    }

    /// COD-style receipt without a gateway authorization.
    pub fn creating(order_id: &str) -> Arc<Self> {
        let mock = Self::new();
        mock.script_create(Ok(OrderReceipt {
            order_id: OrderId::new(order_id),
            gateway_authorization: None,
        }));
        Arc::new(mock)
    }

    /// Gateway-style receipt carrying an authorization token.
    pub fn creating_with_gateway(order_id: &str, token: &str) -> Arc<Self> {
        let mock = Self::new();
        mock.script_create(Ok(OrderReceipt {
            order_id: OrderId::new(order_id),
            gateway_authorization: Some(GatewayAuthorization::new(token)),
        }));
        Arc::new(mock)
    }

    pub fn script_create(&self, result: Result<OrderReceipt, ServiceError>) {
        lock(&self.create_results).push_back(result);
    }

    pub fn script_confirm(&self, result: Result<ConfirmOutcome, ServiceError>) {
        lock(&self.confirm_results).push_back(result);
    }

    pub fn set_create_delay(&self, delay: Duration) {
        *lock(&self.create_delay) = delay;
    }

    pub fn call_log(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    pub fn created_orders(&self) -> Vec<(CheckoutDraft, Totals)> {
        lock(&self.created).clone()
    }
}

#[async_trait]
impl OrderService for MockOrderService {
    async fn create(
        &self,
        draft: &CheckoutDraft,
        totals: &Totals,
    ) -> Result<OrderReceipt, ServiceError> {
        lock(&self.calls).push("create".to_string());
        let delay = *lock(&self.create_delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let result = lock(&self.create_results)
            .pop_front()
            .unwrap_or(Err(ServiceError::Connection("unscripted call".to_string())));
        if result.is_ok() {
            lock(&self.created).push((draft.clone(), *totals));
        }
        result
    }

    async fn confirm(
        &self,
        order_id: &OrderId,
        _proof: &GatewayProof,
    ) -> Result<ConfirmOutcome, ServiceError> {
        lock(&self.calls).push(format!("confirm:{order_id}"));
        lock(&self.confirm_results)
            .pop_front()
            .unwrap_or(Ok(ConfirmOutcome::Verified))
    }
}

// =============================================================================
// Payment gateway
// =============================================================================

/// Gateway resolving to scripted outcomes.
pub struct MockGateway {
    outcomes: Mutex<VecDeque<Result<GatewayOutcome, ServiceError>>>,
    calls: Mutex<Vec<String>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn approving(payment_ref: &str) -> Arc<Self> {
        let mock = Self::new();
        mock.script(Ok(GatewayOutcome::Approved(GatewayProof::new(
            payment_ref,
            format!("sig-{payment_ref}"),
        ))));
        Arc::new(mock)
    }

    pub fn cancelling() -> Arc<Self> {
        let mock = Self::new();
        mock.script(Ok(GatewayOutcome::Cancelled));
        Arc::new(mock)
    }

    pub fn failing_to_load() -> Arc<Self> {
        let mock = Self::new();
        mock.script(Err(ServiceError::Connection(
            "gateway SDK failed to load".to_string(),
        )));
        Arc::new(mock)
    }

    pub fn script(&self, outcome: Result<GatewayOutcome, ServiceError>) {
        lock(&self.outcomes).push_back(outcome);
    }

    pub fn call_log(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn authorize(
        &self,
        authorization: &GatewayAuthorization,
    ) -> Result<GatewayOutcome, ServiceError> {
        lock(&self.calls).push(format!("authorize:{}", authorization.token));
        lock(&self.outcomes)
            .pop_front()
            .unwrap_or(Ok(GatewayOutcome::Cancelled))
    }
}

// =============================================================================
// Notifications
// =============================================================================

/// Notification sink recording deliveries.
pub struct MockNotifier {
    fail_next: Mutex<bool>,
    sent: Mutex<Vec<OrderNotification>>,
}

impl MockNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            fail_next: Mutex::new(false),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn fail_next(&self) {
        *lock(&self.fail_next) = true;
    }

    pub fn sent(&self) -> Vec<OrderNotification> {
        lock(&self.sent).clone()
    }
}

#[async_trait]
impl NotificationService for MockNotifier {
    async fn send_confirmation(
        &self,
        notification: &OrderNotification,
    ) -> Result<(), ServiceError> {
        let mut fail = lock(&self.fail_next);
        if *fail {
            *fail = false;
            return Err(ServiceError::Http { status: 503 });
        }
        lock(&self.sent).push(notification.clone());
        Ok(())
    }
}
