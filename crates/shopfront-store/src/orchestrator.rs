//! Checkout orchestration.
//!
//! A finite-state sequence that drives shipping validation, order
//! creation, the chosen payment path, the purchase confirmation, and
//! post-purchase cleanup across the independent backend collaborators.
//!
//! Partial-failure semantics:
//! - validation failures stay in `CollectingShipping` and never reach the
//!   network;
//! - an order-creation failure leaves the flow in `Validated` with no side
//!   effects;
//! - a payment failure (cancellation, gateway load failure, rejected
//!   proof) pins the flow at `OrderCreated`: the order exists unconfirmed
//!   on the server, payment can be retried, and the cart is never cleared;
//! - notification delivery and cart cleanup after a confirmed purchase are
//!   best-effort and can never reverse it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use shopfront_commerce::cart::{compute_totals, Totals};
use shopfront_commerce::checkout::{
    CheckoutDraft, OrderNotification, OrderReceipt, PaymentMethod, ShippingDetails,
};
use shopfront_commerce::{CommerceError, Money, OrderId};

use crate::config::StoreConfig;
use crate::coupon::CouponResolver;
use crate::error::{PaymentError, StoreError};
use crate::services::{
    CartService, ConfirmOutcome, CouponService, GatewayOutcome, NotificationService,
    OrderService, PaymentGateway,
};
use crate::store::{bounded, CartStore};

/// Where a checkout attempt currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutState {
    /// Collecting and validating shipping fields.
    CollectingShipping,
    /// Shipping validated; a draft exists.
    Validated,
    /// The order exists on the server, payment not yet confirmed.
    OrderCreated,
    /// Gateway proof verified server-side.
    PaymentConfirmed,
    /// Confirmation notification attempted.
    Notified,
    /// Purchased lines removed from the cart.
    Cleaned,
    /// Checkout finished; the draft is destroyed.
    Completed,
}

impl CheckoutState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::CollectingShipping => "collecting_shipping",
            CheckoutState::Validated => "validated",
            CheckoutState::OrderCreated => "order_created",
            CheckoutState::PaymentConfirmed => "payment_confirmed",
            CheckoutState::Notified => "notified",
            CheckoutState::Cleaned => "cleaned",
            CheckoutState::Completed => "completed",
        }
    }
}

/// What a completed checkout hands back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutSummary {
    pub order_id: OrderId,
    pub totals: Totals,
}

/// Drives one checkout attempt. One orchestrator owns the cart at a time;
/// there are no simultaneous checkouts within a session.
pub struct CheckoutOrchestrator<S, O, G, N> {
    store: Arc<CartStore<S>>,
    orders: Arc<O>,
    gateway: Arc<G>,
    notifier: Arc<N>,
    config: StoreConfig,
    payment_method: PaymentMethod,
    state: CheckoutState,
    draft: Option<CheckoutDraft>,
    receipt: Option<OrderReceipt>,
    submitted_totals: Option<Totals>,
}

impl<S, O, G, N> CheckoutOrchestrator<S, O, G, N>
where
    S: CartService,
    O: OrderService,
    G: PaymentGateway,
    N: NotificationService,
{
    pub fn new(
        store: Arc<CartStore<S>>,
        orders: Arc<O>,
        gateway: Arc<G>,
        notifier: Arc<N>,
        config: StoreConfig,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            store,
            orders,
            gateway,
            notifier,
            config,
            payment_method,
            state: CheckoutState::CollectingShipping,
            draft: None,
            receipt: None,
            submitted_totals: None,
        }
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Validate shipping fields and build the checkout draft.
    ///
    /// Purely local: no network call is made. May be repeated any number
    /// of times before the order is placed; a coupon already applied is
    /// carried over as long as the cart total it was validated against
    /// still holds.
    pub fn submit_shipping(&mut self, shipping: ShippingDetails) -> Result<(), StoreError> {
        if !matches!(
            self.state,
            CheckoutState::CollectingShipping | CheckoutState::Validated
        ) {
            return Err(self.invalid("submit_shipping"));
        }

        shipping.validate()?;

        let snapshot = self.store.snapshot();
        if snapshot.is_empty() {
            self.state = CheckoutState::CollectingShipping;
            self.draft = None;
            return Err(CommerceError::BusinessRule("cart is empty".to_string()).into());
        }

        let carried_coupon = match self.draft.take().and_then(|d| d.coupon) {
            Some(coupon) => {
                let base = compute_totals(
                    &snapshot,
                    self.config.tax_rate,
                    Money::zero(self.config.currency),
                    self.config.currency,
                )?;
                let before = base.before_discount()?;
                if coupon.is_stale(before) {
                    None
                } else {
                    Some(coupon)
                }
            }
            None => None,
        };

        let mut draft = CheckoutDraft::new(shipping, self.payment_method, snapshot);
        draft.coupon = carried_coupon;
        self.draft = Some(draft);
        self.state = CheckoutState::Validated;
        Ok(())
    }

    /// The amount a coupon must be validated against: the draft
    /// snapshot's subtotal plus tax, before any discount.
    pub fn pre_discount_total(&self) -> Result<Money, StoreError> {
        let draft = self.draft.as_ref().ok_or_else(|| self.invalid("pre_discount_total"))?;
        let base = compute_totals(
            &draft.cart_snapshot,
            self.config.tax_rate,
            Money::zero(self.config.currency),
            self.config.currency,
        )?;
        Ok(base.before_discount()?)
    }

    /// Validate a coupon code against the draft's pre-discount total and
    /// attach the result to the draft.
    ///
    /// The result is checked again for staleness at `place_order`; if the
    /// cart changes in between, the code must be re-applied.
    pub async fn apply_coupon<C: CouponService>(
        &mut self,
        coupons: &CouponResolver<C>,
        code: &str,
    ) -> Result<(), StoreError> {
        self.ensure(CheckoutState::Validated, "apply_coupon")?;
        let before = self.pre_discount_total()?;
        let coupon = coupons.apply(code, before).await?;
        if let Some(draft) = self.draft.as_mut() {
            draft.coupon = Some(coupon);
        }
        Ok(())
    }

    /// Create the order from the draft.
    ///
    /// The cart is re-snapshotted first; a coupon that no longer matches
    /// the current total is discarded, and the caller must re-validate it
    /// before placing the order. On any failure the flow stays in
    /// `Validated`.
    pub async fn place_order(&mut self) -> Result<OrderReceipt, StoreError> {
        self.ensure(CheckoutState::Validated, "place_order")?;

        let snapshot = self.store.snapshot();
        if snapshot.is_empty() {
            return Err(CommerceError::BusinessRule("cart is empty".to_string()).into());
        }
        let base = compute_totals(
            &snapshot,
            self.config.tax_rate,
            Money::zero(self.config.currency),
            self.config.currency,
        )?;
        let before = base.before_discount()?;

        let draft = self
            .draft
            .as_mut()
            .ok_or(CommerceError::InvalidTransition {
                from: "validated".to_string(),
                to: "place_order".to_string(),
            })?;

        if let Some(coupon) = &draft.coupon {
            if coupon.is_stale(before) {
                draft.coupon = None;
                draft.cart_snapshot = snapshot;
                return Err(CommerceError::BusinessRule(
                    "cart changed since the coupon was validated; apply it again".to_string(),
                )
                .into());
            }
        }
        draft.cart_snapshot = snapshot;

        let discount = draft
            .coupon
            .as_ref()
            .map(|c| c.discount)
            .unwrap_or_else(|| Money::zero(self.config.currency));
        let totals = compute_totals(
            &draft.cart_snapshot,
            self.config.tax_rate,
            discount,
            self.config.currency,
        )?;

        let receipt = bounded(
            self.config.request_timeout,
            self.orders.create(draft, &totals),
        )
        .await?;

        self.receipt = Some(receipt.clone());
        self.submitted_totals = Some(totals);
        self.state = CheckoutState::OrderCreated;
        Ok(receipt)
    }

    /// Drive the created order through payment and finalization.
    ///
    /// COD finalizes immediately. The gateway path opens the external
    /// payment UI and, on payer approval, has the order service verify the
    /// proof; only then does it finalize. Every payment failure leaves the
    /// flow at `OrderCreated` so payment can be retried; the pending
    /// order's expiry is the order service's responsibility.
    pub async fn complete(&mut self) -> Result<CheckoutSummary, StoreError> {
        self.ensure(CheckoutState::OrderCreated, "complete")?;
        let receipt = self
            .receipt
            .clone()
            .ok_or_else(|| self.invalid("complete"))?;

        match self.payment_method {
            PaymentMethod::CashOnDelivery => self.finalize(receipt).await,
            PaymentMethod::Gateway => {
                let authorization = receipt.gateway_authorization.clone().ok_or_else(|| {
                    StoreError::Payment(PaymentError::GatewayUnavailable(
                        "order service returned no gateway authorization".to_string(),
                    ))
                })?;

                // The gateway UI is payer-driven and may stay open for
                // minutes; it is not bounded by the request timeout. The
                // payer cancelling is the cancellation path.
                let outcome = self
                    .gateway
                    .authorize(&authorization)
                    .await
                    .map_err(|e| PaymentError::GatewayUnavailable(e.to_string()))?;

                let proof = match outcome {
                    GatewayOutcome::Cancelled => {
                        return Err(PaymentError::Cancelled.into());
                    }
                    GatewayOutcome::Approved(proof) => proof,
                };

                let confirmed = bounded(
                    self.config.request_timeout,
                    self.orders.confirm(&receipt.order_id, &proof),
                )
                .await?;

                match confirmed {
                    ConfirmOutcome::Rejected { reason } => {
                        Err(PaymentError::VerificationRejected(reason).into())
                    }
                    ConfirmOutcome::Verified => {
                        self.state = CheckoutState::PaymentConfirmed;
                        self.finalize(receipt).await
                    }
                }
            }
        }
    }

    /// Abandon the checkout attempt: the draft and any coupon are
    /// destroyed. An order already created stays pending on the server.
    pub fn abandon(&mut self) {
        self.draft = None;
        self.receipt = None;
        self.submitted_totals = None;
        self.state = CheckoutState::CollectingShipping;
    }

    /// Notification, cleanup, completion. Both side effects are
    /// best-effort: the purchase already exists authoritatively on the
    /// server and is never reversed from here.
    async fn finalize(&mut self, receipt: OrderReceipt) -> Result<CheckoutSummary, StoreError> {
        let draft = self.draft.take().ok_or_else(|| self.invalid("finalize"))?;
        let totals = self
            .submitted_totals
            .take()
            .ok_or_else(|| self.invalid("finalize"))?;

        let notification = OrderNotification {
            order_id: receipt.order_id.clone(),
            line_items: draft.cart_snapshot.clone(),
            totals,
            email: draft.shipping.email.clone(),
        };
        if let Err(e) = bounded(
            self.config.request_timeout,
            self.notifier.send_confirmation(&notification),
        )
        .await
        {
            warn!(order_id = %receipt.order_id, error = %e,
                "confirmation notification failed; purchase stands");
        }
        self.state = CheckoutState::Notified;

        self.store.clear_purchased(&draft.line_keys()).await;
        self.state = CheckoutState::Cleaned;

        self.receipt = None;
        self.state = CheckoutState::Completed;
        Ok(CheckoutSummary {
            order_id: receipt.order_id,
            totals,
        })
    }

    fn ensure(&self, expected: CheckoutState, operation: &str) -> Result<(), StoreError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(self.invalid(operation))
        }
    }

    fn invalid(&self, operation: &str) -> StoreError {
        CommerceError::InvalidTransition {
            from: self.state.as_str().to_string(),
            to: operation.to_string(),
        }
        .into()
    }
}
