//! The cart store.
//!
//! Owns the canonical local line list and drives all cart mutations with
//! optimistic-then-reconciled semantics:
//!
//! - `update` applies the new quantity locally before the persistence call
//!   and rolls back the exact pre-call quantity if that call fails;
//! - every key carries a monotonically increasing sequence number, and a
//!   response is applied only if it is the newest issued for that key, so a
//!   slow in-flight request can never clobber a newer optimistic value;
//! - every call is bounded by the configured timeout.
//!
//! UI layers subscribe to snapshots and own no cart logic themselves.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::watch;
use tracing::{debug, warn};

use shopfront_commerce::cart::{
    compute_totals, validate_quantity, CartLine, LineKey, Totals,
};
use shopfront_commerce::{CommerceError, Money};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::services::{CartService, ServiceError};

/// Per-key request bookkeeping.
#[derive(Debug, Default, Clone, Copy)]
struct KeySequence {
    /// Highest sequence number issued for this key.
    issued: u64,
    /// Requests issued but not yet settled.
    pending: u32,
}

#[derive(Debug, Default)]
struct Inner {
    lines: Vec<CartLine>,
    sequences: HashMap<LineKey, KeySequence>,
}

impl Inner {
    fn find(&self, key: &LineKey) -> Option<usize> {
        self.lines.iter().position(|l| l.matches(key))
    }

    /// Accept the server's canonical list, keeping the local optimistic
    /// quantity for any key that still has requests in flight.
    fn accept_canonical(&mut self, mut canonical: Vec<CartLine>) {
        for line in &mut canonical {
            let key = line.key();
            let in_flight = self
                .sequences
                .get(&key)
                .map(|s| s.pending > 0)
                .unwrap_or(false);
            if in_flight {
                if let Some(local) = self.lines.iter().find(|l| l.matches(&key)) {
                    line.quantity = local.quantity;
                }
            }
        }
        self.lines = canonical;
    }

    /// Invalidate any in-flight responses for a key whose line was removed.
    fn invalidate(&mut self, key: &LineKey) {
        self.sequences.entry(key.clone()).or_default().issued += 1;
    }
}

/// The client-side cart state container.
pub struct CartStore<S> {
    service: Arc<S>,
    config: StoreConfig,
    inner: Mutex<Inner>,
    snapshot_tx: watch::Sender<Vec<CartLine>>,
}

impl<S: CartService> CartStore<S> {
    /// Create an empty store backed by the given persistence service.
    pub fn new(service: Arc<S>, config: StoreConfig) -> Self {
        let (snapshot_tx, _) = watch::channel(Vec::new());
        Self {
            service,
            config,
            inner: Mutex::new(Inner::default()),
            snapshot_tx,
        }
    }

    /// Current line list.
    pub fn snapshot(&self) -> Vec<CartLine> {
        self.lock().lines.clone()
    }

    /// Subscribe to line-list changes.
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartLine>> {
        self.snapshot_tx.subscribe()
    }

    /// Totals for the current snapshot, using the shared computation.
    pub fn totals(&self, discount: Money) -> Result<Totals, StoreError> {
        let lines = self.snapshot();
        Ok(compute_totals(
            &lines,
            self.config.tax_rate,
            discount,
            self.config.currency,
        )?)
    }

    /// Add a new line to the cart.
    ///
    /// Fails with `DuplicateLine`, making no network call, if the identity
    /// already exists; the caller should route to `update`. On success the
    /// entire local list is replaced with the server's canonical response.
    pub async fn add(&self, line: CartLine) -> Result<(), StoreError> {
        let key = line.key();
        {
            let inner = self.lock();
            if inner.find(&key).is_some() {
                return Err(CommerceError::DuplicateLine {
                    product_id: key.product_id.to_string(),
                    variant_key: key.variant_key.to_string(),
                }
                .into());
            }
        }

        let canonical = self.bounded(self.service.add_line(&line)).await?;

        let mut inner = self.lock();
        inner.accept_canonical(canonical);
        self.publish(&inner);
        Ok(())
    }

    /// Set the quantity of an existing line.
    ///
    /// Optimistic: the new quantity is visible immediately. On failure the
    /// exact quantity in effect before this specific call is restored,
    /// unless a newer request for the same key has been issued meanwhile,
    /// in which case this response is stale and discarded.
    pub async fn update(&self, key: &LineKey, new_quantity: i64) -> Result<(), StoreError> {
        validate_quantity(new_quantity)?;

        let (seq, previous_quantity) = {
            let mut inner = self.lock();
            let idx = inner.find(key).ok_or_else(|| line_not_found(key))?;
            let previous = inner.lines[idx].quantity;
            inner.lines[idx].quantity = new_quantity;
            let entry = inner.sequences.entry(key.clone()).or_default();
            entry.issued += 1;
            entry.pending += 1;
            let seq = entry.issued;
            self.publish(&inner);
            (seq, previous)
        };

        let result = self
            .bounded(self.service.update_quantity(key, new_quantity))
            .await;

        let mut inner = self.lock();
        if let Some(entry) = inner.sequences.get_mut(key) {
            entry.pending = entry.pending.saturating_sub(1);
        }
        let newest = inner
            .sequences
            .get(key)
            .map(|s| s.issued)
            .unwrap_or(seq);
        if seq != newest {
            // A newer request owns this key's state now.
            debug!(key = %key, seq, newest, "discarding stale cart response");
            return result.map(|_| ()).map_err(Into::into);
        }

        match result {
            Ok(canonical) => {
                inner.accept_canonical(canonical);
                self.publish(&inner);
                Ok(())
            }
            Err(e) => {
                if let Some(idx) = inner.find(key) {
                    inner.lines[idx].quantity = previous_quantity;
                }
                self.publish(&inner);
                Err(e.into())
            }
        }
    }

    /// Remove a line from the cart.
    ///
    /// HTTP success is sufficient: the local line is dropped by identity
    /// match without requiring a payload.
    pub async fn remove(&self, key: &LineKey) -> Result<(), StoreError> {
        {
            let inner = self.lock();
            if inner.find(key).is_none() {
                return Err(line_not_found(key).into());
            }
        }

        self.bounded(self.service.remove_line(key)).await?;

        let mut inner = self.lock();
        inner.lines.retain(|l| !l.matches(key));
        inner.invalidate(key);
        self.publish(&inner);
        Ok(())
    }

    /// Remove exactly the given keys after a completed purchase.
    ///
    /// Best-effort: deletes run concurrently, a failed delete keeps the
    /// local line and is logged, and lines added to the cart during
    /// checkout are never touched.
    pub async fn clear_purchased(&self, keys: &[LineKey]) {
        let present: Vec<LineKey> = {
            let inner = self.lock();
            keys.iter()
                .filter(|k| inner.find(k).is_some())
                .cloned()
                .collect()
        };
        if present.is_empty() {
            return;
        }

        let deletes = present.iter().map(|key| async move {
            let result = self.bounded(self.service.remove_line(key)).await;
            (key, result)
        });
        let results = join_all(deletes).await;

        let mut inner = self.lock();
        for (key, result) in results {
            match result {
                Ok(()) => {
                    inner.lines.retain(|l| !l.matches(key));
                    inner.invalidate(key);
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "post-purchase cleanup failed for line");
                }
            }
        }
        self.publish(&inner);
    }

    /// Re-fetch the canonical list from the server.
    ///
    /// Quantities of keys with in-flight updates keep their local
    /// optimistic value.
    pub async fn refresh(&self) -> Result<(), StoreError> {
        let canonical = self.bounded(self.service.fetch_lines()).await?;
        let mut inner = self.lock();
        inner.accept_canonical(canonical);
        self.publish(&inner);
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn publish(&self, inner: &Inner) {
        self.snapshot_tx.send_replace(inner.lines.clone());
    }

    async fn bounded<T>(
        &self,
        call: impl std::future::Future<Output = Result<T, ServiceError>>,
    ) -> Result<T, ServiceError> {
        bounded(self.config.request_timeout, call).await
    }
}

/// Run a service call under a timeout; exceeding it is a `Timeout` error.
pub(crate) async fn bounded<T>(
    limit: Duration,
    call: impl std::future::Future<Output = Result<T, ServiceError>>,
) -> Result<T, ServiceError> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(ServiceError::Timeout(limit)),
    }
}

fn line_not_found(key: &LineKey) -> CommerceError {
    CommerceError::LineNotFound {
        product_id: key.product_id.to_string(),
        variant_key: key.variant_key.to_string(),
    }
}
