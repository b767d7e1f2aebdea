// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed-window rate limiting over a shared key-value store.
//!
//! One atomic increment per request against `rate:{principal}`; the first
//! increment in a window arms the TTL. Fixed windows accept the burst at
//! window boundaries as a tolerated imprecision.
//!
//! When the shared store is unreachable, the limiter degrades to an
//! in-process counter with the same key and window. That counter is scoped
//! to one running instance and does not coordinate across replicas.

use std::sync::Arc;

use tracing::{debug, warn};
use voxbrief_core::{KeyValueStore, StoreResult};

use crate::memory::MemoryStore;

/// Outcome of a rate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Limited,
}

impl RateDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Fixed-window rate limiter keyed by principal id.
pub struct RateLimiter {
    store: Arc<dyn KeyValueStore>,
    fallback: MemoryStore,
    limit: i64,
    window_secs: u64,
}

impl RateLimiter {
    /// Creates a limiter allowing `limit` requests per `window_secs` window.
    pub fn new(store: Arc<dyn KeyValueStore>, limit: i64, window_secs: u64) -> Self {
        Self {
            store,
            fallback: MemoryStore::new(),
            limit,
            window_secs,
        }
    }

    /// Records one request for `principal` and decides whether it is allowed.
    ///
    /// The increment happens before the decision is acted on, so rejected
    /// requests still count against the window.
    pub async fn allow(&self, principal: i64) -> RateDecision {
        let key = format!("rate:{principal}");

        let count = match self.store.incr_with_ttl(&key, self.window_secs).await {
            StoreResult::Ok(count) => count,
            StoreResult::Unavailable => {
                warn!(principal, "store unreachable, using in-process rate counter");
                self.fallback
                    .incr_with_ttl(&key, self.window_secs)
                    .await
                    .unavailable_or(1)
            }
        };

        if count <= self.limit {
            debug!(principal, count, limit = self.limit, "request allowed");
            RateDecision::Allowed
        } else {
            debug!(principal, count, limit = self.limit, "request rate limited");
            RateDecision::Limited
        }
    }
}
