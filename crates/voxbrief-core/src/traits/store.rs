// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-value store trait for idempotency marks and rate counters.
//!
//! Store operations do not return `Result`: the contract makes the fail-open
//! behavior explicit. An unreachable store yields [`StoreResult::Unavailable`]
//! and every caller has a documented, tested fallback branch instead of a
//! swallowed error.

use async_trait::async_trait;

/// Outcome of a store operation that distinguishes a real value from an
/// unreachable backend.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreResult<T> {
    /// The operation completed against the backend.
    Ok(T),
    /// The backend could not be reached. Callers fail open.
    Unavailable,
}

impl<T> StoreResult<T> {
    /// Returns the value, or `fallback` when the store was unavailable.
    pub fn unavailable_or(self, fallback: T) -> T {
        match self {
            StoreResult::Ok(v) => v,
            StoreResult::Unavailable => fallback,
        }
    }

    /// True when the backend could not be reached.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreResult::Unavailable)
    }
}

/// Shared mutable state of the system: atomic single-key operations with TTL.
///
/// Multiple bot instances may run concurrently; this store is their only
/// coordination point. No multi-key transactions, no locks.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// True iff the key is present.
    ///
    /// Idempotency callers treat `Unavailable` as "not marked": a false
    /// negative causes at most one duplicate reply, never data loss.
    async fn exists(&self, key: &str) -> StoreResult<bool>;

    /// Sets a value with a TTL in seconds. Best-effort: callers log and
    /// continue on `Unavailable` because failing to record a mark must never
    /// abort an already-delivered reply.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl_secs: u64) -> StoreResult<()>;

    /// Atomically increments the key and returns the new count. On the first
    /// increment of a window the TTL is armed to `ttl_secs`. Rate-limit
    /// callers treat `Unavailable` as "allow".
    async fn incr_with_ttl(&self, key: &str, ttl_secs: u64) -> StoreResult<i64>;
}
