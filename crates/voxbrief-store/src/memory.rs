// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process key-value store with lazy TTL expiry.
//!
//! Used when no REST store is configured, and as a deterministic substitute
//! in tests. Expiry is checked on access; entries are removed the first time
//! they are observed past their deadline. State is scoped to one process, so
//! idempotency and rate limiting only coordinate within a single instance.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use voxbrief_core::{KeyValueStore, StoreResult};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }
}

/// In-memory [`KeyValueStore`] backed by a concurrent map.
///
/// Never reports [`StoreResult::Unavailable`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, Entry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes the entry if it has expired, returning the live entry value.
    fn live_value(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key) {
            if !entry.is_expired(now) {
                return Some(entry.value.clone());
            }
        }
        self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        None
    }

    #[cfg(test)]
    fn insert_expired(&self, key: &str, value: &str) {
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Some(Instant::now() - Duration::from_secs(1)),
            },
        );
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn exists(&self, key: &str) -> StoreResult<bool> {
        StoreResult::Ok(self.live_value(key).is_some())
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl_secs: u64) -> StoreResult<()> {
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Some(Instant::now() + Duration::from_secs(ttl_secs)),
            },
        );
        StoreResult::Ok(())
    }

    async fn incr_with_ttl(&self, key: &str, ttl_secs: u64) -> StoreResult<i64> {
        let now = Instant::now();
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Entry {
                value: "0".to_string(),
                expires_at: Some(now + Duration::from_secs(ttl_secs)),
            });

        // A counter found past its deadline restarts the window.
        if entry.is_expired(now) {
            entry.value = "0".to_string();
            entry.expires_at = Some(now + Duration::from_secs(ttl_secs));
        }

        let count = entry.value.parse::<i64>().unwrap_or(0) + 1;
        entry.value = count.to_string();
        StoreResult::Ok(count)
    }
}
