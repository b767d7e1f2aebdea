// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-value store adapters and rate limiting for the Voxbrief bot.
//!
//! Two [`KeyValueStore`] implementations are provided:
//!
//! - [`RestKvStore`]: an Upstash-style Redis REST client used in production,
//!   where every operation is a single HTTP call and any transport or server
//!   error maps to [`StoreResult::Unavailable`].
//! - [`MemoryStore`]: an in-process store with lazy TTL expiry, used when no
//!   REST store is configured and in tests.
//!
//! [`RateLimiter`] builds a fixed-window counter on top of whichever store is
//! injected, with a per-instance in-memory fallback when the store is down.
//!
//! [`KeyValueStore`]: voxbrief_core::KeyValueStore
//! [`StoreResult::Unavailable`]: voxbrief_core::StoreResult

pub mod memory;
pub mod rate;
pub mod rest;

pub use memory::MemoryStore;
pub use rate::{RateDecision, RateLimiter};
pub use rest::RestKvStore;
