// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Redis-over-REST key-value store client.
//!
//! Speaks the Upstash-style REST protocol where each Redis command is a
//! single authenticated GET with the command and its arguments as URL path
//! segments, and the server replies with a `{"result": ...}` envelope.
//!
//! Every operation maps transport errors, non-success statuses, and server
//! error envelopes to [`StoreResult::Unavailable`] so callers choose their
//! own fallback branch instead of receiving an error.

use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::Deserialize;
use tracing::warn;
use voxbrief_core::{KeyValueStore, StoreResult, VoxbriefError};

/// Characters escaped when a key or value becomes a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Timeout applied to every store round trip.
const STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Response envelope returned by the REST endpoint.
#[derive(Debug, Deserialize)]
struct RestResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

/// Key-value store backed by a Redis REST endpoint.
#[derive(Debug, Clone)]
pub struct RestKvStore {
    client: reqwest::Client,
    base_url: String,
}

impl RestKvStore {
    /// Creates a new REST store client.
    ///
    /// # Arguments
    /// * `rest_url` - Base URL of the REST endpoint (no trailing slash needed)
    /// * `token` - Bearer token for authentication
    pub fn new(rest_url: String, token: String) -> Result<Self, VoxbriefError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let mut auth = reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| VoxbriefError::Config(format!("invalid store token header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(STORE_TIMEOUT)
            .build()
            .map_err(|e| VoxbriefError::Store {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: rest_url.trim_end_matches('/').to_string(),
        })
    }

    /// Executes one command and returns its `result` field, or `Unavailable`
    /// on any transport or server failure.
    async fn command(&self, path: &str) -> StoreResult<serde_json::Value> {
        let url = format!("{}/{path}", self.base_url);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "store request failed");
                return StoreResult::Unavailable;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "store returned non-success status");
            return StoreResult::Unavailable;
        }

        let envelope: RestResponse = match response.json().await {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(error = %e, "store response body was not valid JSON");
                return StoreResult::Unavailable;
            }
        };

        if let Some(error) = envelope.error {
            warn!(error = %error, "store returned error envelope");
            return StoreResult::Unavailable;
        }

        StoreResult::Ok(envelope.result.unwrap_or(serde_json::Value::Null))
    }

    fn encode(segment: &str) -> String {
        utf8_percent_encode(segment, PATH_SEGMENT).to_string()
    }
}

#[async_trait]
impl KeyValueStore for RestKvStore {
    async fn exists(&self, key: &str) -> StoreResult<bool> {
        let path = format!("exists/{}", Self::encode(key));
        match self.command(&path).await {
            StoreResult::Ok(value) => StoreResult::Ok(value.as_i64().unwrap_or(0) > 0),
            StoreResult::Unavailable => StoreResult::Unavailable,
        }
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl_secs: u64) -> StoreResult<()> {
        let path = format!(
            "set/{}/{}/ex/{ttl_secs}",
            Self::encode(key),
            Self::encode(value)
        );
        match self.command(&path).await {
            StoreResult::Ok(_) => StoreResult::Ok(()),
            StoreResult::Unavailable => StoreResult::Unavailable,
        }
    }

    async fn incr_with_ttl(&self, key: &str, ttl_secs: u64) -> StoreResult<i64> {
        let encoded = Self::encode(key);
        let count = match self.command(&format!("incr/{encoded}")).await {
            StoreResult::Ok(value) => match value.as_i64() {
                Some(count) => count,
                None => {
                    warn!(key, "incr returned a non-integer result");
                    return StoreResult::Unavailable;
                }
            },
            StoreResult::Unavailable => return StoreResult::Unavailable,
        };

        // First increment in a window arms the TTL. A failed expire leaves
        // the counter without expiry; the count is still valid.
        if count == 1
            && self
                .command(&format!("expire/{encoded}/{ttl_secs}"))
                .await
                .is_unavailable()
        {
            warn!(key, "failed to arm TTL on rate counter");
        }

        StoreResult::Ok(count)
    }
}
