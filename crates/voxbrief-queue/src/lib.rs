// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Queue dispatch for the Voxbrief bot.
//!
//! [`Dispatcher`] publishes job payloads to an external queue (QStash-style
//! publish endpoint) for asynchronous execution. Publishing never fails from
//! the caller's point of view: every outcome is a [`PublishOutcome`], and
//! [`PublishOutcome::NotAccepted`] tells the caller to run the job inline.
//! Dispatch being disabled or unconfigured is a policy decision, not an
//! error, and resolves without any network call.

use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::{debug, info, warn};
use voxbrief_core::{JobPayload, VoxbriefError};

/// Timeout for one publish attempt.
const PUBLISH_TIMEOUT: Duration = Duration::from_secs(10);

/// Escapes everything `encodeURIComponent` would, so the target URL survives
/// as a single path segment of the publish URL.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Outcome of a publish attempt.
///
/// `NotAccepted` carries the reason for logs; the caller's reaction is the
/// same either way: run the job inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The queue took the job; it will be delivered to the target URL.
    Accepted,
    /// The job was not handed off; the caller must run it inline.
    NotAccepted { reason: String },
}

impl PublishOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    fn not_accepted(reason: impl Into<String>) -> Self {
        Self::NotAccepted {
            reason: reason.into(),
        }
    }
}

struct QueueTarget {
    token: String,
    publish_url: String,
    target_url: String,
}

/// Publishes job payloads to an external queue, or signals inline fallback.
pub struct Dispatcher {
    client: reqwest::Client,
    target: Option<QueueTarget>,
}

impl Dispatcher {
    /// Creates a dispatcher.
    ///
    /// Dispatch is active only when `enabled` is true and both the token and
    /// target URL are present; otherwise every publish resolves to
    /// `NotAccepted` locally.
    pub fn new(
        enabled: bool,
        token: Option<String>,
        publish_url: String,
        target_url: Option<String>,
    ) -> Result<Self, VoxbriefError> {
        let client = reqwest::Client::builder()
            .timeout(PUBLISH_TIMEOUT)
            .build()
            .map_err(|e| VoxbriefError::Queue {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        let target = match (enabled, token, target_url) {
            (true, Some(token), Some(target_url)) => Some(QueueTarget {
                token,
                publish_url: publish_url.trim_end_matches('/').to_string(),
                target_url,
            }),
            _ => None,
        };

        Ok(Self { client, target })
    }

    /// A dispatcher that always answers `NotAccepted`.
    pub fn disabled() -> Self {
        // Building a default client cannot fail.
        Self {
            client: reqwest::Client::new(),
            target: None,
        }
    }

    /// Attempts to hand the payload to the queue.
    pub async fn publish(&self, payload: &JobPayload) -> PublishOutcome {
        let Some(target) = &self.target else {
            debug!(
                chat_id = payload.chat_id,
                message_id = payload.message_id,
                "dispatch disabled, job stays inline"
            );
            return PublishOutcome::not_accepted("dispatch disabled or unconfigured");
        };

        let url = format!(
            "{}/{}",
            target.publish_url,
            utf8_percent_encode(&target.target_url, URI_COMPONENT)
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&target.token)
            .json(payload)
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => {
                info!(
                    chat_id = payload.chat_id,
                    message_id = payload.message_id,
                    target = %target.target_url,
                    "job handed to queue"
                );
                PublishOutcome::Accepted
            }
            Ok(response) => {
                let status = response.status();
                warn!(
                    chat_id = payload.chat_id,
                    message_id = payload.message_id,
                    status = %status,
                    "queue rejected publish"
                );
                PublishOutcome::not_accepted(format!("publish returned status {status}"))
            }
            Err(e) => {
                warn!(
                    chat_id = payload.chat_id,
                    message_id = payload.message_id,
                    error = %e,
                    "publish request failed"
                );
                PublishOutcome::not_accepted(format!("publish request failed: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn payload() -> JobPayload {
        JobPayload {
            chat_id: 1,
            message_id: 100,
            file_id: "abc".to_string(),
            duration: 30,
            user_id: Some(7),
        }
    }

    #[tokio::test]
    async fn accepted_when_queue_returns_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(
                "/v2/publish/https%3A%2F%2Fbot.example.com%2Fjobs%2Fprocess",
            ))
            .and(header("authorization", "Bearer qs-token"))
            .and(body_json(serde_json::json!({
                "chat_id": 1,
                "message_id": 100,
                "file_id": "abc",
                "duration": 30,
                "user_id": 7
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "messageId": "msg_1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dispatcher = Dispatcher::new(
            true,
            Some("qs-token".to_string()),
            format!("{}/v2/publish", server.uri()),
            Some("https://bot.example.com/jobs/process".to_string()),
        )
        .unwrap();

        assert_eq!(dispatcher.publish(&payload()).await, PublishOutcome::Accepted);
    }

    #[tokio::test]
    async fn disabled_dispatch_makes_no_network_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let dispatcher = Dispatcher::new(
            false,
            Some("qs-token".to_string()),
            format!("{}/v2/publish", server.uri()),
            Some("https://bot.example.com/jobs/process".to_string()),
        )
        .unwrap();

        assert!(!dispatcher.publish(&payload()).await.is_accepted());
    }

    #[tokio::test]
    async fn missing_token_means_not_accepted_without_network() {
        let dispatcher = Dispatcher::new(
            true,
            None,
            "https://qstash.upstash.io/v2/publish".to_string(),
            Some("https://bot.example.com/jobs/process".to_string()),
        )
        .unwrap();

        let outcome = dispatcher.publish(&payload()).await;
        assert!(matches!(
            outcome,
            PublishOutcome::NotAccepted { reason } if reason.contains("unconfigured")
        ));
    }

    #[tokio::test]
    async fn queue_error_status_maps_to_not_accepted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dispatcher = Dispatcher::new(
            true,
            Some("qs-token".to_string()),
            format!("{}/v2/publish", server.uri()),
            Some("https://bot.example.com/jobs/process".to_string()),
        )
        .unwrap();

        let outcome = dispatcher.publish(&payload()).await;
        assert!(matches!(
            outcome,
            PublishOutcome::NotAccepted { reason } if reason.contains("500")
        ));
    }

    #[tokio::test]
    async fn unreachable_queue_maps_to_not_accepted() {
        let dispatcher = Dispatcher::new(
            true,
            Some("qs-token".to_string()),
            "http://127.0.0.1:1/v2/publish".to_string(),
            Some("https://bot.example.com/jobs/process".to_string()),
        )
        .unwrap();

        assert!(!dispatcher.publish(&payload()).await.is_accepted());
    }
}
