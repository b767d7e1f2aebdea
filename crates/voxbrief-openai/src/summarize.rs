// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transcript summarization via the OpenAI `/v1/chat/completions` endpoint.
//!
//! The model is asked for a strict-JSON digest. Models do not always comply,
//! so a reply that fails to parse is demoted to a digest whose summary is the
//! raw reply text rather than an error.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};
use voxbrief_core::{Summarizer, SummaryDigest, VoxbriefError};

/// Timeout for a summarization call.
const SUMMARIZE_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

/// Summarization client for the OpenAI chat completions API.
#[derive(Debug, Clone)]
pub struct ChatSummarizer {
    client: reqwest::Client,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl ChatSummarizer {
    /// Creates a new summarization client.
    pub fn new(
        api_key: String,
        base_url: String,
        model: String,
        max_tokens: u32,
        temperature: f64,
    ) -> Result<Self, VoxbriefError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let mut auth = reqwest::header::HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| VoxbriefError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(SUMMARIZE_TIMEOUT)
            .build()
            .map_err(|e| VoxbriefError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            max_tokens,
            temperature,
        })
    }

    fn prompt(transcript: &str) -> String {
        format!(
            "Produce a structured digest of this voice note transcript. \
             Reply with strict JSON only, no prose around it.\n\
             Fields:\n\
             - \"summary\" (1-2 sentences)\n\
             - \"bullets\" (5-8 key points)\n\
             - \"next_steps\" (agreements and follow-ups, a list)\n\
             - \"tone\" (tone and mood, one sentence)\n\n\
             Transcript:\n{transcript}"
        )
    }
}

#[async_trait]
impl Summarizer for ChatSummarizer {
    async fn summarize(&self, transcript: &str) -> Result<SummaryDigest, VoxbriefError> {
        let payload = serde_json::json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": Self::prompt(transcript) }],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
        });

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(&payload)
            .send()
            .await
            .map_err(|e| VoxbriefError::Provider {
                message: format!("summarization request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VoxbriefError::Provider {
                message: format!("summarization returned status {status}: {body}"),
                source: None,
            });
        }

        let parsed: ChatResponse =
            response.json().await.map_err(|e| VoxbriefError::Provider {
                message: format!("summarization response was not valid JSON: {e}"),
                source: Some(Box::new(e)),
            })?;

        let content = parsed
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .unwrap_or_default();

        match serde_json::from_str::<SummaryDigest>(&content) {
            Ok(digest) => {
                debug!(bullets = digest.bullets.len(), "parsed structured digest");
                Ok(digest)
            }
            Err(e) => {
                warn!(error = %e, "model reply was not valid digest JSON, using raw text");
                Ok(SummaryDigest {
                    summary: content,
                    ..SummaryDigest::default()
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> ChatSummarizer {
        ChatSummarizer::new(
            "sk-test".to_string(),
            server.uri(),
            "gpt-4o-mini".to_string(),
            1200,
            0.3,
        )
        .unwrap()
    }

    fn chat_reply(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        })
    }

    #[tokio::test]
    async fn structured_reply_parses_into_a_digest() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "temperature": 0.3,
                "max_tokens": 1200
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(
                r#"{"summary":"S","bullets":["a","b"],"next_steps":["x"],"tone":"calm"}"#,
            )))
            .expect(1)
            .mount(&server)
            .await;

        let digest = client(&server).summarize("some transcript").await.unwrap();
        assert_eq!(digest.summary, "S");
        assert_eq!(digest.bullets, vec!["a", "b"]);
        assert_eq!(digest.next_steps, vec!["x"]);
        assert_eq!(digest.tone, "calm");
    }

    #[tokio::test]
    async fn unknown_digest_fields_are_tolerated() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(
                r#"{"summary":"S","entities":{"names":["Ann"]}}"#,
            )))
            .mount(&server)
            .await;

        let digest = client(&server).summarize("some transcript").await.unwrap();
        assert_eq!(digest.summary, "S");
        assert!(digest.bullets.is_empty());
    }

    #[tokio::test]
    async fn prose_reply_degrades_to_raw_summary() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(
                "Here is your summary: the caller wants a meeting.",
            )))
            .mount(&server)
            .await;

        let digest = client(&server).summarize("some transcript").await.unwrap();
        assert_eq!(
            digest.summary,
            "Here is your summary: the caller wants a meeting."
        );
        assert!(digest.bullets.is_empty());
        assert!(digest.next_steps.is_empty());
    }

    #[tokio::test]
    async fn api_error_surfaces_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let err = client(&server).summarize("some transcript").await.unwrap_err();
        assert!(err.to_string().contains("429"));
    }
}
