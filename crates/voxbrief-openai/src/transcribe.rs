// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Audio transcription via the OpenAI `/v1/audio/transcriptions` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use voxbrief_core::{Transcriber, VoxbriefError};

/// Timeout for a transcription call. Long voice notes take a while.
const TRANSCRIBE_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: String,
}

/// Transcription client for the OpenAI audio API.
#[derive(Debug, Clone)]
pub struct WhisperClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl WhisperClient {
    /// Creates a new transcription client.
    ///
    /// # Arguments
    /// * `api_key` - OpenAI API key
    /// * `base_url` - API base URL (e.g., "https://api.openai.com")
    /// * `model` - Transcription model identifier
    pub fn new(api_key: String, base_url: String, model: String) -> Result<Self, VoxbriefError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let mut auth = reqwest::header::HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| VoxbriefError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(TRANSCRIBE_TIMEOUT)
            .build()
            .map_err(|e| VoxbriefError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }
}

#[async_trait]
impl Transcriber for WhisperClient {
    async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String, VoxbriefError> {
        let size = audio.len();
        let form = reqwest::multipart::Form::new()
            .text("model", self.model.clone())
            .part(
                "file",
                reqwest::multipart::Part::bytes(audio).file_name(file_name.to_string()),
            );

        let response = self
            .client
            .post(format!("{}/v1/audio/transcriptions", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| VoxbriefError::Provider {
                message: format!("transcription request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VoxbriefError::Provider {
                message: format!("transcription returned status {status}: {body}"),
                source: None,
            });
        }

        let parsed: TranscriptionResponse =
            response.json().await.map_err(|e| VoxbriefError::Provider {
                message: format!("transcription response was not valid JSON: {e}"),
                source: Some(Box::new(e)),
            })?;

        debug!(size, chars = parsed.text.len(), "transcribed audio");
        Ok(parsed.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> WhisperClient {
        WhisperClient::new(
            "sk-test".to_string(),
            server.uri(),
            "gpt-4o-mini-transcribe".to_string(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn transcribe_returns_the_text_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/audio/transcriptions"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "text": "hello from a voice note"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client(&server)
            .transcribe(vec![1, 2, 3], "voice.oga")
            .await
            .unwrap();
        assert_eq!(text, "hello from a voice note");
    }

    #[tokio::test]
    async fn missing_text_field_reads_as_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let text = client(&server)
            .transcribe(vec![1, 2, 3], "voice.oga")
            .await
            .unwrap();
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn api_error_surfaces_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/audio/transcriptions"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string(r#"{"error":"invalid api key"}"#),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .transcribe(vec![1, 2, 3], "voice.oga")
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("401"));
        assert!(message.contains("invalid api key"));
    }
}
