// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Telegram Bot API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use voxbrief_core::{ChatApi, VoxbriefError};

/// Timeout for Bot API method calls.
const API_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for voice note downloads, which can be several megabytes.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Response envelope shared by all Bot API methods.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct FileInfo {
    #[serde(default)]
    file_path: Option<String>,
}

/// Telegram Bot API client.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl TelegramClient {
    /// Creates a new Bot API client.
    ///
    /// # Arguments
    /// * `base_url` - API base URL (e.g., "https://api.telegram.org")
    /// * `token` - Bot token issued by BotFather
    pub fn new(base_url: String, token: String) -> Result<Self, VoxbriefError> {
        let client = reqwest::Client::builder()
            .timeout(API_TIMEOUT)
            .build()
            .map_err(|e| VoxbriefError::Chat {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.base_url, self.token)
    }

    /// Calls one Bot API method and unwraps the `{ok, result}` envelope.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        body: serde_json::Value,
    ) -> Result<T, VoxbriefError> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(&body)
            .send()
            .await
            .map_err(|e| VoxbriefError::Chat {
                message: format!("{method} request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        let envelope: ApiResponse<T> =
            response.json().await.map_err(|e| VoxbriefError::Chat {
                message: format!("{method} returned an unreadable body (status {status}): {e}"),
                source: Some(Box::new(e)),
            })?;

        if !envelope.ok {
            return Err(VoxbriefError::Chat {
                message: format!(
                    "{method} rejected (status {status}): {}",
                    envelope.description.unwrap_or_else(|| "no description".to_string())
                ),
                source: None,
            });
        }

        envelope.result.ok_or_else(|| VoxbriefError::Chat {
            message: format!("{method} returned ok without a result"),
            source: None,
        })
    }
}

#[async_trait]
impl ChatApi for TelegramClient {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), VoxbriefError> {
        let _: serde_json::Value = self
            .call(
                "sendMessage",
                serde_json::json!({ "chat_id": chat_id, "text": text }),
            )
            .await?;

        debug!(chat_id, length = text.len(), "sent message");
        Ok(())
    }

    async fn resolve_file(&self, file_id: &str) -> Result<String, VoxbriefError> {
        let info: FileInfo = self
            .call("getFile", serde_json::json!({ "file_id": file_id }))
            .await?;

        info.file_path.ok_or_else(|| VoxbriefError::Chat {
            message: format!("getFile returned no file_path for {file_id}"),
            source: None,
        })
    }

    async fn download_file(&self, file_path: &str) -> Result<Vec<u8>, VoxbriefError> {
        let url = format!("{}/file/bot{}/{file_path}", self.base_url, self.token);

        let response = self
            .client
            .get(&url)
            .timeout(DOWNLOAD_TIMEOUT)
            .send()
            .await
            .map_err(|e| VoxbriefError::Chat {
                message: format!("file download request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(VoxbriefError::Chat {
                message: format!("file download returned status {status}"),
                source: None,
            });
        }

        let bytes = response.bytes().await.map_err(|e| VoxbriefError::Chat {
            message: format!("file download body read failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        debug!(file_path, size = bytes.len(), "downloaded file");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> TelegramClient {
        TelegramClient::new(server.uri(), "123:ABC".to_string()).unwrap()
    }

    #[tokio::test]
    async fn send_message_posts_chat_id_and_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:ABC/sendMessage"))
            .and(body_json(serde_json::json!({
                "chat_id": 42,
                "text": "hello"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": { "message_id": 5 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        client(&server).send_message(42, "hello").await.unwrap();
    }

    #[tokio::test]
    async fn api_rejection_surfaces_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:ABC/sendMessage"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "ok": false,
                "description": "Bad Request: chat not found"
            })))
            .mount(&server)
            .await;

        let err = client(&server).send_message(42, "hello").await.unwrap_err();
        assert!(err.to_string().contains("chat not found"));
    }

    #[tokio::test]
    async fn resolve_file_returns_the_server_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:ABC/getFile"))
            .and(body_json(serde_json::json!({ "file_id": "voice-1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": { "file_id": "voice-1", "file_path": "voice/file_7.oga" }
            })))
            .mount(&server)
            .await;

        let path = client(&server).resolve_file("voice-1").await.unwrap();
        assert_eq!(path, "voice/file_7.oga");
    }

    #[tokio::test]
    async fn resolve_file_without_path_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:ABC/getFile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": { "file_id": "voice-1" }
            })))
            .mount(&server)
            .await;

        let err = client(&server).resolve_file("voice-1").await.unwrap_err();
        assert!(err.to_string().contains("no file_path"));
    }

    #[tokio::test]
    async fn download_file_returns_raw_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/file/bot123:ABC/voice/file_7.oga"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x4f, 0x67, 0x67]))
            .mount(&server)
            .await;

        let bytes = client(&server)
            .download_file("voice/file_7.oga")
            .await
            .unwrap();
        assert_eq!(bytes, vec![0x4f, 0x67, 0x67]);
    }

    #[tokio::test]
    async fn download_of_missing_file_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client(&server).download_file("voice/gone.oga").await.unwrap_err();
        assert!(err.to_string().contains("404"));
    }
}
