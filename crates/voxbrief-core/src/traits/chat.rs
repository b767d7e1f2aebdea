// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat platform adapter trait (Telegram Bot API in production).

use async_trait::async_trait;

use crate::error::VoxbriefError;

/// Narrow contract against the chat platform: send a text reply and fetch a
/// binary blob by opaque reference.
///
/// File retrieval is two steps because the Bot API is: an opaque `file_id`
/// resolves to a short-lived `file_path`, which is then downloadable.
#[async_trait]
pub trait ChatApi: Send + Sync + 'static {
    /// Sends a plain-text message to a chat.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), VoxbriefError>;

    /// Resolves an opaque file reference to a retrievable file path.
    async fn resolve_file(&self, file_id: &str) -> Result<String, VoxbriefError>;

    /// Downloads the blob behind a resolved file path.
    async fn download_file(&self, file_path: &str) -> Result<Vec<u8>, VoxbriefError>;
}
