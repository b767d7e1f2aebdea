// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transcription adapter trait (audio in, text out).

use async_trait::async_trait;

use crate::error::VoxbriefError;

/// Converts an audio blob to text.
#[async_trait]
pub trait Transcriber: Send + Sync + 'static {
    /// Transcribes the given audio bytes.
    ///
    /// `file_name` hints the container format to the provider (e.g.
    /// `voice.ogg` for Telegram voice notes). An empty or whitespace-only
    /// transcript is a valid success; the pipeline treats it as "no speech
    /// recognized", not as an error.
    async fn transcribe(&self, audio: Vec<u8>, file_name: &str)
    -> Result<String, VoxbriefError>;
}
