// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Voxbrief bot.

use thiserror::Error;

/// The primary error type used across all Voxbrief adapters and pipeline code.
///
/// Errors never cross the webhook boundary: the gateway always acknowledges
/// the source platform, and the job pipeline absorbs every error into either
/// a user-facing chat message or a logged skip.
#[derive(Debug, Error)]
pub enum VoxbriefError {
    /// Configuration errors (missing token, invalid value, type mismatch).
    #[error("configuration error: {0}")]
    Config(String),

    /// Chat platform errors (send failure, file resolution, download).
    #[error("chat error: {message}")]
    Chat {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Transcription/summarization provider errors (API failure, bad payload).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Key-value store transport errors. Callers treat these as
    /// [`StoreResult::Unavailable`](crate::traits::StoreResult) and fail open.
    #[error("store error: {message}")]
    Store { message: String },

    /// Queue publish transport errors. Mapped to a `NotAccepted` outcome,
    /// never surfaced to the webhook source.
    #[error("queue error: {message}")]
    Queue { message: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
