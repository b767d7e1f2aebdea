// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Summarization adapter trait (transcript in, structured digest out).

use async_trait::async_trait;

use crate::error::VoxbriefError;
use crate::types::SummaryDigest;

/// Condenses a transcript into a structured [`SummaryDigest`].
#[async_trait]
pub trait Summarizer: Send + Sync + 'static {
    /// Summarizes the transcript.
    ///
    /// Implementations must degrade gracefully when the model output is not
    /// valid digest JSON (raw text becomes the `summary` field) rather than
    /// failing the job.
    async fn summarize(&self, transcript: &str) -> Result<SummaryDigest, VoxbriefError>;
}
