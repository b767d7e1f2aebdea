// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Job, result, and summary types shared across the Voxbrief workspace.

use serde::{Deserialize, Serialize};
use strum::Display;

/// The unit of work: one voice/audio message to transcribe and summarize.
///
/// The same JSON schema travels through the queue publish endpoint and the
/// inline fallback path, so both invocation styles see identical payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPayload {
    /// Telegram chat to reply into.
    pub chat_id: i64,
    /// Message id, unique per chat. Forms the idempotency key with `chat_id`.
    pub message_id: i64,
    /// Opaque Telegram file reference for the audio blob.
    pub file_id: String,
    /// Audio duration in seconds as reported by the platform.
    #[serde(default)]
    pub duration: u32,
    /// Sender id; preferred rate-limit principal when present.
    #[serde(default)]
    pub user_id: Option<i64>,
}

impl JobPayload {
    /// A payload is valid iff chat, message, and file identifiers are present.
    ///
    /// Invalid payloads are rejected before any side effect.
    pub fn is_valid(&self) -> bool {
        self.chat_id != 0 && self.message_id != 0 && !self.file_id.is_empty()
    }

    /// Rate-limit principal: the sender when known, otherwise the chat.
    pub fn principal(&self) -> i64 {
        self.user_id.unwrap_or(self.chat_id)
    }

    /// Key of the idempotency mark for this message.
    pub fn idempotency_key(&self) -> String {
        format!("processed:{}:{}", self.chat_id, self.message_id)
    }
}

/// Why a job was dropped without producing a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SkipReason {
    /// Required identifiers missing; nothing was attempted.
    Invalid,
    /// An idempotency mark already exists for this message.
    Duplicate,
}

/// Pipeline stage names, used in results and structured log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    RateLimit,
    Download,
    Transcribe,
    Summarize,
    Deliver,
}

/// Outcome of running a [`JobPayload`] through the job processor.
///
/// The processor absorbs every error, so this is its only way of reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingResult {
    /// The summary reply was delivered.
    Succeeded,
    /// Dropped silently (logged) before any user-visible effect.
    Skipped(SkipReason),
    /// Transcription returned no speech. The user was notified; this is a
    /// recognized outcome, not a fault, and no idempotency mark is written.
    EmptyTranscript,
    /// A stage failed terminally for this invocation.
    Failed { stage: Stage, detail: String },
}

/// Localized heading text used when flattening a [`SummaryDigest`].
///
/// The heading wording is a configuration concern; the section structure is
/// the contract.
#[derive(Debug, Clone)]
pub struct Headings {
    pub subject: String,
    pub bullets: String,
    pub next_steps: String,
}

/// Structured digest produced by the summarization provider.
///
/// Deserialization is tolerant: every field defaults and unknown fields
/// (e.g. `entities`) are ignored, because the digest comes from model output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryDigest {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default)]
    pub next_steps: Vec<String>,
    #[serde(default)]
    pub tone: String,
}

impl SummaryDigest {
    /// Flattens the digest into the single human-readable reply message.
    ///
    /// Sections are joined by a blank line and included only if non-empty,
    /// in this order:
    /// 1. `"<subject>: <summary>"`
    /// 2. `"<bullets heading>:\n"` + one `"- "`-prefixed line per bullet
    /// 3. `"<next-steps heading>: "` + comma-joined list
    pub fn flatten(&self, headings: &Headings) -> String {
        let mut sections = Vec::new();

        if !self.summary.is_empty() {
            sections.push(format!("{}: {}", headings.subject, self.summary));
        }

        if !self.bullets.is_empty() {
            let items = self
                .bullets
                .iter()
                .map(|b| format!("- {b}"))
                .collect::<Vec<_>>()
                .join("\n");
            sections.push(format!("{}:\n{}", headings.bullets, items));
        }

        if !self.next_steps.is_empty() {
            sections.push(format!(
                "{}: {}",
                headings.next_steps,
                self.next_steps.join(", ")
            ));
        }

        sections.join("\n\n")
    }
}
