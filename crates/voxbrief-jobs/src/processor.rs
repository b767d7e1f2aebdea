// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The job pipeline.
//!
//! Stages run strictly in order, each one a potential exit point. User-facing
//! notices are best-effort; the final summary reply is the only send whose
//! failure fails the job.

use std::sync::Arc;

use tracing::{error, info, warn};
use voxbrief_config::model::MessagesConfig;
use voxbrief_core::{
    ChatApi, Headings, JobPayload, KeyValueStore, ProcessingResult, RetryPolicy, SkipReason, Stage,
    StoreResult, Summarizer, Transcriber, VoxbriefError,
};
use voxbrief_store::RateLimiter;

/// File name reported to the transcription API for downloaded voice notes.
const VOICE_FILE_NAME: &str = "voice.ogg";

/// Pipeline tuning and user-facing text.
#[derive(Debug, Clone)]
pub struct ProcessorSettings {
    pub messages: MessagesConfig,
    pub idempotency_ttl_secs: u64,
    pub retry: RetryPolicy,
}

impl Default for ProcessorSettings {
    fn default() -> Self {
        Self {
            messages: MessagesConfig::default(),
            idempotency_ttl_secs: 86400,
            retry: RetryPolicy::default(),
        }
    }
}

/// Runs one voice note job through the full pipeline.
///
/// All adapters are injected, so tests substitute in-memory doubles and the
/// binary wires real clients. Holds no per-job state; one processor serves
/// concurrent jobs.
pub struct JobProcessor {
    chat: Arc<dyn ChatApi>,
    transcriber: Arc<dyn Transcriber>,
    summarizer: Arc<dyn Summarizer>,
    store: Arc<dyn KeyValueStore>,
    limiter: Arc<RateLimiter>,
    settings: ProcessorSettings,
    headings: Headings,
}

impl JobProcessor {
    pub fn new(
        chat: Arc<dyn ChatApi>,
        transcriber: Arc<dyn Transcriber>,
        summarizer: Arc<dyn Summarizer>,
        store: Arc<dyn KeyValueStore>,
        limiter: Arc<RateLimiter>,
        settings: ProcessorSettings,
    ) -> Self {
        let headings = Headings {
            subject: settings.messages.subject_heading.clone(),
            bullets: settings.messages.bullets_heading.clone(),
            next_steps: settings.messages.next_steps_heading.clone(),
        };
        Self {
            chat,
            transcriber,
            summarizer,
            store,
            limiter,
            settings,
            headings,
        }
    }

    /// Processes one job to completion.
    ///
    /// Never returns an error: any failure not already handled by a stage is
    /// logged, answered with a generic notice, and folded into the result.
    pub async fn process(&self, payload: &JobPayload) -> ProcessingResult {
        let result = match self.run(payload).await {
            Ok(result) => result,
            Err((stage, e)) => {
                error!(
                    chat_id = payload.chat_id,
                    message_id = payload.message_id,
                    user_id = ?payload.user_id,
                    stage = %stage,
                    error = %e,
                    "pipeline error"
                );
                self.notify(payload.chat_id, &self.settings.messages.generic_error)
                    .await;
                ProcessingResult::Failed {
                    stage,
                    detail: e.to_string(),
                }
            }
        };

        metrics::counter!("voxbrief_jobs_total", "outcome" => outcome_label(&result)).increment(1);
        result
    }

    async fn run(&self, payload: &JobPayload) -> Result<ProcessingResult, (Stage, VoxbriefError)> {
        let messages = &self.settings.messages;

        if !payload.is_valid() {
            info!(
                chat_id = payload.chat_id,
                message_id = payload.message_id,
                "payload missing required fields, skipping"
            );
            return Ok(ProcessingResult::Skipped(SkipReason::Invalid));
        }

        let mark_key = payload.idempotency_key();
        match self.store.exists(&mark_key).await {
            StoreResult::Ok(true) => {
                info!(
                    chat_id = payload.chat_id,
                    message_id = payload.message_id,
                    "message already processed, skipping"
                );
                return Ok(ProcessingResult::Skipped(SkipReason::Duplicate));
            }
            StoreResult::Ok(false) => {}
            // Not marked as far as we can tell; a duplicate send beats
            // dropping the job.
            StoreResult::Unavailable => {
                warn!(
                    chat_id = payload.chat_id,
                    message_id = payload.message_id,
                    "idempotency check unavailable, proceeding"
                );
            }
        }

        if !self.limiter.allow(payload.principal()).await.is_allowed() {
            info!(
                chat_id = payload.chat_id,
                user_id = ?payload.user_id,
                "rate limit exceeded"
            );
            self.notify(payload.chat_id, &messages.rate_limited).await;
            return Ok(ProcessingResult::Failed {
                stage: Stage::RateLimit,
                detail: "window limit reached".to_string(),
            });
        }

        // Resolve and fetch together, so a retry re-resolves a stale path.
        let audio = match self
            .settings
            .retry
            .run("download", |_| {
                let chat = Arc::clone(&self.chat);
                let file_id = payload.file_id.clone();
                async move {
                    let path = chat.resolve_file(&file_id).await?;
                    chat.download_file(&path).await
                }
            })
            .await
        {
            Ok(audio) => audio,
            Err(e) => {
                self.notify(payload.chat_id, &messages.download_failed).await;
                return Ok(ProcessingResult::Failed {
                    stage: Stage::Download,
                    detail: e.to_string(),
                });
            }
        };

        let transcript = match self
            .settings
            .retry
            .run("transcribe", |_| {
                let transcriber = Arc::clone(&self.transcriber);
                let audio = audio.clone();
                async move { transcriber.transcribe(audio, VOICE_FILE_NAME).await }
            })
            .await
        {
            Ok(transcript) => transcript,
            Err(e) => {
                self.notify(payload.chat_id, &messages.transcribe_failed)
                    .await;
                return Ok(ProcessingResult::Failed {
                    stage: Stage::Transcribe,
                    detail: e.to_string(),
                });
            }
        };

        // No speech is an expected outcome, not a fault.
        if transcript.trim().is_empty() {
            info!(
                chat_id = payload.chat_id,
                message_id = payload.message_id,
                "transcript is empty"
            );
            self.notify(payload.chat_id, &messages.empty_transcript).await;
            return Ok(ProcessingResult::EmptyTranscript);
        }

        let digest = match self
            .settings
            .retry
            .run("summarize", |_| {
                let summarizer = Arc::clone(&self.summarizer);
                let transcript = transcript.clone();
                async move { summarizer.summarize(&transcript).await }
            })
            .await
        {
            Ok(digest) => digest,
            Err(e) => {
                self.notify(payload.chat_id, &messages.summarize_failed)
                    .await;
                return Ok(ProcessingResult::Failed {
                    stage: Stage::Summarize,
                    detail: e.to_string(),
                });
            }
        };

        let reply = digest.flatten(&self.headings);
        self.chat
            .send_message(payload.chat_id, &reply)
            .await
            .map_err(|e| (Stage::Deliver, e))?;

        // Delivery already happened; a lost mark costs at most one duplicate
        // reply after a redelivery.
        if self
            .store
            .set_with_ttl(&mark_key, "1", self.settings.idempotency_ttl_secs)
            .await
            .is_unavailable()
        {
            warn!(
                chat_id = payload.chat_id,
                message_id = payload.message_id,
                "failed to record idempotency mark"
            );
        }

        info!(
            chat_id = payload.chat_id,
            message_id = payload.message_id,
            "job completed"
        );
        Ok(ProcessingResult::Succeeded)
    }

    /// Best-effort user notice. A failed notice is logged and swallowed.
    async fn notify(&self, chat_id: i64, text: &str) {
        if let Err(e) = self.chat.send_message(chat_id, text).await {
            warn!(chat_id, error = %e, "failed to send user notice");
        }
    }
}

fn outcome_label(result: &ProcessingResult) -> &'static str {
    match result {
        ProcessingResult::Succeeded => "succeeded",
        ProcessingResult::Skipped(_) => "skipped",
        ProcessingResult::EmptyTranscript => "empty_transcript",
        ProcessingResult::Failed { .. } => "failed",
    }
}
