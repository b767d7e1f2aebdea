// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the job pipeline using mock adapters.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use voxbrief_config::model::MessagesConfig;
use voxbrief_core::{
    JobPayload, KeyValueStore, ProcessingResult, RetryPolicy, SkipReason, Stage, StoreResult,
    SummaryDigest, VoxbriefError,
};
use voxbrief_jobs::{JobProcessor, ProcessorSettings};
use voxbrief_store::{MemoryStore, RateLimiter};
use voxbrief_test_utils::{MockChat, MockSummarizer, MockTranscriber};

struct Fixture {
    chat: Arc<MockChat>,
    transcriber: Arc<MockTranscriber>,
    summarizer: Arc<MockSummarizer>,
    store: Arc<MemoryStore>,
    processor: JobProcessor,
}

fn fixture_with_limit(limit: i64) -> Fixture {
    let chat = Arc::new(MockChat::new());
    let transcriber = Arc::new(MockTranscriber::new());
    let summarizer = Arc::new(MockSummarizer::new());
    let store = Arc::new(MemoryStore::new());
    let limiter = Arc::new(RateLimiter::new(store.clone(), limit, 3600));

    let processor = JobProcessor::new(
        chat.clone(),
        transcriber.clone(),
        summarizer.clone(),
        store.clone(),
        limiter,
        ProcessorSettings::default(),
    );

    Fixture {
        chat,
        transcriber,
        summarizer,
        store,
        processor,
    }
}

fn fixture() -> Fixture {
    fixture_with_limit(10)
}

fn payload() -> JobPayload {
    JobPayload {
        chat_id: 1,
        message_id: 100,
        file_id: "abc".to_string(),
        duration: 30,
        user_id: Some(7),
    }
}

fn provider_error(message: &str) -> VoxbriefError {
    VoxbriefError::Provider {
        message: message.to_string(),
        source: None,
    }
}

#[tokio::test]
async fn invalid_payload_is_skipped_without_any_calls() {
    let f = fixture();
    let mut invalid = payload();
    invalid.file_id = String::new();

    let result = f.processor.process(&invalid).await;

    assert_eq!(result, ProcessingResult::Skipped(SkipReason::Invalid));
    assert_eq!(f.chat.download_calls(), 0);
    assert_eq!(f.transcriber.calls(), 0);
    assert_eq!(f.summarizer.calls(), 0);
    assert!(f.chat.sent().await.is_empty());
}

#[tokio::test]
async fn marked_message_is_skipped_as_duplicate() {
    let f = fixture();
    let _ = f.store.set_with_ttl("processed:1:100", "1", 86400).await;

    let result = f.processor.process(&payload()).await;

    assert_eq!(result, ProcessingResult::Skipped(SkipReason::Duplicate));
    assert_eq!(f.chat.download_calls(), 0);
    assert_eq!(f.transcriber.calls(), 0);
    assert!(f.chat.sent().await.is_empty());
}

#[tokio::test]
async fn successful_run_delivers_summary_and_marks_processed() {
    let f = fixture();
    f.summarizer
        .script(Ok(SummaryDigest {
            summary: "S".to_string(),
            bullets: vec!["a".to_string(), "b".to_string()],
            next_steps: vec!["x".to_string()],
            tone: "calm".to_string(),
        }))
        .await;

    let result = f.processor.process(&payload()).await;

    assert_eq!(result, ProcessingResult::Succeeded);
    let sent = f.chat.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, 1);
    assert_eq!(
        sent[0].1,
        "What it's about: S\n\nKey points:\n- a\n- b\n\nNext steps: x"
    );
    assert!(matches!(
        f.store.exists("processed:1:100").await,
        StoreResult::Ok(true)
    ));

    // A redelivery of the same message is now a duplicate skip.
    let again = f.processor.process(&payload()).await;
    assert_eq!(again, ProcessingResult::Skipped(SkipReason::Duplicate));
    assert_eq!(f.chat.sent().await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn transcription_recovers_after_two_failures_with_backoff() {
    let f = fixture();
    f.transcriber.script(Err(provider_error("boom 1"))).await;
    f.transcriber.script(Err(provider_error("boom 2"))).await;
    f.transcriber
        .script(Ok("a perfectly fine transcript".to_string()))
        .await;

    let started = tokio::time::Instant::now();
    let result = f.processor.process(&payload()).await;

    // 1s after the first failure, 2s after the second.
    assert_eq!(started.elapsed(), Duration::from_secs(3));
    assert_eq!(result, ProcessingResult::Succeeded);
    assert_eq!(f.transcriber.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn transcription_exhaustion_notifies_once_and_stops() {
    let f = fixture();
    for n in 1..=3 {
        f.transcriber
            .script(Err(provider_error(&format!("boom {n}"))))
            .await;
    }

    let result = f.processor.process(&payload()).await;

    assert!(matches!(
        result,
        ProcessingResult::Failed {
            stage: Stage::Transcribe,
            ..
        }
    ));
    assert_eq!(f.transcriber.calls(), 3);
    assert_eq!(f.summarizer.calls(), 0);

    let sent = f.chat.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].1, MessagesConfig::default().transcribe_failed);
    assert!(matches!(
        f.store.exists("processed:1:100").await,
        StoreResult::Ok(false)
    ));
}

#[tokio::test(start_paused = true)]
async fn download_exhaustion_never_reaches_transcription() {
    let f = fixture();
    for _ in 0..3 {
        f.chat
            .script_download(Err(VoxbriefError::Chat {
                message: "file server down".to_string(),
                source: None,
            }))
            .await;
    }

    let result = f.processor.process(&payload()).await;

    assert!(matches!(
        result,
        ProcessingResult::Failed {
            stage: Stage::Download,
            ..
        }
    ));
    assert_eq!(f.chat.download_calls(), 3);
    assert_eq!(f.transcriber.calls(), 0);
    assert_eq!(
        f.chat.sent().await[0].1,
        MessagesConfig::default().download_failed
    );
}

#[tokio::test]
async fn empty_transcript_is_a_distinct_non_error_outcome() {
    let f = fixture();
    f.transcriber.script(Ok("   \n ".to_string())).await;

    let result = f.processor.process(&payload()).await;

    assert_eq!(result, ProcessingResult::EmptyTranscript);
    assert_eq!(f.summarizer.calls(), 0);
    assert_eq!(
        f.chat.sent().await[0].1,
        MessagesConfig::default().empty_transcript
    );
    assert!(matches!(
        f.store.exists("processed:1:100").await,
        StoreResult::Ok(false)
    ));
}

#[tokio::test]
async fn rate_limited_principal_gets_a_notice_and_no_processing() {
    let f = fixture_with_limit(1);

    let first = f.processor.process(&payload()).await;
    assert_eq!(first, ProcessingResult::Succeeded);

    let mut second = payload();
    second.message_id = 101;
    let result = f.processor.process(&second).await;

    assert!(matches!(
        result,
        ProcessingResult::Failed {
            stage: Stage::RateLimit,
            ..
        }
    ));
    assert_eq!(f.chat.download_calls(), 1);
    let sent = f.chat.sent().await;
    assert_eq!(sent.last().unwrap().1, MessagesConfig::default().rate_limited);
}

#[tokio::test]
async fn failed_delivery_does_not_mark_processed() {
    let f = fixture();
    f.chat
        .script_send(Err(VoxbriefError::Chat {
            message: "chat not found".to_string(),
            source: None,
        }))
        .await;

    let result = f.processor.process(&payload()).await;

    assert!(matches!(
        result,
        ProcessingResult::Failed {
            stage: Stage::Deliver,
            ..
        }
    ));
    assert!(matches!(
        f.store.exists("processed:1:100").await,
        StoreResult::Ok(false)
    ));

    // The generic notice was still attempted after the failed reply.
    let sent = f.chat.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].1, MessagesConfig::default().generic_error);
}

struct DownStore;

#[async_trait]
impl KeyValueStore for DownStore {
    async fn exists(&self, _key: &str) -> StoreResult<bool> {
        StoreResult::Unavailable
    }

    async fn set_with_ttl(&self, _key: &str, _value: &str, _ttl: u64) -> StoreResult<()> {
        StoreResult::Unavailable
    }

    async fn incr_with_ttl(&self, _key: &str, _ttl: u64) -> StoreResult<i64> {
        StoreResult::Unavailable
    }
}

#[tokio::test]
async fn unavailable_store_fails_open_and_still_processes() {
    let chat = Arc::new(MockChat::new());
    let transcriber = Arc::new(MockTranscriber::new());
    let summarizer = Arc::new(MockSummarizer::new());
    let store: Arc<dyn KeyValueStore> = Arc::new(DownStore);
    let limiter = Arc::new(RateLimiter::new(store.clone(), 10, 3600));

    let processor = JobProcessor::new(
        chat.clone(),
        transcriber,
        summarizer,
        store,
        limiter,
        ProcessorSettings::default(),
    );

    let result = processor.process(&payload()).await;

    assert_eq!(result, ProcessingResult::Succeeded);
    assert_eq!(chat.sent().await.len(), 1);
}
