// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `voxbrief serve` command implementation.
//!
//! Wires the configured adapters together and starts the webhook gateway:
//! Telegram client, OpenAI transcription and summarization, the key-value
//! store (REST or in-memory), the rate limiter, the queue dispatcher, and
//! the job pipeline.

use std::sync::Arc;

use tracing::{info, warn};
use voxbrief_config::model::VoxbriefConfig;
use voxbrief_core::{ChatApi, KeyValueStore, RetryPolicy, Summarizer, Transcriber, VoxbriefError};
use voxbrief_gateway::server::{GatewayState, ServerConfig, start_server};
use voxbrief_gateway::IngressSettings;
use voxbrief_jobs::{JobProcessor, ProcessorSettings};
use voxbrief_openai::{ChatSummarizer, WhisperClient};
use voxbrief_queue::Dispatcher;
use voxbrief_store::{MemoryStore, RateLimiter, RestKvStore};
use voxbrief_telegram::TelegramClient;

/// Runs the server until the process is terminated.
pub async fn run(config: VoxbriefConfig) -> Result<(), VoxbriefError> {
    init_tracing(&config.bot.log_level);

    let bot_token = config
        .telegram
        .bot_token
        .clone()
        .ok_or_else(|| VoxbriefError::Config("telegram.bot_token is required".to_string()))?;
    let api_key = config
        .transcription
        .api_key
        .clone()
        .ok_or_else(|| VoxbriefError::Config("transcription.api_key is required".to_string()))?;

    let chat: Arc<dyn ChatApi> = Arc::new(TelegramClient::new(
        config.telegram.api_base_url.clone(),
        bot_token,
    )?);

    let transcriber: Arc<dyn Transcriber> = Arc::new(WhisperClient::new(
        api_key.clone(),
        config.transcription.base_url.clone(),
        config.transcription.model.clone(),
    )?);

    let summarizer: Arc<dyn Summarizer> = Arc::new(ChatSummarizer::new(
        api_key,
        config.transcription.base_url.clone(),
        config.summarization.model.clone(),
        config.summarization.max_tokens,
        config.summarization.temperature,
    )?);

    let store: Arc<dyn KeyValueStore> = match (&config.store.rest_url, &config.store.token) {
        (Some(rest_url), Some(token)) => {
            info!("using REST key-value store");
            Arc::new(RestKvStore::new(rest_url.clone(), token.clone())?)
        }
        _ => {
            warn!("no REST store configured, idempotency and rate limits are per-instance");
            Arc::new(MemoryStore::new())
        }
    };

    let limiter = Arc::new(RateLimiter::new(
        store.clone(),
        i64::from(config.rate_limit.limit),
        config.rate_limit.window_secs,
    ));

    let dispatcher = Arc::new(Dispatcher::new(
        config.queue.enabled,
        config.queue.token.clone(),
        config.queue.publish_url.clone(),
        config.queue.target_url.clone(),
    )?);

    let processor = Arc::new(JobProcessor::new(
        chat.clone(),
        transcriber,
        summarizer,
        store.clone(),
        limiter.clone(),
        ProcessorSettings {
            messages: config.messages.clone(),
            idempotency_ttl_secs: config.idempotency.ttl_secs,
            retry: RetryPolicy::default(),
        },
    ));

    let state = GatewayState {
        processor,
        dispatcher,
        store,
        limiter,
        chat,
        settings: Arc::new(IngressSettings {
            enabled: config.bot.enabled,
            secret_token: config.bot.secret_token.clone(),
            max_audio_duration_secs: config.bot.max_audio_duration_secs,
        }),
        messages: Arc::new(config.messages.clone()),
        start_time: std::time::Instant::now(),
    };

    let server = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    start_server(&server, state).await
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` overrides the configured level when set.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("voxbrief={log_level},warn")));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
