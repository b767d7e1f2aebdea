// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Voxbrief bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Voxbrief configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VoxbriefConfig {
    /// Bot-level toggles and limits.
    #[serde(default)]
    pub bot: BotConfig,

    /// HTTP ingress bind settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Telegram Bot API settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Audio transcription provider settings.
    #[serde(default)]
    pub transcription: TranscriptionConfig,

    /// Transcript summarization provider settings.
    #[serde(default)]
    pub summarization: SummarizationConfig,

    /// Asynchronous dispatch (queue publish) settings.
    #[serde(default)]
    pub queue: QueueConfig,

    /// Key-value store settings for idempotency marks and rate counters.
    #[serde(default)]
    pub store: StoreConfig,

    /// Per-principal rate limiting settings.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Idempotency mark lifetime settings.
    #[serde(default)]
    pub idempotency: IdempotencyConfig,

    /// User-facing message and heading text (localization surface).
    #[serde(default)]
    pub messages: MessagesConfig,
}

/// Bot-level toggles and limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Kill switch: when false the webhook acknowledges updates and drops them.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Shared secret expected in the webhook's secret-token header.
    /// `None` disables the header check.
    #[serde(default)]
    pub secret_token: Option<String>,

    /// Maximum accepted audio duration in seconds; longer clips get a direct
    /// "too long" notice and are never processed.
    #[serde(default = "default_max_audio_duration_secs")]
    pub max_audio_duration_secs: u32,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            secret_token: None,
            max_audio_duration_secs: default_max_audio_duration_secs(),
            log_level: default_log_level(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_max_audio_duration_secs() -> u32 {
    600
}

fn default_log_level() -> String {
    "info".to_string()
}

/// HTTP ingress bind settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Telegram Bot API settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. Required for `voxbrief serve`.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Bot API base URL, overridable for self-hosted API servers and tests.
    #[serde(default = "default_telegram_api_base_url")]
    pub api_base_url: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            api_base_url: default_telegram_api_base_url(),
        }
    }
}

fn default_telegram_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

/// Audio transcription provider settings (OpenAI-style API).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TranscriptionConfig {
    /// Provider API key. Required for `voxbrief serve`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Provider base URL, overridable for compatible providers and tests.
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Transcription model identifier.
    #[serde(default = "default_transcription_model")]
    pub model: String,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            model: default_transcription_model(),
        }
    }
}

fn default_openai_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_transcription_model() -> String {
    "gpt-4o-mini-transcribe".to_string()
}

/// Transcript summarization provider settings (OpenAI-style chat API).
///
/// Shares the transcription provider's key and base URL.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SummarizationConfig {
    /// Summarization model identifier.
    #[serde(default = "default_summarization_model")]
    pub model: String,

    /// Maximum tokens to generate per digest.
    #[serde(default = "default_summary_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature for digest generation.
    #[serde(default = "default_summary_temperature")]
    pub temperature: f64,
}

impl Default for SummarizationConfig {
    fn default() -> Self {
        Self {
            model: default_summarization_model(),
            max_tokens: default_summary_max_tokens(),
            temperature: default_summary_temperature(),
        }
    }
}

fn default_summarization_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_summary_max_tokens() -> u32 {
    1200
}

fn default_summary_temperature() -> f64 {
    0.3
}

/// Asynchronous dispatch settings (QStash-style publish endpoint).
///
/// Disabled by default: the designed fallback is inline processing in the
/// webhook invocation, not an error path.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QueueConfig {
    /// Enable asynchronous dispatch.
    #[serde(default)]
    pub enabled: bool,

    /// Bearer token for the publish endpoint.
    #[serde(default)]
    pub token: Option<String>,

    /// Publish endpoint base; the URL-encoded target is appended as a path
    /// segment.
    #[serde(default = "default_publish_url")]
    pub publish_url: String,

    /// Public URL of this bot's job callback (`POST /jobs/process`).
    #[serde(default)]
    pub target_url: Option<String>,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            token: None,
            publish_url: default_publish_url(),
            target_url: None,
        }
    }
}

fn default_publish_url() -> String {
    "https://qstash.upstash.io/v2/publish".to_string()
}

/// Key-value store settings (Upstash-style Redis REST API).
///
/// When `rest_url` is unset the bot runs on a single-instance in-memory
/// store: idempotency and rate limiting still work, but are not shared
/// across horizontally scaled instances.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// REST endpoint of the store. `None` selects the in-memory store.
    #[serde(default)]
    pub rest_url: Option<String>,

    /// Bearer token for the REST endpoint.
    #[serde(default)]
    pub token: Option<String>,
}

/// Per-principal fixed-window rate limiting.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RateLimitConfig {
    /// Requests allowed per window.
    #[serde(default = "default_rate_limit")]
    pub limit: u32,

    /// Window length in seconds.
    #[serde(default = "default_rate_window_secs")]
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            limit: default_rate_limit(),
            window_secs: default_rate_window_secs(),
        }
    }
}

fn default_rate_limit() -> u32 {
    10
}

fn default_rate_window_secs() -> u64 {
    3600
}

/// Idempotency mark lifetime.
///
/// The mark is a cache, not a permanent ledger: re-delivery after expiry is
/// tolerated (at-least-once delivery).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IdempotencyConfig {
    /// Mark TTL in seconds.
    #[serde(default = "default_idempotency_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for IdempotencyConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_idempotency_ttl_secs(),
        }
    }
}

fn default_idempotency_ttl_secs() -> u64 {
    86400
}

/// User-facing message and heading text.
///
/// The wording is localization; the reply structure is fixed by the digest
/// flattening rules.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MessagesConfig {
    /// Best-effort acknowledgment sent before inline fallback processing.
    #[serde(default = "default_msg_ack")]
    pub ack: String,

    /// Notice sent when the sender exceeds the rate limit.
    #[serde(default = "default_msg_rate_limited")]
    pub rate_limited: String,

    /// Notice for clips over the duration cap. `{duration}` and `{max}`
    /// placeholders are substituted with seconds.
    #[serde(default = "default_msg_too_long")]
    pub too_long: String,

    /// Stage failure notice: audio download.
    #[serde(default = "default_msg_download_failed")]
    pub download_failed: String,

    /// Stage failure notice: transcription.
    #[serde(default = "default_msg_transcribe_failed")]
    pub transcribe_failed: String,

    /// Stage failure notice: summarization.
    #[serde(default = "default_msg_summarize_failed")]
    pub summarize_failed: String,

    /// Notice for audio in which no speech was recognized.
    #[serde(default = "default_msg_empty_transcript")]
    pub empty_transcript: String,

    /// Catch-all notice for unexpected pipeline errors.
    #[serde(default = "default_msg_generic_error")]
    pub generic_error: String,

    /// Heading for the one-line summary section.
    #[serde(default = "default_heading_subject")]
    pub subject_heading: String,

    /// Heading for the bullet list section.
    #[serde(default = "default_heading_bullets")]
    pub bullets_heading: String,

    /// Heading for the next-steps section.
    #[serde(default = "default_heading_next_steps")]
    pub next_steps_heading: String,
}

impl MessagesConfig {
    /// Renders the "too long" notice for a concrete clip.
    pub fn too_long_text(&self, duration: u32, max: u32) -> String {
        self.too_long
            .replace("{duration}", &duration.to_string())
            .replace("{max}", &max.to_string())
    }
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            ack: default_msg_ack(),
            rate_limited: default_msg_rate_limited(),
            too_long: default_msg_too_long(),
            download_failed: default_msg_download_failed(),
            transcribe_failed: default_msg_transcribe_failed(),
            summarize_failed: default_msg_summarize_failed(),
            empty_transcript: default_msg_empty_transcript(),
            generic_error: default_msg_generic_error(),
            subject_heading: default_heading_subject(),
            bullets_heading: default_heading_bullets(),
            next_steps_heading: default_heading_next_steps(),
        }
    }
}

fn default_msg_ack() -> String {
    "Got it, transcribing...".to_string()
}

fn default_msg_rate_limited() -> String {
    "Rate limit exceeded. Please try again later.".to_string()
}

fn default_msg_too_long() -> String {
    "The audio is too long ({duration}s). The maximum is {max}s. Please split it into parts."
        .to_string()
}

fn default_msg_download_failed() -> String {
    "Could not fetch the audio file. Please try again later.".to_string()
}

fn default_msg_transcribe_failed() -> String {
    "Could not transcribe the audio. Please try again later.".to_string()
}

fn default_msg_summarize_failed() -> String {
    "Could not build a summary. Please try again later.".to_string()
}

fn default_msg_empty_transcript() -> String {
    "Could not recognize any speech in this audio.".to_string()
}

fn default_msg_generic_error() -> String {
    "Could not process the request. Please try again later.".to_string()
}

fn default_heading_subject() -> String {
    "What it's about".to_string()
}

fn default_heading_bullets() -> String {
    "Key points".to_string()
}

fn default_heading_next_steps() -> String {
    "Next steps".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_contract() {
        let config = VoxbriefConfig::default();
        assert!(config.bot.enabled);
        assert_eq!(config.bot.max_audio_duration_secs, 600);
        assert_eq!(config.rate_limit.limit, 10);
        assert_eq!(config.rate_limit.window_secs, 3600);
        assert_eq!(config.idempotency.ttl_secs, 86400);
        assert!(!config.queue.enabled);
        assert!(config.store.rest_url.is_none());
    }

    #[test]
    fn too_long_text_substitutes_placeholders() {
        let messages = MessagesConfig::default();
        let text = messages.too_long_text(700, 600);
        assert!(text.contains("700s"), "got: {text}");
        assert!(text.contains("600s"), "got: {text}");
    }
}
