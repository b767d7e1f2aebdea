// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as positive windows and the queue's required credentials.

use crate::diagnostic::ConfigError;
use crate::model::VoxbriefConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &VoxbriefConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.server.host.trim().is_empty() {
        errors.push(validation("server.host must not be empty"));
    } else {
        let host = config.server.host.trim();
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(validation(&format!(
                "server.host `{host}` is not a valid IP address or hostname"
            )));
        }
    }

    if config.bot.max_audio_duration_secs == 0 {
        errors.push(validation("bot.max_audio_duration_secs must be positive"));
    }

    if config.rate_limit.limit == 0 {
        errors.push(validation("rate_limit.limit must be positive"));
    }

    if config.rate_limit.window_secs == 0 {
        errors.push(validation("rate_limit.window_secs must be positive"));
    }

    if config.idempotency.ttl_secs == 0 {
        errors.push(validation("idempotency.ttl_secs must be positive"));
    }

    if !(0.0..=2.0).contains(&config.summarization.temperature) {
        errors.push(validation(&format!(
            "summarization.temperature must be between 0 and 2, got {}",
            config.summarization.temperature
        )));
    }

    // Enabled dispatch needs both a credential and a callback target;
    // without them publish would be a guaranteed no-op network error.
    if config.queue.enabled {
        if config.queue.token.is_none() {
            errors.push(validation("queue.enabled requires queue.token"));
        }
        if config.queue.target_url.is_none() {
            errors.push(validation("queue.enabled requires queue.target_url"));
        }
    }

    if config.store.rest_url.is_some() && config.store.token.is_none() {
        errors.push(validation("store.rest_url requires store.token"));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn validation(message: &str) -> ConfigError {
    ConfigError::Validation {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VoxbriefConfig;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&VoxbriefConfig::default()).is_ok());
    }

    #[test]
    fn zero_rate_limit_is_rejected() {
        let mut config = VoxbriefConfig::default();
        config.rate_limit.limit = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("rate_limit.limit")));
    }

    #[test]
    fn enabled_queue_requires_token_and_target() {
        let mut config = VoxbriefConfig::default();
        config.queue.enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn rest_store_requires_token() {
        let mut config = VoxbriefConfig::default();
        config.store.rest_url = Some("https://example.upstash.io".into());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("store.token")));
    }

    #[test]
    fn out_of_range_temperature_is_rejected() {
        let mut config = VoxbriefConfig::default();
        config.summarization.temperature = 3.5;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn collects_all_errors_instead_of_failing_fast() {
        let mut config = VoxbriefConfig::default();
        config.rate_limit.limit = 0;
        config.rate_limit.window_secs = 0;
        config.idempotency.ttl_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
