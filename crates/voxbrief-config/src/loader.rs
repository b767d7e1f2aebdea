// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./voxbrief.toml` > `~/.config/voxbrief/voxbrief.toml`
//! > `/etc/voxbrief/voxbrief.toml` with environment variable overrides via the
//! `VOXBRIEF_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use tracing::debug;

use crate::model::VoxbriefConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/voxbrief/voxbrief.toml` (system-wide)
/// 3. `~/.config/voxbrief/voxbrief.toml` (user XDG config)
/// 4. `./voxbrief.toml` (local directory)
/// 5. `VOXBRIEF_*` environment variables
pub fn load_config() -> Result<VoxbriefConfig, figment::Error> {
    let user_path = dirs::config_dir()
        .map(|d| d.join("voxbrief/voxbrief.toml"))
        .unwrap_or_default();

    for path in [
        Path::new("/etc/voxbrief/voxbrief.toml"),
        user_path.as_path(),
        Path::new("voxbrief.toml"),
    ] {
        if path.is_file() {
            debug!(path = %path.display(), "merging config file");
        }
    }

    Figment::new()
        .merge(Serialized::defaults(VoxbriefConfig::default()))
        .merge(Toml::file("/etc/voxbrief/voxbrief.toml"))
        .merge(Toml::file(user_path))
        .merge(Toml::file("voxbrief.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<VoxbriefConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VoxbriefConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<VoxbriefConfig, figment::Error> {
    debug!(path = %path.display(), "loading config file");
    Figment::new()
        .merge(Serialized::defaults(VoxbriefConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `VOXBRIEF_TELEGRAM_BOT_TOKEN` must map to
/// `telegram.bot_token`, not `telegram.bot.token`.
fn env_provider() -> Env {
    const SECTIONS: &[&str] = &[
        "rate_limit",
        "bot",
        "server",
        "telegram",
        "transcription",
        "summarization",
        "queue",
        "store",
        "idempotency",
        "messages",
    ];

    Env::prefixed("VOXBRIEF_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped,
        // e.g. VOXBRIEF_TELEGRAM_BOT_TOKEN -> "telegram_bot_token".
        // Only the leading section name becomes a dot: a substring replace
        // would corrupt keys like telegram_bot_token.
        let key_str = key.as_str();
        for section in SECTIONS {
            if let Some(rest) = key_str.strip_prefix(&format!("{section}_")) {
                return format!("{section}.{rest}").into();
            }
        }
        key_str.into()
    })
}
