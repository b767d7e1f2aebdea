// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `voxbrief config` command implementation.
//!
//! Prints the effective configuration as TOML with credential fields
//! redacted, so it is safe to paste into an issue or a support channel.

use voxbrief_config::model::VoxbriefConfig;

const REDACTED: &str = "[redacted]";

/// Prints the effective configuration with secrets redacted.
pub fn print_redacted(config: &VoxbriefConfig) {
    let mut shown = config.clone();

    redact(&mut shown.bot.secret_token);
    redact(&mut shown.telegram.bot_token);
    redact(&mut shown.transcription.api_key);
    redact(&mut shown.queue.token);
    redact(&mut shown.store.token);

    match toml::to_string_pretty(&shown) {
        Ok(rendered) => print!("{rendered}"),
        Err(e) => eprintln!("voxbrief: failed to render config: {e}"),
    }
}

fn redact(field: &mut Option<String>) {
    if field.is_some() {
        *field = Some(REDACTED.to_string());
    }
}
