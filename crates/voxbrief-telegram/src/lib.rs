// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram Bot API client for the Voxbrief bot.
//!
//! A thin HTTP client over the Bot API methods the pipeline needs:
//! `sendMessage` for replies, `getFile` to resolve a file id to a server
//! path, and the file endpoint to download voice note bytes. The webhook
//! itself is handled by the gateway; this crate only speaks outbound.

mod client;

pub use client::TelegramClient;
