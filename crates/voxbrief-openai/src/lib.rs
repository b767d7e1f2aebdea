// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI API clients for the Voxbrief bot.
//!
//! [`WhisperClient`] posts voice note bytes to the audio transcription
//! endpoint; [`ChatSummarizer`] turns a transcript into a structured
//! [`SummaryDigest`] via chat completions, degrading to a plain-text summary
//! when the model does not return valid JSON.
//!
//! [`SummaryDigest`]: voxbrief_core::SummaryDigest

mod summarize;
mod transcribe;

pub use summarize::ChatSummarizer;
pub use transcribe::WhisperClient;
