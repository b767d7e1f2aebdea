// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the Voxbrief pipeline seams.
//!
//! Every external collaborator (chat platform, transcription, summarization,
//! key-value store) is consumed through an `#[async_trait]` trait so the
//! pipeline can be tested against deterministic in-memory substitutes.

pub mod chat;
pub mod store;
pub mod summarize;
pub mod transcribe;

pub use chat::ChatApi;
pub use store::{KeyValueStore, StoreResult};
pub use summarize::Summarizer;
pub use transcribe::Transcriber;
