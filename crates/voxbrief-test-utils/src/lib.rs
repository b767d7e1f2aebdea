// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Voxbrief integration tests.
//!
//! Provides mock adapters for fast, deterministic, CI-runnable tests without
//! external services.
//!
//! # Components
//!
//! - [`MockChat`] - Mock chat client that captures sent messages
//! - [`MockTranscriber`] - Mock transcription client with scripted results
//! - [`MockSummarizer`] - Mock summarization client with scripted results

pub mod mock_chat;
pub mod mock_summarizer;
pub mod mock_transcriber;

pub use mock_chat::MockChat;
pub use mock_summarizer::MockSummarizer;
pub use mock_transcriber::MockTranscriber;
