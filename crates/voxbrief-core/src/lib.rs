// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Voxbrief voice-note bot.
//!
//! This crate provides the foundational trait definitions, error types, and
//! job types used throughout the Voxbrief workspace. The HTTP clients and the
//! job pipeline all speak in terms of the traits defined here.

pub mod error;
pub mod retry;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::VoxbriefError;
pub use retry::RetryPolicy;
pub use traits::{ChatApi, KeyValueStore, StoreResult, Summarizer, Transcriber};
pub use types::{
    Headings, JobPayload, ProcessingResult, SkipReason, Stage, SummaryDigest,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voxbrief_error_has_all_variants() {
        // Verify all 6 error variants exist and render their message.
        let config = VoxbriefError::Config("test".into());
        assert_eq!(config.to_string(), "configuration error: test");

        let chat = VoxbriefError::Chat {
            message: "test".into(),
            source: None,
        };
        assert_eq!(chat.to_string(), "chat error: test");

        let provider = VoxbriefError::Provider {
            message: "test".into(),
            source: Some(Box::new(std::io::Error::other("test"))),
        };
        assert_eq!(provider.to_string(), "provider error: test");

        let store = VoxbriefError::Store {
            message: "test".into(),
        };
        assert_eq!(store.to_string(), "store error: test");

        let queue = VoxbriefError::Queue {
            message: "test".into(),
        };
        assert_eq!(queue.to_string(), "queue error: test");

        let internal = VoxbriefError::Internal("test".into());
        assert_eq!(internal.to_string(), "internal error: test");
    }

    #[test]
    fn stage_display_is_snake_case() {
        assert_eq!(Stage::RateLimit.to_string(), "rate_limit");
        assert_eq!(Stage::Download.to_string(), "download");
        assert_eq!(Stage::Transcribe.to_string(), "transcribe");
        assert_eq!(Stage::Summarize.to_string(), "summarize");
        assert_eq!(Stage::Deliver.to_string(), "deliver");
    }

    #[test]
    fn all_adapter_traits_are_exported() {
        // If any trait module is missing or broken, this won't compile.
        fn _assert_chat<T: ChatApi>() {}
        fn _assert_transcriber<T: Transcriber>() {}
        fn _assert_summarizer<T: Summarizer>() {}
        fn _assert_store<T: KeyValueStore>() {}
    }
}
