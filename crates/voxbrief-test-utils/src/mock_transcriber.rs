// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock transcription client with scripted results.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use voxbrief_core::{Transcriber, VoxbriefError};

/// A mock transcriber that pops scripted results from a FIFO queue.
///
/// When the queue is empty, a default transcript is returned.
pub struct MockTranscriber {
    results: Arc<Mutex<VecDeque<Result<String, VoxbriefError>>>>,
    calls: AtomicUsize,
}

impl MockTranscriber {
    pub fn new() -> Self {
        Self {
            results: Arc::new(Mutex::new(VecDeque::new())),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock pre-loaded with the given results.
    pub fn with_results(results: Vec<Result<String, VoxbriefError>>) -> Self {
        Self {
            results: Arc::new(Mutex::new(VecDeque::from(results))),
            calls: AtomicUsize::new(0),
        }
    }

    /// Queue a result for the next `transcribe` call.
    pub async fn script(&self, result: Result<String, VoxbriefError>) {
        self.results.lock().await.push_back(result);
    }

    /// Number of `transcribe` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, _audio: Vec<u8>, _file_name: &str) -> Result<String, VoxbriefError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.results
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok("mock transcript".to_string()))
    }
}
