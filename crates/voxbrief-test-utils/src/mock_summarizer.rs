// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock summarization client with scripted results.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use voxbrief_core::{Summarizer, SummaryDigest, VoxbriefError};

/// A mock summarizer that pops scripted results from a FIFO queue.
///
/// When the queue is empty, a minimal digest built from the transcript is
/// returned.
pub struct MockSummarizer {
    results: Arc<Mutex<VecDeque<Result<SummaryDigest, VoxbriefError>>>>,
    calls: AtomicUsize,
}

impl MockSummarizer {
    pub fn new() -> Self {
        Self {
            results: Arc::new(Mutex::new(VecDeque::new())),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock pre-loaded with the given results.
    pub fn with_results(results: Vec<Result<SummaryDigest, VoxbriefError>>) -> Self {
        Self {
            results: Arc::new(Mutex::new(VecDeque::from(results))),
            calls: AtomicUsize::new(0),
        }
    }

    /// Queue a result for the next `summarize` call.
    pub async fn script(&self, result: Result<SummaryDigest, VoxbriefError>) {
        self.results.lock().await.push_back(result);
    }

    /// Number of `summarize` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, transcript: &str) -> Result<SummaryDigest, VoxbriefError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.results.lock().await.pop_front().unwrap_or_else(|| {
            Ok(SummaryDigest {
                summary: format!("summary of: {transcript}"),
                ..SummaryDigest::default()
            })
        })
    }
}
