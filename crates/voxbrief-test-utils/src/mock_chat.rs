// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock chat client for deterministic testing.
//!
//! Captures every message sent through it and serves file resolution and
//! download from scripted queues, so pipeline tests can assert exactly what
//! the user would have received without any network.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use voxbrief_core::{ChatApi, VoxbriefError};

/// A mock chat client that records sent messages.
///
/// File resolution and download results pop from FIFO queues; when a queue
/// is empty a fixed default success is returned.
pub struct MockChat {
    sent: Arc<Mutex<Vec<(i64, String)>>>,
    resolve_results: Arc<Mutex<VecDeque<Result<String, VoxbriefError>>>>,
    download_results: Arc<Mutex<VecDeque<Result<Vec<u8>, VoxbriefError>>>>,
    send_results: Arc<Mutex<VecDeque<Result<(), VoxbriefError>>>>,
    download_calls: AtomicUsize,
}

impl MockChat {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            resolve_results: Arc::new(Mutex::new(VecDeque::new())),
            download_results: Arc::new(Mutex::new(VecDeque::new())),
            send_results: Arc::new(Mutex::new(VecDeque::new())),
            download_calls: AtomicUsize::new(0),
        }
    }

    /// Queue a result for the next `resolve_file` call.
    pub async fn script_resolve(&self, result: Result<String, VoxbriefError>) {
        self.resolve_results.lock().await.push_back(result);
    }

    /// Queue a result for the next `download_file` call.
    pub async fn script_download(&self, result: Result<Vec<u8>, VoxbriefError>) {
        self.download_results.lock().await.push_back(result);
    }

    /// Queue a result for the next `send_message` call.
    pub async fn script_send(&self, result: Result<(), VoxbriefError>) {
        self.send_results.lock().await.push_back(result);
    }

    /// All messages sent so far, as `(chat_id, text)` pairs.
    pub async fn sent(&self) -> Vec<(i64, String)> {
        self.sent.lock().await.clone()
    }

    /// Number of `download_file` calls made so far.
    pub fn download_calls(&self) -> usize {
        self.download_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockChat {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatApi for MockChat {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), VoxbriefError> {
        let result = self
            .send_results
            .lock()
            .await
            .pop_front()
            .unwrap_or(Ok(()));
        if result.is_ok() {
            self.sent.lock().await.push((chat_id, text.to_string()));
        }
        result
    }

    async fn resolve_file(&self, file_id: &str) -> Result<String, VoxbriefError> {
        self.resolve_results
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(format!("voice/{file_id}.oga")))
    }

    async fn download_file(&self, _file_path: &str) -> Result<Vec<u8>, VoxbriefError> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);
        self.download_results
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(vec![0x4f, 0x67, 0x67]))
    }
}
