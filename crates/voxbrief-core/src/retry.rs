// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reusable bounded-retry policy with exponential backoff.
//!
//! Applied uniformly to the download, transcribe, and summarize stages so the
//! retry behavior lives in exactly one place.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::VoxbriefError;

/// Bounded retry with exponential backoff between attempts.
///
/// The default matches the pipeline contract: 3 attempts with 1s and 2s
/// delays between them, and no delay after the final attempt.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Runs `op` until it succeeds or attempts are exhausted.
    ///
    /// The operation receives the 1-based attempt number. Each failure is
    /// logged with the operation name and attempt number; the last error is
    /// returned on exhaustion.
    pub async fn run<T, F, Fut>(&self, what: &str, mut op: F) -> Result<T, VoxbriefError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, VoxbriefError>>,
    {
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!(operation = what, attempt, error = %e, "attempt failed");
                    last_error = Some(e);
                    if attempt < self.max_attempts {
                        tokio::time::sleep(self.delay_for(attempt)).await;
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| VoxbriefError::Internal(format!("{what}: no attempts ran"))))
    }

    /// Delay after the given 1-based attempt: base, 2*base, 4*base, ...
    fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt - 1)
    }
}
