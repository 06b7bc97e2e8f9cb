// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Fixed-window rate limiter for contact form submissions.
//!
//! Tracks one counter per client key. A window opens on the first request
//! from a key and closes `window_secs` later; requests past the cap inside
//! an open window are rejected without touching the record. Expired records
//! are swept inline once the table grows past a high-water mark, so the
//! limiter runs no background task.

use crate::config::RateLimitConfig;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Result of a rate limit check.
#[derive(Debug, Clone, Copy)]
pub enum RateDecision {
    /// Request is allowed
    Allowed {
        /// Remaining requests in the current window
        remaining: u32,
    },
    /// Request is rejected until the window expires
    Limited {
        /// Time until the window expires
        retry_after: Duration,
    },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed { .. })
    }
}

/// Per-key submission counter.
#[derive(Debug)]
struct WindowRecord {
    /// Submissions counted in the current window
    count: u32,
    /// Instant at which the window expires
    reset_at: Instant,
}

/// Thread-safe fixed-window rate limiter.
///
/// The whole read-modify-write sequence of a check runs under one lock
/// acquisition, so checks are atomic per process. State is in-memory only;
/// each instance enforces its own budget.
pub struct RateLimiter {
    /// Configuration
    config: RateLimitConfig,
    /// Per-key window records
    records: Mutex<HashMap<String, WindowRecord>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Check the rate limit for a client key, consuming one slot if allowed.
    pub async fn check_and_consume(&self, key: &str) -> RateDecision {
        self.check_and_consume_at(key, Instant::now()).await
    }

    /// Clock-explicit variant of [`check_and_consume`](Self::check_and_consume);
    /// tests pass a pinned `now` to exercise window boundaries.
    pub async fn check_and_consume_at(&self, key: &str, now: Instant) -> RateDecision {
        let mut records = self.records.lock().await;

        // Amortized sweep: only once the table has outgrown the high-water
        // mark, and only of records whose window has already expired.
        if records.len() > self.config.max_tracked_keys {
            let before = records.len();
            records.retain(|_, record| record.reset_at >= now);
            info!(
                purged = before - records.len(),
                tracked = records.len(),
                "Swept expired rate limit records"
            );
        }

        match records.get_mut(key) {
            // A window expires strictly after its reset instant, so a check
            // landing exactly on `reset_at` still counts against it.
            Some(record) if record.reset_at >= now => {
                if record.count < self.config.max_per_window {
                    record.count += 1;
                    let remaining = self.config.max_per_window - record.count;
                    debug!(key, remaining, "Submission allowed");
                    RateDecision::Allowed { remaining }
                } else {
                    // Rejection leaves the record untouched; the window
                    // neither extends nor consumes a slot.
                    let retry_after = record.reset_at.saturating_duration_since(now);
                    debug!(
                        key,
                        retry_after_secs = retry_after.as_secs(),
                        "Submission rate limited"
                    );
                    RateDecision::Limited { retry_after }
                }
            }
            _ => {
                // First request from this key, or its previous window lapsed.
                records.insert(
                    key.to_string(),
                    WindowRecord {
                        count: 1,
                        reset_at: now + self.config.window_duration(),
                    },
                );
                RateDecision::Allowed {
                    remaining: self.config.max_per_window.saturating_sub(1),
                }
            }
        }
    }

    /// Number of client keys currently tracked.
    pub async fn tracked_keys(&self) -> usize {
        self.records.lock().await.len()
    }
}
