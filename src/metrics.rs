// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Prometheus counters for the submission pipeline.
//!
//! Counters live in an owned registry rather than the process-global one, so
//! every [`Metrics`] value renders only its own series.

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub received: IntCounter,
    pub accepted: IntCounter,
    pub rate_limited: IntCounter,
    pub spam_trapped: IntCounter,
    pub rejected: IntCounter,
    pub delivery_failures: IntCounter,
    pub submit_duration: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let received = IntCounter::with_opts(Opts::new(
            "submissions_received_total",
            "Submission requests received, before any checks",
        ))?;
        let accepted = IntCounter::with_opts(Opts::new(
            "submissions_accepted_total",
            "Submissions validated and forwarded for delivery",
        ))?;
        let rate_limited = IntCounter::with_opts(Opts::new(
            "submissions_rate_limited_total",
            "Submissions rejected by the rate limiter",
        ))?;
        let spam_trapped = IntCounter::with_opts(Opts::new(
            "submissions_spam_total",
            "Submissions silently dropped by the honeypot",
        ))?;
        let rejected = IntCounter::with_opts(Opts::new(
            "submissions_rejected_total",
            "Submissions rejected as malformed or invalid",
        ))?;
        let delivery_failures = IntCounter::with_opts(Opts::new(
            "email_delivery_failures_total",
            "Accepted submissions the delivery provider refused",
        ))?;
        let submit_duration = Histogram::with_opts(HistogramOpts::new(
            "submit_duration_seconds",
            "End-to-end handling time for accepted submissions",
        ))?;

        registry.register(Box::new(received.clone()))?;
        registry.register(Box::new(accepted.clone()))?;
        registry.register(Box::new(rate_limited.clone()))?;
        registry.register(Box::new(spam_trapped.clone()))?;
        registry.register(Box::new(rejected.clone()))?;
        registry.register(Box::new(delivery_failures.clone()))?;
        registry.register(Box::new(submit_duration.clone()))?;

        Ok(Self {
            registry,
            received,
            accepted,
            rate_limited,
            spam_trapped,
            rejected,
            delivery_failures,
            submit_duration,
        })
    }

    /// Render the registry in the Prometheus text exposition format.
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buffer) {
            tracing::error!(error = %e, "Failed to encode metrics");
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}
