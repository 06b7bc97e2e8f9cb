// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Service entry point.
//!
//! Configuration is read from the environment:
//! - `BIND_ADDR`: listen address (default `0.0.0.0:8080`)
//! - `MAX_REQUESTS_PER_WINDOW`: submissions allowed per client per window (default 5)
//! - `RATE_LIMIT_WINDOW_SECS`: window length in seconds (default 60)
//! - `MAX_TRACKED_KEYS`: tracked-client high-water mark before a purge (default 10000)
//! - `BREVO_API_KEY`: delivery API key; without it submissions are rejected
//! - `BREVO_API_URL`: delivery endpoint (default `https://api.brevo.com/v3/smtp/email`)
//! - `CONTACT_EMAIL`: inbox that receives notifications
//! - `SENDER_NAME`: display name on outgoing notifications (default `Vantura Digital`)
//! - `SITE_URL`: public site origin, used for CORS and email assets
//! - `METRICS_ENABLED`: expose `/metrics` (default true)

use anyhow::Context;
use contact_gate::handlers::AppState;
use contact_gate::limiter::RateLimiter;
use contact_gate::mailer::{BrevoMailer, Mailer};
use contact_gate::metrics::Metrics;
use contact_gate::validator::SubmissionValidator;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = load_config();

    url::Url::parse(&config.email.site_url)
        .with_context(|| format!("invalid SITE_URL {:?}", config.email.site_url))?;

    info!(
        bind_addr = %config.bind_addr,
        max_per_window = config.rate_limit.max_per_window,
        window_secs = config.rate_limit.window_secs,
        delivery_configured = config.email.is_configured(),
        "Starting contact gateway"
    );

    let mailer: Option<Arc<dyn Mailer>> = match BrevoMailer::from_config(&config.email)? {
        Some(mailer) => Some(Arc::new(mailer)),
        None => {
            warn!("Delivery credentials missing; submissions will be rejected");
            None
        }
    };

    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState {
        limiter: RateLimiter::new(config.rate_limit.clone()),
        validator: SubmissionValidator::new(config.limits.clone()),
        mailer,
        metrics: Metrics::new()?,
        config,
    });

    let app = contact_gate::handlers::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!(addr = %bind_addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}

fn load_config() -> contact_gate::Config {
    contact_gate::Config {
        bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        rate_limit: contact_gate::config::RateLimitConfig {
            max_per_window: std::env::var("MAX_REQUESTS_PER_WINDOW")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            window_secs: std::env::var("RATE_LIMIT_WINDOW_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            max_tracked_keys: std::env::var("MAX_TRACKED_KEYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
        },
        email: contact_gate::config::EmailConfig {
            api_key: std::env::var("BREVO_API_KEY").ok().filter(|v| !v.is_empty()),
            contact_email: std::env::var("CONTACT_EMAIL").ok().filter(|v| !v.is_empty()),
            api_url: std::env::var("BREVO_API_URL")
                .unwrap_or_else(|_| "https://api.brevo.com/v3/smtp/email".to_string()),
            sender_name: std::env::var("SENDER_NAME")
                .unwrap_or_else(|_| "Vantura Digital".to_string()),
            site_url: std::env::var("SITE_URL")
                .unwrap_or_else(|_| "https://vanturadigital.co.nz".to_string()),
        },
        metrics: contact_gate::config::MetricsConfig {
            enabled: std::env::var("METRICS_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            ..Default::default()
        },
        ..Default::default()
    }
}
