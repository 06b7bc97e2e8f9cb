// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP surface of the submission gateway.
//!
//! `POST /api/contact` runs the full gate: rate limit, configuration check,
//! body parse, honeypot, validation, then delivery. Checks run in that order
//! and the first failure decides the response.

use crate::config::Config;
use crate::email::render_notification;
use crate::limiter::{RateDecision, RateLimiter};
use crate::mailer::{Mailer, MailerError, OutboundEmail};
use crate::metrics::Metrics;
use crate::payload::SubmissionPayload;
use crate::validator::{SubmissionValidator, ValidationError, ValidationResult};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Limiter bucket shared by every request that arrives without a usable
/// client address.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Shared state for all handlers.
pub struct AppState {
    pub limiter: RateLimiter,
    pub validator: SubmissionValidator,
    pub mailer: Option<Arc<dyn Mailer>>,
    pub metrics: Metrics,
    pub config: Config,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// A gate check failed. The `Display` text is the response body verbatim.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Too many requests. Please try again later.")]
    RateLimited { retry_after_secs: u64 },

    #[error("Email service not configured")]
    Unconfigured,

    #[error("Invalid request body")]
    MalformedBody,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to send email")]
    Delivery(#[source] MailerError),
}

impl SubmitError {
    fn status(&self) -> StatusCode {
        match self {
            SubmitError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            SubmitError::Unconfigured => StatusCode::INTERNAL_SERVER_ERROR,
            SubmitError::MalformedBody | SubmitError::Validation(_) => StatusCode::BAD_REQUEST,
            SubmitError::Delivery(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        let mut response = (
            self.status(),
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response();
        if let SubmitError::RateLimited { retry_after_secs } = self {
            if let Ok(value) = retry_after_secs.to_string().parse::<HeaderValue>() {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

/// Derive the limiter key for a request.
///
/// Takes the first address in `X-Forwarded-For`, which is only as
/// trustworthy as the proxy that set it. Requests without a usable header
/// all land in the [`UNKNOWN_CLIENT`] bucket and throttle together.
pub fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|client| !client.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// Handle `POST /api/contact`.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SubmitResponse>, SubmitError> {
    let start = Instant::now();
    state.metrics.received.inc();

    let client = client_key(&headers);

    match state.limiter.check_and_consume(&client).await {
        RateDecision::Allowed { .. } => {}
        RateDecision::Limited { retry_after } => {
            state.metrics.rate_limited.inc();
            info!(client = %client, "Rate limit exceeded");
            return Err(SubmitError::RateLimited {
                retry_after_secs: retry_after.as_secs(),
            });
        }
    }

    let Some(mailer) = &state.mailer else {
        error!("Submission received but delivery credentials are not configured");
        return Err(SubmitError::Unconfigured);
    };

    let payload: SubmissionPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            state.metrics.rejected.inc();
            warn!(client = %client, error = %e, "Malformed submission body");
            return Err(SubmitError::MalformedBody);
        }
    };

    // Bots that fill the hidden field get a success response and nothing else.
    if !payload.honeypot.is_empty() {
        state.metrics.spam_trapped.inc();
        info!(client = %client, "Spam submission blocked via honeypot");
        return Ok(Json(SubmitResponse { success: true }));
    }

    if let ValidationResult::Invalid(e) = state.validator.validate(&payload) {
        state.metrics.rejected.inc();
        info!(client = %client, error = %e, "Submission failed validation");
        return Err(SubmitError::Validation(e));
    }

    let content = render_notification(&payload, Utc::now(), &state.config.email);
    let email = OutboundEmail {
        reply_to_email: payload.email.clone(),
        reply_to_name: payload.name.clone(),
        subject: content.subject,
        html: content.html,
    };

    if let Err(e) = mailer.send(&email).await {
        state.metrics.delivery_failures.inc();
        error!(client = %client, error = %e, "Failed to deliver notification");
        return Err(SubmitError::Delivery(e));
    }

    state.metrics.accepted.inc();
    state
        .metrics
        .submit_duration
        .observe(start.elapsed().as_secs_f64());
    info!(client = %client, "Submission accepted and forwarded");
    Ok(Json(SubmitResponse { success: true }))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "contact-gate".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> String {
    state.metrics.render()
}

fn cors_layer(site_url: &str) -> Option<CorsLayer> {
    let origin = site_url.trim_end_matches('/').parse::<HeaderValue>().ok()?;
    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]),
    )
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/api/contact", post(submit));

    if state.config.metrics.enabled {
        router = router.route(&state.config.metrics.path, get(metrics_handler));
    }

    if let Some(cors) = cors_layer(&state.config.email.site_url) {
        router = router.layer(cors);
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
