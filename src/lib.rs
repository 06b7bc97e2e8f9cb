// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Rate-limiting submission gateway for the Vantura Digital contact form.
//!
//! The gateway sits between the public site and the Brevo email API. Each
//! submission passes a fixed-window rate limit keyed by client address, a
//! honeypot spam trap, field validation, and HTML escaping before it is
//! rendered into a notification and forwarded for delivery.

pub mod config;
pub mod email;
pub mod handlers;
pub mod limiter;
pub mod mailer;
pub mod metrics;
pub mod payload;
pub mod validator;

pub use config::Config;
pub use handlers::{router, AppState};
pub use limiter::{RateDecision, RateLimiter};
pub use mailer::{BrevoMailer, Mailer, MailerError, OutboundEmail};
pub use payload::SubmissionPayload;
pub use validator::{SubmissionValidator, ValidationResult};
