// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Outbound delivery of rendered notifications.
//!
//! The [`Mailer`] trait is the seam between the submission handler and the
//! delivery provider. Production uses [`BrevoMailer`], which posts to the
//! Brevo transactional email API; tests substitute an in-memory double.

use crate::config::EmailConfig;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Errors raised while handing a notification to the provider.
#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("delivery provider returned {status}")]
    Rejected { status: u16, body: String },

    #[error("delivery request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// A notification addressed and ready to send.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub reply_to_email: String,
    pub reply_to_name: String,
    pub subject: String,
    pub html: String,
}

/// Delivery seam for accepted submissions.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError>;
}

#[derive(Serialize)]
struct BrevoParty<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoMessage<'a> {
    sender: BrevoParty<'a>,
    to: Vec<BrevoParty<'a>>,
    reply_to: BrevoParty<'a>,
    subject: &'a str,
    html_content: &'a str,
}

/// Sends notifications through the Brevo `/v3/smtp/email` endpoint.
pub struct BrevoMailer {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    contact_email: String,
    sender_name: String,
}

impl BrevoMailer {
    /// Build a mailer from config, or `None` when credentials are absent.
    pub fn from_config(config: &EmailConfig) -> Result<Option<Self>, MailerError> {
        let (Some(api_key), Some(contact_email)) = (&config.api_key, &config.contact_email) else {
            return Ok(None);
        };

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;

        Ok(Some(Self {
            http,
            api_url: config.api_url.clone(),
            api_key: api_key.clone(),
            contact_email: contact_email.clone(),
            sender_name: config.sender_name.clone(),
        }))
    }
}

#[async_trait]
impl Mailer for BrevoMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError> {
        let message = BrevoMessage {
            sender: BrevoParty {
                name: &self.sender_name,
                email: &self.contact_email,
            },
            to: vec![BrevoParty {
                name: &self.sender_name,
                email: &self.contact_email,
            }],
            reply_to: BrevoParty {
                name: &email.reply_to_name,
                email: &email.reply_to_email,
            },
            subject: &email.subject,
            html_content: &email.html,
        };

        debug!(subject = %email.subject, "Dispatching notification email");

        let response = self
            .http
            .post(&self.api_url)
            .header("accept", "application/json")
            .header("api-key", &self.api_key)
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Delivery provider rejected the notification");
            return Err(MailerError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
