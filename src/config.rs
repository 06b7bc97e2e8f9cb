// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the contact gate service.
//!
//! Defaults mirror the limits enforced by the site frontend, so a bare
//! deployment behaves exactly like the form it guards.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the contact gate service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Field length limits
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Outbound email configuration
    #[serde(default)]
    pub email: EmailConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Rate limiting configuration for the submission endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum submissions per window per client (default: 5)
    #[serde(default = "default_max_per_window")]
    pub max_per_window: u32,

    /// Window length in seconds (default: 60)
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// Tracked-key count above which expired records are swept (default: 10000)
    #[serde(default = "default_max_tracked_keys")]
    pub max_tracked_keys: usize,
}

/// Maximum accepted field lengths, in characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum name length (default: 100)
    #[serde(default = "default_max_name_chars")]
    pub max_name_chars: usize,

    /// Maximum email length (default: 254)
    #[serde(default = "default_max_email_chars")]
    pub max_email_chars: usize,

    /// Maximum company length (default: 200)
    #[serde(default = "default_max_company_chars")]
    pub max_company_chars: usize,

    /// Maximum message length (default: 5000)
    #[serde(default = "default_max_message_chars")]
    pub max_message_chars: usize,
}

/// Outbound email configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Brevo API key; delivery is disabled when unset
    #[serde(default)]
    pub api_key: Option<String>,

    /// Address that receives notifications and appears as sender
    #[serde(default)]
    pub contact_email: Option<String>,

    /// Delivery endpoint (default: Brevo transactional email API)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Display name used for sender and recipient
    #[serde(default = "default_sender_name")]
    pub sender_name: String,

    /// Public site origin, used in notification links and CORS
    #[serde(default = "default_site_url")]
    pub site_url: String,
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus metrics endpoint (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Metrics endpoint path (default: /metrics)
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_max_per_window() -> u32 {
    5
}

fn default_window_secs() -> u64 {
    60
}

fn default_max_tracked_keys() -> usize {
    10_000
}

fn default_max_name_chars() -> usize {
    100
}

fn default_max_email_chars() -> usize {
    254
}

fn default_max_company_chars() -> usize {
    200
}

fn default_max_message_chars() -> usize {
    5_000
}

fn default_api_url() -> String {
    "https://api.brevo.com/v3/smtp/email".to_string()
}

fn default_sender_name() -> String {
    "Vantura Digital".to_string()
}

fn default_site_url() -> String {
    "https://vanturadigital.co.nz".to_string()
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            rate_limit: RateLimitConfig::default(),
            limits: LimitsConfig::default(),
            email: EmailConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_per_window: default_max_per_window(),
            window_secs: default_window_secs(),
            max_tracked_keys: default_max_tracked_keys(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_name_chars: default_max_name_chars(),
            max_email_chars: default_max_email_chars(),
            max_company_chars: default_max_company_chars(),
            max_message_chars: default_max_message_chars(),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            contact_email: None,
            api_url: default_api_url(),
            sender_name: default_sender_name(),
            site_url: default_site_url(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: default_metrics_path(),
        }
    }
}

impl RateLimitConfig {
    /// Get the rate window duration
    pub fn window_duration(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

impl EmailConfig {
    /// Whether both delivery credentials are present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.contact_email.is_some()
    }
}
