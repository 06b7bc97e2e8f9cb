// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Submission validator.
//!
//! Checks run in a fixed order and stop at the first failure: required
//! fields, then length bounds, then email shape. Display strings are the
//! wire-facing messages and stay generic; the structured fields carry the
//! detail for logs.

use crate::config::LimitsConfig;
use crate::payload::SubmissionPayload;
use thiserror::Error;
use tracing::debug;

/// Validation error types.
#[derive(Debug, Error, Clone)]
pub enum ValidationError {
    /// One of the always-required fields is empty or missing.
    #[error("Name, email, and message are required")]
    MissingRequired { field: &'static str },

    /// A field exceeds its configured maximum length.
    #[error("Input exceeds maximum allowed length")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// The email address does not look deliverable.
    #[error("Invalid email address")]
    InvalidEmail,
}

/// Result of validation.
#[derive(Debug, Clone)]
pub enum ValidationResult {
    /// Submission is valid
    Valid,
    /// Submission is invalid
    Invalid(ValidationError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(e) => Some(e),
        }
    }
}

/// Contact form submission validator.
pub struct SubmissionValidator {
    limits: LimitsConfig,
}

impl SubmissionValidator {
    /// Create a new validator with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Validate a parsed submission.
    pub fn validate(&self, payload: &SubmissionPayload) -> ValidationResult {
        for (field, value) in [
            ("name", &payload.name),
            ("email", &payload.email),
            ("message", &payload.message),
        ] {
            if value.is_empty() {
                debug!(field, "Required field missing");
                return ValidationResult::Invalid(ValidationError::MissingRequired { field });
            }
        }

        let bounds = [
            ("name", payload.name.as_str(), self.limits.max_name_chars),
            ("email", payload.email.as_str(), self.limits.max_email_chars),
            (
                "message",
                payload.message.as_str(),
                self.limits.max_message_chars,
            ),
        ];
        for (field, value, max) in bounds {
            let actual = value.chars().count();
            if actual > max {
                debug!(field, max, actual, "Field exceeds maximum length");
                return ValidationResult::Invalid(ValidationError::FieldTooLong {
                    field,
                    max,
                    actual,
                });
            }
        }
        if let Some(company) = &payload.company {
            let actual = company.chars().count();
            if actual > self.limits.max_company_chars {
                debug!(
                    field = "company",
                    max = self.limits.max_company_chars,
                    actual,
                    "Field exceeds maximum length"
                );
                return ValidationResult::Invalid(ValidationError::FieldTooLong {
                    field: "company",
                    max: self.limits.max_company_chars,
                    actual,
                });
            }
        }

        if !is_plausible_email(&payload.email) {
            debug!("Email address failed shape check");
            return ValidationResult::Invalid(ValidationError::InvalidEmail);
        }

        ValidationResult::Valid
    }
}

/// Shape check for deliverable-looking addresses: exactly one `@`, no
/// whitespace, a non-empty local part, and a dotted domain. The delivery
/// provider is the final arbiter; this only screens obvious typos.
pub fn is_plausible_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() => has_interior_dot(domain),
        _ => false,
    }
}

/// A dot with at least one character on each side, anywhere in the domain.
fn has_interior_dot(domain: &str) -> bool {
    let len = domain.chars().count();
    len >= 3 && domain.chars().skip(1).take(len - 2).any(|c| c == '.')
}
