// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! In-memory mailer double that captures outbound notifications.

use async_trait::async_trait;
use contact_gate::mailer::{Mailer, MailerError, OutboundEmail};
use parking_lot::Mutex;
use std::sync::Arc;

/// Captures every notification instead of delivering it.
///
/// Clones share the same capture buffer, so a clone handed to the server
/// can be inspected from the test afterwards.
#[derive(Clone, Default)]
pub struct MockMailer {
    sent: Arc<Mutex<Vec<OutboundEmail>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications captured so far.
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }

    /// Make every subsequent send fail like a provider rejection.
    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock() = fail;
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError> {
        if *self.should_fail.lock() {
            return Err(MailerError::Rejected {
                status: 503,
                body: "mock delivery failure".to_string(),
            });
        }
        self.sent.lock().push(email.clone());
        Ok(())
    }
}
