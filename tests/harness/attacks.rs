// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Abuse patterns for the submission gate.

/// Abuse pattern configuration.
#[derive(Debug, Clone)]
pub struct AttackConfig {
    /// Total number of submissions to send
    pub total_requests: usize,
    /// Number of distinct client addresses, used round-robin
    pub unique_clients: usize,
    /// Whether the hidden honeypot field is filled
    pub honeypot_filled: bool,
    /// Whether messages exceed the length bound
    pub oversized: bool,
    /// Whether to strip the forwarding header entirely
    pub strip_forwarding_header: bool,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            total_requests: 100,
            unique_clients: 1,
            honeypot_filled: false,
            oversized: false,
            strip_forwarding_header: false,
        }
    }
}

/// Predefined abuse patterns.
impl AttackConfig {
    /// One client hammering the form.
    pub fn form_flood() -> Self {
        Self {
            total_requests: 200,
            unique_clients: 1,
            ..Default::default()
        }
    }

    /// Many clients, a handful of submissions each.
    pub fn distributed_spray() -> Self {
        Self {
            total_requests: 700,
            unique_clients: 100,
            ..Default::default()
        }
    }

    /// Bots that fill every field, honeypot included.
    pub fn bot_wave() -> Self {
        Self {
            total_requests: 50,
            unique_clients: 10,
            honeypot_filled: true,
            ..Default::default()
        }
    }

    /// Oversized payload probing.
    pub fn oversize_probe() -> Self {
        Self {
            total_requests: 20,
            unique_clients: 5,
            oversized: true,
            ..Default::default()
        }
    }

    /// Clients that strip the forwarding header to dodge per-client limits.
    pub fn header_strippers() -> Self {
        Self {
            total_requests: 40,
            unique_clients: 1,
            strip_forwarding_header: true,
            ..Default::default()
        }
    }

    /// Number of submissions the gate should forward for this pattern.
    ///
    /// Honeypot and oversized traffic never reaches delivery. Everything
    /// else is capped at `max_per_window` per client bucket; stripping the
    /// forwarding header collapses all traffic into one bucket.
    pub fn expected_accepted(&self, max_per_window: u32) -> usize {
        if self.honeypot_filled || self.oversized {
            return 0;
        }
        let clients = if self.strip_forwarding_header {
            1
        } else {
            self.unique_clients
        };
        let max = max_per_window as usize;
        let base = self.total_requests / clients;
        let extra = self.total_requests % clients;
        extra * (base + 1).min(max) + (clients - extra) * base.min(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_accepted() {
        assert_eq!(AttackConfig::form_flood().expected_accepted(5), 5);
        assert_eq!(AttackConfig::distributed_spray().expected_accepted(5), 500);
        assert_eq!(AttackConfig::bot_wave().expected_accepted(5), 0);
        assert_eq!(AttackConfig::oversize_probe().expected_accepted(5), 0);
        assert_eq!(AttackConfig::header_strippers().expected_accepted(5), 5);
    }

    #[test]
    fn test_expected_accepted_with_uneven_split() {
        let config = AttackConfig {
            total_requests: 7,
            unique_clients: 3,
            ..Default::default()
        };
        // Clients receive 3, 2, 2 requests; all are under the cap.
        assert_eq!(config.expected_accepted(5), 7);
        // With a cap of 2 the three-request client loses one.
        assert_eq!(config.expected_accepted(2), 6);
    }
}
