// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Query log retention and anonymization configuration.

use serde::{Deserialize, Serialize};

/// Query logging settings.
#[derive(Debug, Clone, Default, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryLogConfig {
    /// Whether query logging is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// Whether client IPs are anonymized before being written to the log.
    #[serde(default)]
    pub anonymize_client_ip: bool,
    /// Retention interval, in hours. `0` means "never expire".
    #[serde(default)]
    pub interval: f64,
}

impl QueryLogConfig {
    /// Field-wise equality.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        self.enabled == other.enabled
            && self.anonymize_client_ip == other.anonymize_client_ip
            && (self.interval - other.interval).abs() < f64::EPSILON
    }
}

#[cfg(test)]
#[path = "query_log_tests.rs"]
mod query_log_tests;
