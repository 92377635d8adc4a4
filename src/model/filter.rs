// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Filter list subscriptions and the filtering toggle/interval configuration.

use serde::{Deserialize, Serialize};

/// One filter list subscription. Identity is `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// The filter list's subscription URL; also its identity.
    pub url: String,
    /// Display name for the filter list.
    #[serde(default)]
    pub name: String,
    /// Whether the filter list is active.
    #[serde(default)]
    pub enabled: bool,
}

impl Filter {
    /// Identity of this filter: its URL.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.url
    }
}

/// The filtering engine's toggle, refresh interval, and custom rules blob.
///
/// Normal and whitelist filter lists are reconciled as two independent
/// channels (see [`crate::reconciler::worker`]); this record only carries
/// the scalar settings shared by both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteringConfig {
    /// Whether filtering is enabled at all.
    #[serde(default)]
    pub enabled: bool,
    /// Refresh interval in hours.
    #[serde(default)]
    pub interval: u32,
    /// User-authored custom filtering rules, one per line.
    #[serde(default)]
    pub user_rules: Vec<String>,
}

impl FilteringConfig {
    /// Compare the user rules blob as a single joined string, matching the
    /// appliance's treatment of it as one opaque text document.
    #[must_use]
    pub fn user_rules_equal(&self, other: &Self) -> bool {
        self.user_rules.join("\n") == other.user_rules.join("\n")
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod filter_tests;
