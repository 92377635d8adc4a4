// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Per-client policy records.

use serde::{Deserialize, Serialize};

/// A named client-specific policy override. Identity is `name`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// The client's display name; also its identity.
    pub name: String,
    /// IPs/CIDRs/MACs/ClientIDs identifying this client on the network.
    #[serde(default)]
    pub ids: Vec<String>,
    /// Arbitrary tags used for grouping clients in the UI.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Services blocked specifically for this client.
    #[serde(default)]
    pub blocked_services: Vec<String>,
    /// Per-client upstream DNS servers, overriding the global configuration.
    #[serde(default)]
    pub upstreams: Vec<String>,
    /// Per-client filtering toggle; `None` means "inherit global setting".
    #[serde(default)]
    pub filtering_enabled: Option<bool>,
    /// Per-client safe-search toggle.
    #[serde(default)]
    pub safe_search_enabled: Option<bool>,
    /// Per-client safe-browsing toggle.
    #[serde(default)]
    pub safe_browsing_enabled: Option<bool>,
    /// Per-client parental control toggle.
    #[serde(default)]
    pub parental_enabled: Option<bool>,
    /// Whether this client uses the global settings instead of its own.
    #[serde(default)]
    pub use_global_settings: bool,
}

impl Client {
    /// Identity: the client's name.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.name
    }

    /// Sort every order-insensitive collection on this record in place.
    pub fn canonicalize(&mut self) {
        self.ids.sort();
        self.tags.sort();
        self.blocked_services.sort();
        self.upstreams.sort();
    }

    /// Compare two clients after canonicalizing both sides.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        let mut a = self.clone();
        let mut b = other.clone();
        a.canonicalize();
        b.canonicalize();
        a == b
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod client_tests;
