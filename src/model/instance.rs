// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The origin/replica instance descriptor and its identity rules.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_API_PATH;

/// Connection details and policy for one appliance instance (origin or replica).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceDescriptor {
    /// Base URL of the instance, e.g. `https://adguard.example.com:3000`.
    pub url: String,
    /// API base path, e.g. `/control`. Defaults to [`DEFAULT_API_PATH`] when empty.
    #[serde(default)]
    pub api_path: String,
    /// Basic-auth username, if the instance requires authentication.
    #[serde(default)]
    pub username: Option<String>,
    /// Basic-auth password, if the instance requires authentication.
    #[serde(default)]
    pub password: Option<String>,
    /// Skip TLS certificate verification for this instance.
    #[serde(default)]
    pub insecure_skip_verify: bool,
    /// Run first-time setup automatically if the instance reports `SetupNeeded`.
    ///
    /// Only meaningful for replicas; ignored for the origin.
    #[serde(default)]
    pub auto_setup: bool,
}

impl InstanceDescriptor {
    /// The effective API path: `api_path` if set, otherwise [`DEFAULT_API_PATH`].
    #[must_use]
    pub fn effective_api_path(&self) -> &str {
        if self.api_path.is_empty() {
            DEFAULT_API_PATH
        } else {
            &self.api_path
        }
    }

    /// The identity used to deduplicate instances: `url#api_path`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}#{}", self.url, self.effective_api_path())
    }

    /// Whether this descriptor names a usable instance (non-empty URL).
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty()
    }
}

/// Deduplicate a list of replica descriptors by [`InstanceDescriptor::key`].
///
/// Entries with an empty URL are dropped. The first occurrence of a given
/// key wins; later duplicates are discarded. Order of the surviving entries
/// matches their first appearance in `replicas`.
#[must_use]
pub fn unique_replicas(replicas: &[InstanceDescriptor]) -> Vec<InstanceDescriptor> {
    let mut seen = std::collections::HashSet::new();
    let mut result = Vec::with_capacity(replicas.len());
    for replica in replicas {
        if !replica.is_configured() {
            continue;
        }
        if seen.insert(replica.key()) {
            result.push(replica.clone());
        }
    }
    result
}

#[cfg(test)]
#[path = "instance_tests.rs"]
mod instance_tests;
