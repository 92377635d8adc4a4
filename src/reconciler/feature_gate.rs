// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Feature gates: one boolean per reconciled subsystem, with nested
//! sub-gates for DHCP and DNS.
//!
//! The reconciler consults this before loading origin data (to skip
//! unnecessary round trips) and again before each subsystem step.

use serde::{Deserialize, Serialize};

/// DHCP sub-gates. The top-level `dhcp` flag in [`FeatureGate`] does not
/// exist as a field of its own: DHCP reconciliation runs iff either
/// sub-gate is enabled, matching the upstream config's flattened shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DhcpGate {
    /// Reconcile the DHCP server configuration (interface, ranges, lease durations).
    #[serde(default)]
    pub server_config: bool,
    /// Reconcile DHCP static lease reservations.
    #[serde(default)]
    pub static_leases: bool,
}

impl DhcpGate {
    /// Whether any DHCP data needs to be loaded from the origin at all.
    #[must_use]
    pub fn any(self) -> bool {
        self.server_config || self.static_leases
    }
}

/// DNS sub-gates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsGate {
    /// Reconcile the DNS server configuration (upstreams, EDNS, cache).
    #[serde(default)]
    pub server_config: bool,
    /// Reconcile DNS rewrite entries.
    #[serde(default)]
    pub rewrites: bool,
    /// Reconcile the access list (allow/disallow/block).
    #[serde(default)]
    pub access_lists: bool,
}

impl DnsGate {
    /// Whether any DNS data needs to be loaded from the origin at all.
    #[must_use]
    pub fn any(self) -> bool {
        self.server_config || self.rewrites || self.access_lists
    }
}

/// The complete set of feature gates for one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureGate {
    /// DHCP sub-gates.
    #[serde(default)]
    pub dhcp: DhcpGate,
    /// DNS sub-gates.
    #[serde(default)]
    pub dns: DnsGate,
    /// Reconcile filter list subscriptions (both channels) and custom rules.
    #[serde(default)]
    pub filters: bool,
    /// Reconcile per-client policy records.
    #[serde(default)]
    pub client_settings: bool,
    /// Reconcile the blocked-services list.
    #[serde(default)]
    pub services: bool,
    /// Reconcile protection/parental/safe-search/safe-browsing toggles.
    #[serde(default)]
    pub general_settings: bool,
    /// Reconcile the statistics retention configuration.
    #[serde(default)]
    pub stats_config: bool,
    /// Reconcile the query log configuration.
    #[serde(default)]
    pub query_log_config: bool,
}

#[cfg(test)]
#[path = "feature_gate_tests.rs"]
mod feature_gate_tests;
