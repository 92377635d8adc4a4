// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! DNS server configuration: upstreams, bootstrap servers, and mode flags.
//!
//! Every list in this record is order-insensitive: [`DnsConfig::canonicalize`]
//! sorts all three upstream-like lists, so reordering any of them does not
//! change [`DnsConfig::equals`].

use serde::{Deserialize, Serialize};

/// DNS server configuration as reported by (and sent to) an appliance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DnsConfig {
    /// Upstream DNS servers used to resolve non-filtered queries.
    #[serde(default)]
    pub upstream_dns: Vec<String>,
    /// Bootstrap DNS servers used to resolve upstream server hostnames.
    #[serde(default)]
    pub bootstrap_dns: Vec<String>,
    /// Upstream servers used to resolve PTR queries for private IP ranges.
    #[serde(default)]
    pub local_ptr_upstreams: Vec<String>,
    /// Whether DNSSEC validation is enabled.
    #[serde(default)]
    pub dnssec_enabled: bool,
    /// Ratio of upstream servers to query in parallel ("fastest address" mode indicator).
    #[serde(default)]
    pub fastest_addr: bool,
    /// EDNS client subnet support.
    #[serde(default)]
    pub edns_cs_enabled: bool,
    /// DNS response cache size in bytes.
    #[serde(default)]
    pub cache_size: u32,
}

impl DnsConfig {
    /// Sort every order-insensitive list so equal configurations compare equal
    /// regardless of upstream ordering.
    pub fn canonicalize(&mut self) {
        self.upstream_dns.sort();
        self.bootstrap_dns.sort();
        self.local_ptr_upstreams.sort();
    }

    /// Compare two configs after canonicalizing both sides.
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
#[path = "dns_tests.rs"]
mod dns_tests;
