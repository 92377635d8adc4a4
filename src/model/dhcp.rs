// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! DHCP server status/configuration and static lease reservations.

use serde::{Deserialize, Serialize};

/// IPv4 DHCP range and lease settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DhcpV4Config {
    /// Gateway IP advertised to DHCP clients.
    #[serde(default)]
    pub gateway_ip: String,
    /// Subnet mask.
    #[serde(default)]
    pub subnet_mask: String,
    /// Start of the address range to lease.
    #[serde(default)]
    pub range_start: String,
    /// End of the address range to lease.
    #[serde(default)]
    pub range_end: String,
    /// Lease duration in seconds.
    #[serde(default)]
    pub lease_duration: u32,
}

/// IPv6 DHCP range and lease settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DhcpV6Config {
    /// Start of the address range to lease.
    #[serde(default)]
    pub range_start: String,
    /// Lease duration in seconds.
    #[serde(default)]
    pub lease_duration: u32,
}

/// DHCP server status as reported by the appliance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DhcpStatus {
    /// Network interface the DHCP server listens on.
    #[serde(default)]
    pub interface_name: String,
    /// Whether the DHCP server is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// IPv4 range/lease configuration.
    #[serde(default)]
    pub v4: DhcpV4Config,
    /// IPv6 range/lease configuration.
    #[serde(default)]
    pub v6: DhcpV6Config,
    /// Static lease reservations currently configured.
    #[serde(default)]
    pub static_leases: Vec<DhcpStaticLease>,
}

impl DhcpStatus {
    /// Compare two statuses via canonical JSON, ignoring the `static_leases`
    /// list (which is reconciled separately by MAC-keyed delta, not by
    /// whole-record replacement).
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        self.interface_name == other.interface_name
            && self.enabled == other.enabled
            && self.v4 == other.v4
            && self.v6 == other.v6
    }

    /// Project this status down to the subset of fields the `set_dhcp_config`
    /// mutation endpoint accepts (no static leases, which have their own endpoints).
    #[must_use]
    pub fn to_config(&self) -> DhcpStatus {
        DhcpStatus {
            static_leases: Vec::new(),
            ..self.clone()
        }
    }
}

/// One DHCP static lease reservation. Identity is the MAC address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhcpStaticLease {
    /// Hardware (MAC) address; also this lease's identity.
    pub mac: String,
    /// Reserved IP address.
    #[serde(default)]
    pub ip: String,
    /// Hostname associated with the lease.
    #[serde(default)]
    pub hostname: String,
}

impl DhcpStaticLease {
    /// Identity: the MAC address.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.mac
    }
}

#[cfg(test)]
#[path = "dhcp_tests.rs"]
mod dhcp_tests;
