// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Instance status, as returned by the appliance's `status` endpoint.

use serde::{Deserialize, Serialize};

use super::protection::Protection;

/// Observational and gating information about one appliance instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Status {
    /// Protection toggles reported alongside status.
    #[serde(flatten)]
    pub protection: Protection,
    /// DNS listener addresses.
    #[serde(default)]
    pub dns_addresses: Vec<String>,
    /// DNS listener port.
    #[serde(default)]
    pub dns_port: u16,
    /// HTTP control API port.
    #[serde(default)]
    pub http_port: u16,
    /// Whether a DHCP server is available on this instance.
    #[serde(default)]
    pub dhcp_available: bool,
    /// Whether the instance is currently running.
    #[serde(default)]
    pub running: bool,
    /// Appliance version string, e.g. `"v0.107.34"`.
    #[serde(default)]
    pub version: String,
    /// UI language code.
    #[serde(default)]
    pub language: String,
}
