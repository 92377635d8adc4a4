// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The allow/disallow/block access list, with its nil-vs-empty equality rule.

use serde::{Deserialize, Serialize};

/// Three disjoint, optional string collections controlling which clients
/// may query the appliance and which hosts it will ever resolve.
///
/// Each field is `Option<Vec<String>>` rather than `Vec<String>` because the
/// appliance distinguishes "this list was never configured" (`None`) from
/// "this list was configured empty" (`Some(vec![])`) — see
/// [`AccessList::equals`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessList {
    /// Clients allowed to query the appliance; absent means "no restriction configured".
    #[serde(default)]
    pub allowed_clients: Option<Vec<String>>,
    /// Clients explicitly denied.
    #[serde(default)]
    pub disallowed_clients: Option<Vec<String>>,
    /// Hosts that are always blocked regardless of filter lists.
    #[serde(default)]
    pub blocked_hosts: Option<Vec<String>>,
}

impl AccessList {
    /// Order-sensitive equality with a nil-safe comparison on each field:
    /// `None == None`, `None != Some(_)` even when the `Some` is empty, and
    /// two `Some` values compare elementwise in order.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        Self::field_equals(&self.allowed_clients, &other.allowed_clients)
            && Self::field_equals(&self.disallowed_clients, &other.disallowed_clients)
            && Self::field_equals(&self.blocked_hosts, &other.blocked_hosts)
    }

    fn field_equals(a: &Option<Vec<String>>, b: &Option<Vec<String>>) -> bool {
        match (a, b) {
            (None, None) => true,
            (None, Some(_)) | (Some(_), None) => false,
            (Some(a), Some(b)) => a == b,
        }
    }
}

#[cfg(test)]
#[path = "access_list_tests.rs"]
mod access_list_tests;
