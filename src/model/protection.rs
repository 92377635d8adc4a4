// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The four orthogonal protection toggles.

use serde::{Deserialize, Serialize};

/// The composite protection state: protection, parental control, safe search,
/// and safe browsing, each independently toggleable.
///
/// Only `protection_enabled` is carried on the `status` response itself (see
/// [`super::status::Status`]); the other three are fetched from their own
/// endpoints and assembled into this record by the snapshot step so that
/// general-settings reconciliation can compare all four at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protection {
    /// Whether DNS filtering/protection is enabled at all.
    #[serde(default)]
    pub protection_enabled: bool,
    /// Whether parental control is enabled.
    #[serde(default)]
    pub parental_enabled: bool,
    /// Whether safe search is enabled.
    #[serde(default)]
    pub safe_search_enabled: bool,
    /// Whether safe browsing is enabled.
    #[serde(default)]
    pub safe_browsing_enabled: bool,
}

impl Protection {
    /// Field-wise equality; kept as a named method for symmetry with the
    /// other record types, which may use canonical-JSON comparison instead.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        self == other
    }
}

#[cfg(test)]
#[path = "protection_tests.rs"]
mod protection_tests;
