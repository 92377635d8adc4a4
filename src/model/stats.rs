// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Statistics retention configuration.

use serde::{Deserialize, Serialize};

/// Statistics retention settings.
#[derive(Debug, Clone, Default, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Retention interval, in hours.
    #[serde(default)]
    pub interval: f64,
}

impl StatsConfig {
    /// Field-wise equality.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        (self.interval - other.interval).abs() < f64::EPSILON
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod stats_tests;
