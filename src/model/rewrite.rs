// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! DNS rewrite entries.
//!
//! Rewrite deltas have distinctive duplicate handling (see
//! [`crate::delta::rewrite_delta`]); this module only holds the entity and
//! its identity.

use serde::{Deserialize, Serialize};

/// A single `domain -> answer` DNS rewrite rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteEntry {
    /// The domain pattern being rewritten.
    pub domain: String,
    /// The answer to return for that domain.
    pub answer: String,
}

impl RewriteEntry {
    /// Identity: `domain#answer`. Two rewrite entries with the same domain
    /// but different answers are distinct entries, not an update of one another.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}#{}", self.domain, self.answer)
    }
}

#[cfg(test)]
#[path = "rewrite_tests.rs"]
mod rewrite_tests;
