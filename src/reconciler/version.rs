// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The version guard: refuses to reconcile against appliances older than
//! [`crate::constants::MIN_SUPPORTED_VERSION`].
//!
//! Versions are compared using dotted-numeric semantics, not lexicographic
//! ordering — `"v0.107.9"` is below `"v0.107.10"` even though the string
//! `"9"` sorts after `"1"`.

use crate::errors::ApplianceError;

/// Parse a version string like `"v0.107.34"` into its numeric components,
/// ignoring a leading `v` and any non-numeric suffix on the final component
/// (e.g. `"v0.107.0-beta"` parses as `[0, 107, 0]`).
fn components(version: &str) -> Vec<u64> {
    version
        .trim_start_matches(['v', 'V'])
        .split('.')
        .map(|part| {
            let numeric: String = part.chars().take_while(char::is_ascii_digit).collect();
            numeric.parse().unwrap_or(0)
        })
        .collect()
}

/// Compare two dotted-numeric version strings. Missing trailing components
/// are treated as zero, so `"v0.107"` equals `"v0.107.0"`.
#[must_use]
pub fn compare(a: &str, b: &str) -> std::cmp::Ordering {
    let ca = components(a);
    let cb = components(b);
    let len = ca.len().max(cb.len());
    for i in 0..len {
        let va = ca.get(i).copied().unwrap_or(0);
        let vb = cb.get(i).copied().unwrap_or(0);
        match va.cmp(&vb) {
            std::cmp::Ordering::Equal => continue,
            other => return other,
        }
    }
    std::cmp::Ordering::Equal
}

/// Reject `found` if it is below `minimum`, attributing the failure to `url`.
///
/// # Errors
///
/// Returns [`ApplianceError::VersionUnsupported`] if `found < minimum`.
pub fn check(url: &str, found: &str, minimum: &str) -> Result<(), ApplianceError> {
    if compare(found, minimum) == std::cmp::Ordering::Less {
        return Err(ApplianceError::VersionUnsupported {
            url: url.to_string(),
            found: found.to_string(),
            minimum: minimum.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod version_tests;
