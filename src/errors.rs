// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for appliance communication and reconciliation.
//!
//! Errors are layered: [`ApplianceError`] covers everything that can go wrong
//! talking to a single appliance instance; [`ReconcileError`] adds the
//! replica/subsystem context the worker needs to report a pass's outcome.

use thiserror::Error;

/// Everything that can go wrong while talking to one appliance instance.
#[derive(Debug, Error)]
pub enum ApplianceError {
    /// Network-level failure: connection refused, DNS failure, timed out, etc.
    #[error("transport error talking to {url}: {source}")]
    Transport {
        /// The instance URL the request was sent to.
        url: String,
        /// Underlying transport failure.
        #[source]
        source: reqwest::Error,
    },

    /// The appliance rejected our credentials (HTTP 401/403).
    #[error("authentication failed for {url} (status {status})")]
    Auth {
        /// The instance URL.
        url: String,
        /// The HTTP status returned.
        status: u16,
    },

    /// The appliance has not completed first-time setup.
    ///
    /// Historically signalled by AdGuard Home returning HTTP 500 from
    /// `/control/status` before the install wizard has run.
    #[error("instance {url} requires first-time setup")]
    SetupNeeded {
        /// The instance URL.
        url: String,
    },

    /// The appliance reported a version below [`crate::constants::MIN_SUPPORTED_VERSION`].
    #[error("instance {url} reports version {found}, minimum supported is {minimum}")]
    VersionUnsupported {
        /// The instance URL.
        url: String,
        /// The version string the appliance reported.
        found: String,
        /// The minimum version this crate supports.
        minimum: String,
    },

    /// The appliance returned a response this crate could not interpret:
    /// malformed JSON, an unexpected shape, or an unrecognized status code.
    #[error("unexpected response from {url}: status {status}, body: {body}")]
    Protocol {
        /// The instance URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body, truncated for logging.
        body: String,
    },

    /// A JSON encode/decode failure that is not itself an unexpected-shape protocol error.
    #[error("failed to (de)serialize payload for {url}: {source}")]
    Codec {
        /// The instance URL.
        url: String,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

impl ApplianceError {
    /// Whether this error is worth retrying with backoff.
    ///
    /// Transport failures and `Protocol` errors carrying a 5xx/429 status are
    /// transient; auth failures, setup-needed, version mismatches, and 4xx
    /// protocol errors are not.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Protocol { status, .. } => {
                *status == 429 || (*status >= 500 && *status < 600)
            }
            Self::Auth { .. }
            | Self::SetupNeeded { .. }
            | Self::VersionUnsupported { .. }
            | Self::Codec { .. } => false,
        }
    }

    /// A short, stable classification string suitable for log fields and metrics labels.
    #[must_use]
    pub fn status_reason(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Auth { .. } => "auth",
            Self::SetupNeeded { .. } => "setup_needed",
            Self::VersionUnsupported { .. } => "version_unsupported",
            Self::Protocol { .. } => "protocol",
            Self::Codec { .. } => "codec",
        }
    }

    /// The instance URL this error occurred against.
    #[must_use]
    pub fn instance_url(&self) -> &str {
        match self {
            Self::Transport { url, .. }
            | Self::Auth { url, .. }
            | Self::SetupNeeded { url }
            | Self::VersionUnsupported { url, .. }
            | Self::Protocol { url, .. }
            | Self::Codec { url, .. } => url,
        }
    }
}

/// A single subsystem mutation failure attributed to a replica and subsystem name.
#[derive(Debug, Error)]
#[error("replica {replica}: {subsystem} reconciliation failed: {source}")]
pub struct SubsystemError {
    /// Identity (`url#api_path`) of the replica this failure occurred on.
    pub replica: String,
    /// Name of the subsystem being reconciled, e.g. `"rewrites"` or `"clients"`.
    pub subsystem: &'static str,
    /// The underlying appliance error.
    #[source]
    pub source: ApplianceError,
}

/// Top-level error produced while reconciling one replica or the whole pass.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The origin instance could not be snapshotted; the whole pass aborts.
    #[error("origin snapshot failed: {0}")]
    Origin(#[source] ApplianceError),

    /// A replica could not be brought to a ready state (status/setup/version check failed).
    #[error("replica {replica} not ready: {source}")]
    ReplicaNotReady {
        /// Identity of the replica.
        replica: String,
        /// Underlying appliance error.
        #[source]
        source: ApplianceError,
    },

    /// One or more subsystem mutations failed for a replica.
    #[error("replica {replica} had {} subsystem failure(s)", .errors.len())]
    Subsystem {
        /// Identity of the replica.
        replica: String,
        /// The individual subsystem failures that occurred.
        errors: Vec<SubsystemError>,
    },
}

impl ReconcileError {
    /// Whether this failure aborts the whole pass (as opposed to just one replica).
    #[must_use]
    pub fn aborts_pass(&self) -> bool {
        matches!(self, Self::Origin(_))
    }
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod errors_tests;
