// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the appliance sync daemon.

// === API Constants ===

/// Default API path appended to an instance's base URL when none is configured.
pub const DEFAULT_API_PATH: &str = "/control";

/// Default per-request timeout applied to every appliance HTTP call.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// === Version Guard ===

/// Minimum appliance version this crate knows how to reconcile against.
///
/// Compared using dotted-numeric semantics (see [`crate::reconciler::version`]),
/// not lexicographically.
pub const MIN_SUPPORTED_VERSION: &str = "v0.107.0";

// === Scheduler ===

/// Environment variable holding the path to the YAML configuration file.
pub const CONFIG_PATH_ENV: &str = "SYNC_CONFIG";

/// Default configuration file path when neither `--config` nor `SYNC_CONFIG` is set.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Environment variable prefix for credential overrides, e.g. `SYNC_ORIGIN_PASSWORD`.
pub const ENV_OVERRIDE_PREFIX: &str = "SYNC_";

// === Logging ===

/// Environment variable selecting the log output format (`text` or `json`).
pub const LOG_FORMAT_ENV: &str = "RUST_LOG_FORMAT";

/// Default log level filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

// === Retry / Backoff ===

/// HTTP retry initial interval (50ms).
pub const HTTP_INITIAL_INTERVAL_MILLIS: u64 = 50;

/// HTTP retry maximum interval (10 seconds).
pub const HTTP_MAX_INTERVAL_SECS: u64 = 10;

/// HTTP retry maximum elapsed time (2 minutes).
pub const HTTP_MAX_ELAPSED_TIME_SECS: u64 = 120;

/// Backoff multiplier (exponential growth factor).
pub const BACKOFF_MULTIPLIER: f64 = 2.0;

/// Randomization factor applied to retry intervals to avoid thundering herd (+/-10%).
pub const RANDOMIZATION_FACTOR: f64 = 0.1;
