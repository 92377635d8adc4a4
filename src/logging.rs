// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Logging initialization.
//!
//! Respects `RUST_LOG` if set, otherwise falls back to
//! [`crate::constants::DEFAULT_LOG_FILTER`]. Respects
//! [`crate::constants::LOG_FORMAT_ENV`] (`json` or `text`) for output format.

use tracing::info;

use crate::constants::{DEFAULT_LOG_FILTER, LOG_FORMAT_ENV};

/// Install the global tracing subscriber.
///
/// `format_override` takes precedence over [`LOG_FORMAT_ENV`] when set
/// (e.g. from a `--log-format` CLI flag).
pub fn init(format_override: Option<&str>) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    let log_format = format_override.map(str::to_string).unwrap_or_else(|| {
        std::env::var(LOG_FORMAT_ENV).unwrap_or_else(|_| "text".to_string())
    });

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }

    info!("starting adguardhome-sync reconciliation daemon");
}
