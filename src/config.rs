// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Configuration loading: YAML file, with environment variable overrides
//! for credentials that operators would rather not commit to a config file.
//!
//! Fields cover origin/replica/replicas/cron/runOnStart/features/api plus
//! this crate's own `--config` CLI flag, with environment-variable
//! overrides for credentials following the same pattern used elsewhere in
//! this crate for other runtime tunables.

use std::path::Path;

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};

use crate::constants::ENV_OVERRIDE_PREFIX;
use crate::model::{unique_replicas, InstanceDescriptor};
use crate::reconciler::FeatureGate;

/// The appliance's own status-UI configuration block (`port`, credentials,
/// `dark_mode`). This crate's reconciler never reads it — the status UI is
/// out of scope — but it is accepted so that a config file shared with the
/// upstream tool parses here without modification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    /// Port the status UI would bind to.
    #[serde(default)]
    pub port: u16,
    /// Status UI basic-auth username.
    #[serde(default)]
    pub username: Option<String>,
    /// Status UI basic-auth password.
    #[serde(default)]
    pub password: Option<String>,
    /// Status UI dark-mode preference.
    #[serde(default)]
    pub dark_mode: bool,
}

/// Top-level configuration consumed by the reconciler: which instances to
/// reconcile, which subsystems to touch, and when to run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// The authoritative instance.
    pub origin: InstanceDescriptor,
    /// A single replica, for the common one-replica case.
    #[serde(default)]
    pub replica: Option<InstanceDescriptor>,
    /// Additional replicas.
    #[serde(default)]
    pub replicas: Vec<InstanceDescriptor>,
    /// Cron expression the scheduler evaluates; opaque to the reconciler itself.
    #[serde(default)]
    pub cron: String,
    /// Whether to run one pass immediately at startup, before the first cron tick.
    #[serde(default)]
    pub run_on_start: bool,
    /// Per-subsystem feature gates.
    #[serde(default)]
    pub features: FeatureGate,
    /// Status-UI configuration, accepted for file compatibility and otherwise unused.
    #[serde(default)]
    pub api: ApiConfig,
}

impl Config {
    /// Load configuration from a YAML file, then apply environment variable
    /// overrides for credential fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse as
    /// valid configuration YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let mut config: Config = serde_yaml::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// `origin` and every configured replica, deduplicated by identity.
    ///
    /// `replica` and `replicas` are merged into one set before deduplication.
    #[must_use]
    pub fn unique_replicas(&self) -> Vec<InstanceDescriptor> {
        let mut all = self.replicas.clone();
        if let Some(replica) = &self.replica {
            all.push(replica.clone());
        }
        unique_replicas(&all)
    }

    /// Override `origin`/`replica` credentials from environment variables,
    /// e.g. `SYNC_ORIGIN_USERNAME`, `SYNC_ORIGIN_PASSWORD`,
    /// `SYNC_REPLICA_USERNAME`, `SYNC_REPLICA_PASSWORD`. Unset variables
    /// leave the corresponding config-file value untouched.
    fn apply_env_overrides(&mut self) {
        override_credentials(&mut self.origin, "ORIGIN");
        if let Some(replica) = &mut self.replica {
            override_credentials(replica, "REPLICA");
        }
    }
}

fn override_credentials(instance: &mut InstanceDescriptor, label: &str) {
    if let Ok(username) = std::env::var(format!("{ENV_OVERRIDE_PREFIX}{label}_USERNAME")) {
        instance.username = Some(username);
    }
    if let Ok(password) = std::env::var(format!("{ENV_OVERRIDE_PREFIX}{label}_PASSWORD")) {
        instance.password = Some(password);
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
