// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Pass orchestration: one [`run_pass`] call acquires the origin snapshot,
//! then brings every replica into line with it, gated by [`FeatureGate`]
//! and guarded by the [`version`] check.
//!
//! Each gated subsystem is its own function rather than a method on a
//! shared receiver, since the origin snapshot and feature gate are threaded
//! through explicitly instead of being stored on `self`.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::appliance::ApplianceClient;
use crate::constants::MIN_SUPPORTED_VERSION;
use crate::delta::{client_delta, filter_delta, lease_delta, rewrite_delta};
use crate::errors::{ApplianceError, ReconcileError, SubsystemError};
use crate::model::{
    unique_replicas, AccessList, Client, DhcpStatus, DnsConfig, Filter, FilteringConfig,
    InstanceDescriptor, Protection, QueryLogConfig, RewriteEntry, StatsConfig, Status,
};

use super::feature_gate::FeatureGate;
use super::version;

/// Builds a concrete [`ApplianceClient`] for an instance descriptor.
///
/// Kept as a trait object factory (rather than a concrete constructor) so
/// tests can substitute [`crate::appliance::mock::MockClient`] without
/// touching the worker.
pub type ClientFactory =
    dyn Fn(&InstanceDescriptor) -> Result<Arc<dyn ApplianceClient>, ApplianceError> + Send + Sync;

/// The outcome of reconciling one replica.
#[derive(Debug)]
pub enum ReplicaOutcome {
    /// Every gated subsystem converged (or there was nothing to do).
    Ok,
    /// The replica never reached a ready state (status/setup/version check failed).
    NotReady(ApplianceError),
    /// The replica reached a ready state but one or more subsystems failed.
    Failed(Vec<SubsystemError>),
}

impl ReplicaOutcome {
    /// Whether this outcome represents full success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// The result of one reconciliation pass: replica identity (`url#api_path`) to outcome.
pub type PassReport = BTreeMap<String, ReplicaOutcome>;

/// A point-in-time read of every origin subsystem the feature gate requires.
///
/// Subsystems whose gate is disabled are left at their `Default`; the
/// reconciler never reads a disabled field, so a default value there is
/// inert, not a silent "treat as empty" behavior.
#[derive(Default)]
struct OriginSnapshot {
    status: Status,
    protection: Protection,
    rewrites: Vec<RewriteEntry>,
    services: Vec<String>,
    filtering: FilteringConfig,
    filters: Vec<Filter>,
    whitelist_filters: Vec<Filter>,
    clients: Vec<Client>,
    query_log: QueryLogConfig,
    stats: StatsConfig,
    access_list: AccessList,
    dns_config: DnsConfig,
    dhcp: DhcpStatus,
}

/// Read every subsystem that `gate` requires from `client`, skipping the rest.
async fn snapshot(
    client: &dyn ApplianceClient,
    status: Status,
    gate: &FeatureGate,
) -> Result<OriginSnapshot, ApplianceError> {
    let mut snap = OriginSnapshot {
        status,
        ..OriginSnapshot::default()
    };

    if gate.general_settings {
        snap.protection = Protection {
            protection_enabled: snap.status.protection.protection_enabled,
            parental_enabled: client.parental().await?,
            safe_search_enabled: client.safe_search().await?,
            safe_browsing_enabled: client.safe_browsing().await?,
        };
    }
    if gate.dns.rewrites {
        snap.rewrites = client.rewrite_list().await?;
    }
    if gate.services {
        snap.services = client.services().await?;
    }
    if gate.filters {
        let (filtering, filters, whitelist_filters) = client.filtering().await?;
        snap.filtering = filtering;
        snap.filters = filters;
        snap.whitelist_filters = whitelist_filters;
    }
    if gate.client_settings {
        snap.clients = client.clients().await?;
    }
    if gate.query_log_config {
        snap.query_log = client.query_log_config().await?;
    }
    if gate.stats_config {
        snap.stats = client.stats_config().await?;
    }
    if gate.dns.access_lists {
        snap.access_list = client.access_list().await?;
    }
    if gate.dns.server_config {
        snap.dns_config = client.dns_config().await?;
    }
    if gate.dhcp.any() {
        snap.dhcp = client.dhcp_status().await?;
    }

    Ok(snap)
}

/// Execute one reconciliation pass: snapshot the origin, then bring every
/// unique replica into line with it.
///
/// # Errors
///
/// Returns [`ReconcileError::Origin`] only — replica-level failures are
/// recorded in the returned [`PassReport`] instead of aborting the pass.
pub async fn run_pass(
    origin: &InstanceDescriptor,
    replicas: &[InstanceDescriptor],
    gate: &FeatureGate,
    client_factory: &ClientFactory,
) -> Result<PassReport, ReconcileError> {
    let origin_client = client_factory(origin).map_err(ReconcileError::Origin)?;
    origin_client.host().await.map_err(ReconcileError::Origin)?;
    let status = origin_client.status().await.map_err(ReconcileError::Origin)?;
    version::check(origin_client.url(), &status.version, MIN_SUPPORTED_VERSION)
        .map_err(ReconcileError::Origin)?;

    let snap = snapshot(origin_client.as_ref(), status, gate)
        .await
        .map_err(ReconcileError::Origin)?;

    let mut report = PassReport::new();
    for replica in unique_replicas(replicas) {
        let key = replica.key();
        let outcome = reconcile_replica(&replica, &snap, gate, client_factory).await;
        match &outcome {
            ReplicaOutcome::Ok => info!(replica = %key, "replica reconciled"),
            ReplicaOutcome::NotReady(err) => {
                warn!(replica = %key, error = %err, "replica not ready, skipping");
            }
            ReplicaOutcome::Failed(errors) => {
                warn!(replica = %key, failures = errors.len(), "replica reconciliation had failures");
            }
        }
        report.insert(key, outcome);
    }

    Ok(report)
}

async fn ensure_ready(
    client: &dyn ApplianceClient,
    replica: &InstanceDescriptor,
) -> Result<(), ApplianceError> {
    let status = match client.status().await {
        Ok(status) => status,
        Err(ApplianceError::SetupNeeded { .. }) if replica.auto_setup => {
            client.setup().await?;
            client.status().await?
        }
        Err(err) => return Err(err),
    };
    version::check(client.url(), &status.version, MIN_SUPPORTED_VERSION)
}

async fn reconcile_replica(
    replica: &InstanceDescriptor,
    origin: &OriginSnapshot,
    gate: &FeatureGate,
    client_factory: &ClientFactory,
) -> ReplicaOutcome {
    let client = match client_factory(replica) {
        Ok(client) => client,
        Err(err) => return ReplicaOutcome::NotReady(err),
    };

    if let Err(err) = ensure_ready(client.as_ref(), replica).await {
        return ReplicaOutcome::NotReady(err);
    }

    let replica_key = replica.key();
    let mut errors = Vec::new();
    let client = client.as_ref();

    if gate.general_settings {
        run_subsystem(&mut errors, &replica_key, "general_settings", general_settings(client, origin)).await;
    }
    if gate.query_log_config {
        run_subsystem(&mut errors, &replica_key, "query_log_config", query_log(client, origin)).await;
    }
    if gate.stats_config {
        run_subsystem(&mut errors, &replica_key, "stats_config", stats(client, origin)).await;
    }
    if gate.dns.rewrites {
        run_subsystem(&mut errors, &replica_key, "rewrites", rewrites(client, origin)).await;
    }
    if gate.filters {
        run_subsystem(&mut errors, &replica_key, "filters", filters(client, origin)).await;
    }
    if gate.services {
        run_subsystem(&mut errors, &replica_key, "services", services(client, origin)).await;
    }
    if gate.client_settings {
        run_subsystem(&mut errors, &replica_key, "clients", clients(client, origin)).await;
    }
    if gate.dns.access_lists {
        run_subsystem(&mut errors, &replica_key, "access_list", access_list(client, origin)).await;
    }
    if gate.dns.server_config {
        run_subsystem(&mut errors, &replica_key, "dns_config", dns_config(client, origin)).await;
    }
    if gate.dhcp.any() {
        run_subsystem(&mut errors, &replica_key, "dhcp", dhcp(client, origin, gate)).await;
    }

    if errors.is_empty() {
        ReplicaOutcome::Ok
    } else {
        ReplicaOutcome::Failed(errors)
    }
}

async fn run_subsystem(
    errors: &mut Vec<SubsystemError>,
    replica: &str,
    subsystem: &'static str,
    fut: impl std::future::Future<Output = Result<(), ApplianceError>>,
) {
    if let Err(source) = fut.await {
        errors.push(SubsystemError {
            replica: replica.to_string(),
            subsystem,
            source,
        });
    }
}

async fn general_settings(
    client: &dyn ApplianceClient,
    origin: &OriginSnapshot,
) -> Result<(), ApplianceError> {
    let replica_status = client.status().await?;
    let current = Protection {
        protection_enabled: replica_status.protection.protection_enabled,
        parental_enabled: client.parental().await?,
        safe_search_enabled: client.safe_search().await?,
        safe_browsing_enabled: client.safe_browsing().await?,
    };
    let desired = origin.protection;

    if current.protection_enabled != desired.protection_enabled {
        client.toggle_protection(desired.protection_enabled).await?;
    }
    if current.parental_enabled != desired.parental_enabled {
        client.toggle_parental(desired.parental_enabled).await?;
    }
    if current.safe_search_enabled != desired.safe_search_enabled {
        client.toggle_safe_search(desired.safe_search_enabled).await?;
    }
    if current.safe_browsing_enabled != desired.safe_browsing_enabled {
        client.toggle_safe_browsing(desired.safe_browsing_enabled).await?;
    }
    Ok(())
}

async fn query_log(client: &dyn ApplianceClient, origin: &OriginSnapshot) -> Result<(), ApplianceError> {
    let current = client.query_log_config().await?;
    if !current.equals(&origin.query_log) {
        client.set_query_log_config(origin.query_log).await?;
    }
    Ok(())
}

async fn stats(client: &dyn ApplianceClient, origin: &OriginSnapshot) -> Result<(), ApplianceError> {
    let current = client.stats_config().await?;
    if !current.equals(&origin.stats) {
        client.set_stats_config(origin.stats).await?;
    }
    Ok(())
}

async fn rewrites(client: &dyn ApplianceClient, origin: &OriginSnapshot) -> Result<(), ApplianceError> {
    let current = client.rewrite_list().await?;
    let (adds, removes, _duplicates) = rewrite_delta(&current, &origin.rewrites);
    client.add_rewrite_entries(&adds).await?;
    client.delete_rewrite_entries(&removes).await?;
    Ok(())
}

async fn filters(client: &dyn ApplianceClient, origin: &OriginSnapshot) -> Result<(), ApplianceError> {
    let (current_filtering, current_filters, current_whitelist) = client.filtering().await?;

    reconcile_filter_channel(client, false, &current_filters, &origin.filters).await?;
    reconcile_filter_channel(client, true, &current_whitelist, &origin.whitelist_filters).await?;

    if current_filtering.enabled != origin.filtering.enabled
        || current_filtering.interval != origin.filtering.interval
    {
        client
            .toggle_filtering(origin.filtering.enabled, origin.filtering.interval)
            .await?;
    }
    if !current_filtering.user_rules_equal(&origin.filtering) {
        client.set_custom_rules(&origin.filtering.user_rules).await?;
    }
    Ok(())
}

async fn reconcile_filter_channel(
    client: &dyn ApplianceClient,
    whitelist: bool,
    current: &[Filter],
    desired: &[Filter],
) -> Result<(), ApplianceError> {
    let (adds, updates, removes) = filter_delta(current, desired);
    client.add_filters(whitelist, &adds).await?;
    client.update_filters(whitelist, &updates).await?;
    client.delete_filters(whitelist, &removes).await?;
    Ok(())
}

async fn services(client: &dyn ApplianceClient, origin: &OriginSnapshot) -> Result<(), ApplianceError> {
    let mut current = client.services().await?;
    let mut desired = origin.services.clone();
    current.sort();
    desired.sort();
    if current != desired {
        client.set_services(&origin.services).await?;
    }
    Ok(())
}

async fn clients(client: &dyn ApplianceClient, origin: &OriginSnapshot) -> Result<(), ApplianceError> {
    let current = client.clients().await?;
    let (adds, updates, removes) = client_delta(&current, &origin.clients);
    client.add_clients(&adds).await?;
    client.update_clients(&updates).await?;
    client.delete_clients(&removes).await?;
    Ok(())
}

async fn access_list(client: &dyn ApplianceClient, origin: &OriginSnapshot) -> Result<(), ApplianceError> {
    let current = client.access_list().await?;
    if !current.equals(&origin.access_list) {
        client.set_access_list(&origin.access_list).await?;
    }
    Ok(())
}

async fn dns_config(client: &dyn ApplianceClient, origin: &OriginSnapshot) -> Result<(), ApplianceError> {
    let current = client.dns_config().await?;
    if !current.equals(&origin.dns_config) {
        client.set_dns_config(&origin.dns_config).await?;
    }
    Ok(())
}

async fn dhcp(
    client: &dyn ApplianceClient,
    origin: &OriginSnapshot,
    gate: &FeatureGate,
) -> Result<(), ApplianceError> {
    let current = client.dhcp_status().await?;

    if gate.dhcp.static_leases {
        let (adds, removes) = lease_delta(&current.static_leases, &origin.dhcp.static_leases);
        client.add_dhcp_static_leases(&adds).await?;
        client.delete_dhcp_static_leases(&removes).await?;
    }
    if gate.dhcp.server_config && !current.equals(&origin.dhcp) {
        client.set_dhcp_config(&origin.dhcp).await?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
