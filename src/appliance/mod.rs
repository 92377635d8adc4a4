// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The appliance client interface and its concrete HTTP implementation.
//!
//! The [`reconciler`](crate::reconciler) module depends only on the
//! [`ApplianceClient`] trait; [`http::HttpApplianceClient`] is the only
//! component in this crate that performs network I/O.

pub mod http;
pub mod retry;

#[cfg(test)]
pub mod mock;

use async_trait::async_trait;

use crate::errors::ApplianceError;
use crate::model::{
    AccessList, Client, DhcpStaticLease, DhcpStatus, DnsConfig, Filter, FilteringConfig,
    QueryLogConfig, RewriteEntry, StatsConfig, Status,
};

/// Everything the reconciler needs from one appliance instance: reads that
/// build a snapshot, and mutations that close a delta.
///
/// Every operation is fallible with [`ApplianceError`]; the reconciler
/// decides how to propagate a given failure.
#[async_trait]
pub trait ApplianceClient: Send + Sync {
    /// The instance's base URL, used for logging and error attribution.
    fn url(&self) -> &str;

    // --- reads ---

    /// A lightweight reachability probe independent of `status`.
    async fn host(&self) -> Result<(), ApplianceError>;
    /// Fetch instance status, including protection toggles and version.
    ///
    /// Returns [`ApplianceError::SetupNeeded`] on a fresh, unconfigured instance.
    async fn status(&self) -> Result<Status, ApplianceError>;
    /// Parental control toggle.
    async fn parental(&self) -> Result<bool, ApplianceError>;
    /// Safe search toggle.
    async fn safe_search(&self) -> Result<bool, ApplianceError>;
    /// Safe browsing toggle.
    async fn safe_browsing(&self) -> Result<bool, ApplianceError>;
    /// All configured rewrite entries.
    async fn rewrite_list(&self) -> Result<Vec<RewriteEntry>, ApplianceError>;
    /// Blocked service identifiers.
    async fn services(&self) -> Result<Vec<String>, ApplianceError>;
    /// Filtering configuration: toggle, interval, user rules, and both filter channels.
    async fn filtering(&self) -> Result<(FilteringConfig, Vec<Filter>, Vec<Filter>), ApplianceError>;
    /// All client policy records.
    async fn clients(&self) -> Result<Vec<Client>, ApplianceError>;
    /// Query log configuration.
    async fn query_log_config(&self) -> Result<QueryLogConfig, ApplianceError>;
    /// Statistics configuration.
    async fn stats_config(&self) -> Result<StatsConfig, ApplianceError>;
    /// Access list (allow/disallow/block).
    async fn access_list(&self) -> Result<AccessList, ApplianceError>;
    /// DNS server configuration.
    async fn dns_config(&self) -> Result<DnsConfig, ApplianceError>;
    /// DHCP status, including static leases.
    async fn dhcp_status(&self) -> Result<DhcpStatus, ApplianceError>;

    // --- mutations ---

    /// Toggle overall protection.
    async fn toggle_protection(&self, enabled: bool) -> Result<(), ApplianceError>;
    /// Toggle parental control.
    async fn toggle_parental(&self, enabled: bool) -> Result<(), ApplianceError>;
    /// Toggle safe search.
    async fn toggle_safe_search(&self, enabled: bool) -> Result<(), ApplianceError>;
    /// Toggle safe browsing.
    async fn toggle_safe_browsing(&self, enabled: bool) -> Result<(), ApplianceError>;
    /// Add rewrite entries.
    async fn add_rewrite_entries(&self, entries: &[RewriteEntry]) -> Result<(), ApplianceError>;
    /// Delete rewrite entries.
    async fn delete_rewrite_entries(&self, entries: &[RewriteEntry]) -> Result<(), ApplianceError>;
    /// Replace the blocked services list wholesale.
    async fn set_services(&self, services: &[String]) -> Result<(), ApplianceError>;
    /// Add filters to a channel (`whitelist` selects the whitelist channel).
    async fn add_filters(&self, whitelist: bool, filters: &[Filter]) -> Result<(), ApplianceError>;
    /// Update filters in a channel.
    async fn update_filters(&self, whitelist: bool, filters: &[Filter]) -> Result<(), ApplianceError>;
    /// Delete filters from a channel.
    async fn delete_filters(&self, whitelist: bool, filters: &[Filter]) -> Result<(), ApplianceError>;
    /// Toggle filtering and set its refresh interval.
    async fn toggle_filtering(&self, enabled: bool, interval: u32) -> Result<(), ApplianceError>;
    /// Replace the user custom rules blob wholesale.
    async fn set_custom_rules(&self, rules: &[String]) -> Result<(), ApplianceError>;
    /// Add client policy records.
    async fn add_clients(&self, clients: &[Client]) -> Result<(), ApplianceError>;
    /// Update client policy records.
    async fn update_clients(&self, clients: &[Client]) -> Result<(), ApplianceError>;
    /// Delete clients by name.
    async fn delete_clients(&self, names: &[String]) -> Result<(), ApplianceError>;
    /// Replace the query log configuration wholesale.
    async fn set_query_log_config(&self, config: QueryLogConfig) -> Result<(), ApplianceError>;
    /// Replace the stats configuration wholesale.
    async fn set_stats_config(&self, config: StatsConfig) -> Result<(), ApplianceError>;
    /// Replace the access list wholesale.
    async fn set_access_list(&self, list: &AccessList) -> Result<(), ApplianceError>;
    /// Replace the DNS server configuration wholesale.
    async fn set_dns_config(&self, config: &DnsConfig) -> Result<(), ApplianceError>;
    /// Replace the DHCP server configuration (interface, ranges, lease durations).
    ///
    /// Static leases have their own add/delete endpoints and are never part
    /// of this call's payload — see [`DhcpStatus::to_config`].
    async fn set_dhcp_config(&self, config: &DhcpStatus) -> Result<(), ApplianceError>;
    /// Add DHCP static leases.
    async fn add_dhcp_static_leases(&self, leases: &[DhcpStaticLease]) -> Result<(), ApplianceError>;
    /// Delete DHCP static leases.
    async fn delete_dhcp_static_leases(&self, leases: &[DhcpStaticLease]) -> Result<(), ApplianceError>;
    /// Run first-time setup on a fresh instance.
    async fn setup(&self) -> Result<(), ApplianceError>;
}
