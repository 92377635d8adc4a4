// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! A call-recording mock [`ApplianceClient`], used by the reconciler's
//! per-subsystem contract tests.
//!
//! Canned read responses, and a log of every call made so a test can
//! assert the exact sequence issued for a given `(current, desired)` pair.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::ApplianceError;
use crate::model::{
    AccessList, Client, DhcpStaticLease, DhcpStatus, DnsConfig, Filter, FilteringConfig,
    QueryLogConfig, RewriteEntry, StatsConfig, Status,
};

use super::ApplianceClient;

#[derive(Default)]
struct MockState {
    calls: Vec<String>,
    errors: HashMap<&'static str, ApplianceError>,
}

/// A fixed set of canned responses plus a call log.
///
/// Construct with `MockClient { status: ..., clients: vec![...], ..Default::default() }`,
/// optionally call [`MockClient::fail_on`] to make one operation return an
/// error the next (and only the next) time it is invoked, then run it
/// through the reconciler and inspect [`MockClient::calls`].
#[derive(Default)]
pub struct MockClient {
    /// Instance URL returned by [`ApplianceClient::url`] and used in call logs.
    pub url: String,
    state: Mutex<MockState>,
    /// Canned `status()` response.
    pub status: Status,
    /// Canned `parental()` response.
    pub parental: bool,
    /// Canned `safe_search()` response.
    pub safe_search: bool,
    /// Canned `safe_browsing()` response.
    pub safe_browsing: bool,
    /// Canned `rewrite_list()` response.
    pub rewrites: Vec<RewriteEntry>,
    /// Canned `services()` response.
    pub services: Vec<String>,
    /// Canned `filtering()` scalar-config component.
    pub filtering: FilteringConfig,
    /// Canned `filtering()` normal-channel filters.
    pub filters: Vec<Filter>,
    /// Canned `filtering()` whitelist-channel filters.
    pub whitelist_filters: Vec<Filter>,
    /// Canned `clients()` response.
    pub clients: Vec<Client>,
    /// Canned `query_log_config()` response.
    pub query_log: QueryLogConfig,
    /// Canned `stats_config()` response.
    pub stats: StatsConfig,
    /// Canned `access_list()` response.
    pub access_list: AccessList,
    /// Canned `dns_config()` response.
    pub dns_config: DnsConfig,
    /// Canned `dhcp_status()` response.
    pub dhcp_status: DhcpStatus,
}

impl MockClient {
    /// Make the named operation return `error` the next time it is called,
    /// then resume returning canned responses normally.
    pub fn fail_on(&self, operation: &'static str, error: ApplianceError) {
        self.state.lock().unwrap().errors.insert(operation, error);
    }

    /// The call log in invocation order, e.g. `["status", "rewrite_list", "add_rewrite_entries:a.example.com#1.1.1.1"]`.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.state.lock().unwrap().calls.push(call.into());
    }

    fn maybe_err(&self, operation: &'static str) -> Option<ApplianceError> {
        self.state.lock().unwrap().errors.remove(operation)
    }
}

#[async_trait]
impl ApplianceClient for MockClient {
    fn url(&self) -> &str {
        &self.url
    }

    async fn host(&self) -> Result<(), ApplianceError> {
        self.record("host");
        match self.maybe_err("host") {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn status(&self) -> Result<Status, ApplianceError> {
        self.record("status");
        match self.maybe_err("status") {
            Some(e) => Err(e),
            None => Ok(self.status.clone()),
        }
    }

    async fn parental(&self) -> Result<bool, ApplianceError> {
        self.record("parental");
        match self.maybe_err("parental") {
            Some(e) => Err(e),
            None => Ok(self.parental),
        }
    }

    async fn safe_search(&self) -> Result<bool, ApplianceError> {
        self.record("safe_search");
        match self.maybe_err("safe_search") {
            Some(e) => Err(e),
            None => Ok(self.safe_search),
        }
    }

    async fn safe_browsing(&self) -> Result<bool, ApplianceError> {
        self.record("safe_browsing");
        match self.maybe_err("safe_browsing") {
            Some(e) => Err(e),
            None => Ok(self.safe_browsing),
        }
    }

    async fn rewrite_list(&self) -> Result<Vec<RewriteEntry>, ApplianceError> {
        self.record("rewrite_list");
        match self.maybe_err("rewrite_list") {
            Some(e) => Err(e),
            None => Ok(self.rewrites.clone()),
        }
    }

    async fn services(&self) -> Result<Vec<String>, ApplianceError> {
        self.record("services");
        match self.maybe_err("services") {
            Some(e) => Err(e),
            None => Ok(self.services.clone()),
        }
    }

    async fn filtering(
        &self,
    ) -> Result<(FilteringConfig, Vec<Filter>, Vec<Filter>), ApplianceError> {
        self.record("filtering");
        match self.maybe_err("filtering") {
            Some(e) => Err(e),
            None => Ok((
                self.filtering.clone(),
                self.filters.clone(),
                self.whitelist_filters.clone(),
            )),
        }
    }

    async fn clients(&self) -> Result<Vec<Client>, ApplianceError> {
        self.record("clients");
        match self.maybe_err("clients") {
            Some(e) => Err(e),
            None => Ok(self.clients.clone()),
        }
    }

    async fn query_log_config(&self) -> Result<QueryLogConfig, ApplianceError> {
        self.record("query_log_config");
        match self.maybe_err("query_log_config") {
            Some(e) => Err(e),
            None => Ok(self.query_log),
        }
    }

    async fn stats_config(&self) -> Result<StatsConfig, ApplianceError> {
        self.record("stats_config");
        match self.maybe_err("stats_config") {
            Some(e) => Err(e),
            None => Ok(self.stats),
        }
    }

    async fn access_list(&self) -> Result<AccessList, ApplianceError> {
        self.record("access_list");
        match self.maybe_err("access_list") {
            Some(e) => Err(e),
            None => Ok(self.access_list.clone()),
        }
    }

    async fn dns_config(&self) -> Result<DnsConfig, ApplianceError> {
        self.record("dns_config");
        match self.maybe_err("dns_config") {
            Some(e) => Err(e),
            None => Ok(self.dns_config.clone()),
        }
    }

    async fn dhcp_status(&self) -> Result<DhcpStatus, ApplianceError> {
        self.record("dhcp_status");
        match self.maybe_err("dhcp_status") {
            Some(e) => Err(e),
            None => Ok(self.dhcp_status.clone()),
        }
    }

    async fn toggle_protection(&self, enabled: bool) -> Result<(), ApplianceError> {
        self.record(format!("toggle_protection:{enabled}"));
        match self.maybe_err("toggle_protection") {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn toggle_parental(&self, enabled: bool) -> Result<(), ApplianceError> {
        self.record(format!("toggle_parental:{enabled}"));
        match self.maybe_err("toggle_parental") {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn toggle_safe_search(&self, enabled: bool) -> Result<(), ApplianceError> {
        self.record(format!("toggle_safe_search:{enabled}"));
        match self.maybe_err("toggle_safe_search") {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn toggle_safe_browsing(&self, enabled: bool) -> Result<(), ApplianceError> {
        self.record(format!("toggle_safe_browsing:{enabled}"));
        match self.maybe_err("toggle_safe_browsing") {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn add_rewrite_entries(&self, entries: &[RewriteEntry]) -> Result<(), ApplianceError> {
        self.record(format!("add_rewrite_entries:{}", join_keys(entries, RewriteEntry::key)));
        match self.maybe_err("add_rewrite_entries") {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn delete_rewrite_entries(&self, entries: &[RewriteEntry]) -> Result<(), ApplianceError> {
        self.record(format!(
            "delete_rewrite_entries:{}",
            join_keys(entries, RewriteEntry::key)
        ));
        match self.maybe_err("delete_rewrite_entries") {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn set_services(&self, services: &[String]) -> Result<(), ApplianceError> {
        self.record(format!("set_services:{}", services.join(",")));
        match self.maybe_err("set_services") {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn add_filters(&self, whitelist: bool, filters: &[Filter]) -> Result<(), ApplianceError> {
        self.record(format!(
            "add_filters:{whitelist}:{}",
            join_keys(filters, |f| f.key().to_string())
        ));
        match self.maybe_err("add_filters") {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn update_filters(&self, whitelist: bool, filters: &[Filter]) -> Result<(), ApplianceError> {
        self.record(format!(
            "update_filters:{whitelist}:{}",
            join_keys(filters, |f| f.key().to_string())
        ));
        match self.maybe_err("update_filters") {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn delete_filters(&self, whitelist: bool, filters: &[Filter]) -> Result<(), ApplianceError> {
        self.record(format!(
            "delete_filters:{whitelist}:{}",
            join_keys(filters, |f| f.key().to_string())
        ));
        match self.maybe_err("delete_filters") {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn toggle_filtering(&self, enabled: bool, interval: u32) -> Result<(), ApplianceError> {
        self.record(format!("toggle_filtering:{enabled}:{interval}"));
        match self.maybe_err("toggle_filtering") {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn set_custom_rules(&self, rules: &[String]) -> Result<(), ApplianceError> {
        self.record(format!("set_custom_rules:{}", rules.join("\\n")));
        match self.maybe_err("set_custom_rules") {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn add_clients(&self, clients: &[Client]) -> Result<(), ApplianceError> {
        self.record(format!("add_clients:{}", join_keys(clients, |c| c.key().to_string())));
        match self.maybe_err("add_clients") {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn update_clients(&self, clients: &[Client]) -> Result<(), ApplianceError> {
        self.record(format!(
            "update_clients:{}",
            join_keys(clients, |c| c.key().to_string())
        ));
        match self.maybe_err("update_clients") {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn delete_clients(&self, names: &[String]) -> Result<(), ApplianceError> {
        self.record(format!("delete_clients:{}", names.join(",")));
        match self.maybe_err("delete_clients") {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn set_query_log_config(&self, config: QueryLogConfig) -> Result<(), ApplianceError> {
        self.record(format!(
            "set_query_log_config:{}:{}:{}",
            config.enabled, config.anonymize_client_ip, config.interval
        ));
        match self.maybe_err("set_query_log_config") {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn set_stats_config(&self, config: StatsConfig) -> Result<(), ApplianceError> {
        self.record(format!("set_stats_config:{}", config.interval));
        match self.maybe_err("set_stats_config") {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn set_access_list(&self, _list: &AccessList) -> Result<(), ApplianceError> {
        self.record("set_access_list");
        match self.maybe_err("set_access_list") {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn set_dns_config(&self, _config: &DnsConfig) -> Result<(), ApplianceError> {
        self.record("set_dns_config");
        match self.maybe_err("set_dns_config") {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn set_dhcp_config(&self, _config: &DhcpStatus) -> Result<(), ApplianceError> {
        self.record("set_dhcp_config");
        match self.maybe_err("set_dhcp_config") {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn add_dhcp_static_leases(&self, leases: &[DhcpStaticLease]) -> Result<(), ApplianceError> {
        self.record(format!(
            "add_dhcp_static_leases:{}",
            join_keys(leases, |l| l.key().to_string())
        ));
        match self.maybe_err("add_dhcp_static_leases") {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn delete_dhcp_static_leases(&self, leases: &[DhcpStaticLease]) -> Result<(), ApplianceError> {
        self.record(format!(
            "delete_dhcp_static_leases:{}",
            join_keys(leases, |l| l.key().to_string())
        ));
        match self.maybe_err("delete_dhcp_static_leases") {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn setup(&self) -> Result<(), ApplianceError> {
        self.record("setup");
        match self.maybe_err("setup") {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn join_keys<T>(items: &[T], key: impl Fn(&T) -> String) -> String {
    items.iter().map(key).collect::<Vec<_>>().join(",")
}
