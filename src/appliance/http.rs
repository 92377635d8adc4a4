// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! `reqwest`-backed implementation of [`crate::appliance::ApplianceClient`].
//!
//! One client per instance, built once and reused across every call in a
//! pass.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::errors::ApplianceError;
use crate::model::{
    AccessList, Client, DhcpStaticLease, DhcpStatus, DnsConfig, Filter, FilteringConfig,
    InstanceDescriptor, QueryLogConfig, RewriteEntry, StatsConfig, Status,
};

use super::retry::retry_api_call;
use super::ApplianceClient;

/// Request shape the appliance's filter-removal endpoint expects.
mod patch {
    use serde::Serialize;

    #[derive(Serialize)]
    pub struct RemoveUrlRequestPatch<'a> {
        pub url: &'a str,
        pub whitelist: bool,
    }
}

/// `HttpApplianceClient` wraps one appliance instance's base URL and
/// credentials behind a shared [`reqwest::Client`].
#[derive(Clone)]
pub struct HttpApplianceClient {
    http: Arc<HttpClient>,
    base_url: String,
    api_path: String,
    username: Option<String>,
    password: Option<String>,
}

impl HttpApplianceClient {
    /// Build a client for one instance descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying `reqwest::Client` fails to build
    /// (e.g. a malformed TLS configuration).
    pub fn new(instance: &InstanceDescriptor) -> Result<Self, ApplianceError> {
        Self::new_with_timeout(instance, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    /// Build a client for one instance descriptor with an explicit timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying `reqwest::Client` fails to build.
    pub fn new_with_timeout(
        instance: &InstanceDescriptor,
        timeout: Duration,
    ) -> Result<Self, ApplianceError> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(instance.insecure_skip_verify)
            .build()
            .map_err(|source| ApplianceError::Transport {
                url: instance.url.clone(),
                source,
            })?;

        Ok(Self {
            http: Arc::new(http),
            base_url: instance.url.trim_end_matches('/').to_string(),
            api_path: instance.effective_api_path().to_string(),
            username: instance.username.clone(),
            password: instance.password.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}/{}", self.base_url, self.api_path, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApplianceError> {
        let url = self.endpoint(path);
        retry_api_call(
            || async {
                let mut req = self.http.get(&url);
                req = self.with_auth(req);
                self.send(req, &url).await
            },
            path,
        )
        .await
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), ApplianceError> {
        let url = self.endpoint(path);
        retry_api_call(
            || async {
                let mut req = self.http.post(&url).json(body);
                req = self.with_auth(req);
                self.send::<Value>(req, &url).await.map(|_| ())
            },
            path,
        )
        .await
    }

    fn with_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match (&self.username, &self.password) {
            (Some(user), pass) => req.basic_auth(user, pass.as_deref()),
            (None, _) => req,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<T, ApplianceError> {
        let response = req.send().await.map_err(|source| ApplianceError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApplianceError::Auth {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        if status == StatusCode::INTERNAL_SERVER_ERROR && url.ends_with("status") {
            return Err(ApplianceError::SetupNeeded { url: url.to_string() });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApplianceError::Protocol {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| ApplianceError::Transport {
                url: url.to_string(),
                source,
            })?;
        if bytes.is_empty() {
            return serde_json::from_value(Value::Null).map_err(|source| ApplianceError::Codec {
                url: url.to_string(),
                source,
            });
        }
        serde_json::from_slice(&bytes).map_err(|source| ApplianceError::Codec {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl ApplianceClient for HttpApplianceClient {
    fn url(&self) -> &str {
        &self.base_url
    }

    async fn host(&self) -> Result<(), ApplianceError> {
        self.get::<Value>("status").await.map(|_| ())
    }

    async fn status(&self) -> Result<Status, ApplianceError> {
        self.get("status").await
    }

    async fn parental(&self) -> Result<bool, ApplianceError> {
        #[derive(serde::Deserialize)]
        struct Resp {
            enabled: bool,
        }
        self.get::<Resp>("parental/status").await.map(|r| r.enabled)
    }

    async fn safe_search(&self) -> Result<bool, ApplianceError> {
        #[derive(serde::Deserialize)]
        struct Resp {
            enabled: bool,
        }
        self.get::<Resp>("safesearch/status").await.map(|r| r.enabled)
    }

    async fn safe_browsing(&self) -> Result<bool, ApplianceError> {
        #[derive(serde::Deserialize)]
        struct Resp {
            enabled: bool,
        }
        self.get::<Resp>("safebrowsing/status").await.map(|r| r.enabled)
    }

    async fn rewrite_list(&self) -> Result<Vec<RewriteEntry>, ApplianceError> {
        self.get("rewrite/list").await
    }

    async fn services(&self) -> Result<Vec<String>, ApplianceError> {
        self.get("blocked_services/list").await
    }

    async fn filtering(&self) -> Result<(FilteringConfig, Vec<Filter>, Vec<Filter>), ApplianceError> {
        #[derive(serde::Deserialize)]
        struct Resp {
            enabled: bool,
            interval: u32,
            filters: Vec<Filter>,
            whitelist_filters: Vec<Filter>,
            user_rules: Vec<String>,
        }
        let resp: Resp = self.get("filtering/status").await?;
        Ok((
            FilteringConfig {
                enabled: resp.enabled,
                interval: resp.interval,
                user_rules: resp.user_rules,
            },
            resp.filters,
            resp.whitelist_filters,
        ))
    }

    async fn clients(&self) -> Result<Vec<Client>, ApplianceError> {
        #[derive(serde::Deserialize)]
        struct Resp {
            clients: Vec<Client>,
        }
        self.get::<Resp>("clients").await.map(|r| r.clients)
    }

    async fn query_log_config(&self) -> Result<QueryLogConfig, ApplianceError> {
        self.get("querylog/config").await
    }

    async fn stats_config(&self) -> Result<StatsConfig, ApplianceError> {
        self.get("stats/config").await
    }

    async fn access_list(&self) -> Result<AccessList, ApplianceError> {
        self.get("access/list").await
    }

    async fn dns_config(&self) -> Result<DnsConfig, ApplianceError> {
        self.get("dns_info").await
    }

    async fn dhcp_status(&self) -> Result<DhcpStatus, ApplianceError> {
        self.get("dhcp/status").await
    }

    async fn toggle_protection(&self, enabled: bool) -> Result<(), ApplianceError> {
        #[derive(Serialize)]
        struct Body {
            enabled: bool,
        }
        self.post("dns_config", &Body { enabled }).await
    }

    async fn toggle_parental(&self, enabled: bool) -> Result<(), ApplianceError> {
        let path = if enabled { "parental/enable" } else { "parental/disable" };
        self.post(path, &Value::Null).await
    }

    async fn toggle_safe_search(&self, enabled: bool) -> Result<(), ApplianceError> {
        #[derive(Serialize)]
        struct Body {
            enabled: bool,
        }
        self.post("safesearch/settings", &Body { enabled }).await
    }

    async fn toggle_safe_browsing(&self, enabled: bool) -> Result<(), ApplianceError> {
        let path = if enabled { "safebrowsing/enable" } else { "safebrowsing/disable" };
        self.post(path, &Value::Null).await
    }

    async fn add_rewrite_entries(&self, entries: &[RewriteEntry]) -> Result<(), ApplianceError> {
        for entry in entries {
            self.post("rewrite/add", entry).await?;
        }
        Ok(())
    }

    async fn delete_rewrite_entries(&self, entries: &[RewriteEntry]) -> Result<(), ApplianceError> {
        for entry in entries {
            self.post("rewrite/delete", entry).await?;
        }
        Ok(())
    }

    async fn set_services(&self, services: &[String]) -> Result<(), ApplianceError> {
        #[derive(Serialize)]
        struct Body<'a> {
            ids: &'a [String],
        }
        self.post("blocked_services/set", &Body { ids: services }).await
    }

    async fn add_filters(&self, whitelist: bool, filters: &[Filter]) -> Result<(), ApplianceError> {
        #[derive(Serialize)]
        struct Body<'a> {
            name: &'a str,
            url: &'a str,
            whitelist: bool,
        }
        for filter in filters {
            self.post(
                "filtering/add_url",
                &Body {
                    name: &filter.name,
                    url: &filter.url,
                    whitelist,
                },
            )
            .await?;
        }
        Ok(())
    }

    async fn update_filters(&self, whitelist: bool, filters: &[Filter]) -> Result<(), ApplianceError> {
        #[derive(Serialize)]
        struct Body<'a> {
            url: &'a str,
            data: &'a Filter,
            whitelist: bool,
        }
        for filter in filters {
            self.post(
                "filtering/set_url",
                &Body {
                    url: &filter.url,
                    data: filter,
                    whitelist,
                },
            )
            .await?;
        }
        Ok(())
    }

    async fn delete_filters(&self, whitelist: bool, filters: &[Filter]) -> Result<(), ApplianceError> {
        for filter in filters {
            self.post(
                "filtering/remove_url",
                &patch::RemoveUrlRequestPatch {
                    url: &filter.url,
                    whitelist,
                },
            )
            .await?;
        }
        Ok(())
    }

    async fn toggle_filtering(&self, enabled: bool, interval: u32) -> Result<(), ApplianceError> {
        #[derive(Serialize)]
        struct Body {
            enabled: bool,
            interval: u32,
        }
        self.post("filtering/config", &Body { enabled, interval }).await
    }

    async fn set_custom_rules(&self, rules: &[String]) -> Result<(), ApplianceError> {
        #[derive(Serialize)]
        struct Body<'a> {
            rules: &'a [String],
        }
        self.post("filtering/set_rules", &Body { rules }).await
    }

    async fn add_clients(&self, clients: &[Client]) -> Result<(), ApplianceError> {
        for client in clients {
            self.post("clients/add", client).await?;
        }
        Ok(())
    }

    async fn update_clients(&self, clients: &[Client]) -> Result<(), ApplianceError> {
        #[derive(Serialize)]
        struct Body<'a> {
            name: &'a str,
            data: &'a Client,
        }
        for client in clients {
            self.post(
                "clients/update",
                &Body {
                    name: &client.name,
                    data: client,
                },
            )
            .await?;
        }
        Ok(())
    }

    async fn delete_clients(&self, names: &[String]) -> Result<(), ApplianceError> {
        #[derive(Serialize)]
        struct Body<'a> {
            name: &'a str,
        }
        for name in names {
            self.post("clients/delete", &Body { name }).await?;
        }
        Ok(())
    }

    async fn set_query_log_config(&self, config: QueryLogConfig) -> Result<(), ApplianceError> {
        self.post("querylog/config", &config).await
    }

    async fn set_stats_config(&self, config: StatsConfig) -> Result<(), ApplianceError> {
        self.post("stats/config", &config).await
    }

    async fn set_access_list(&self, list: &AccessList) -> Result<(), ApplianceError> {
        self.post("access/set", list).await
    }

    async fn set_dns_config(&self, config: &DnsConfig) -> Result<(), ApplianceError> {
        self.post("dns_config", config).await
    }

    async fn set_dhcp_config(&self, config: &DhcpStatus) -> Result<(), ApplianceError> {
        self.post("dhcp/set_config", &config.to_config()).await
    }

    async fn add_dhcp_static_leases(&self, leases: &[DhcpStaticLease]) -> Result<(), ApplianceError> {
        for lease in leases {
            self.post("dhcp/add_static_lease", lease).await?;
        }
        Ok(())
    }

    async fn delete_dhcp_static_leases(&self, leases: &[DhcpStaticLease]) -> Result<(), ApplianceError> {
        for lease in leases {
            self.post("dhcp/remove_static_lease", lease).await?;
        }
        Ok(())
    }

    async fn setup(&self) -> Result<(), ApplianceError> {
        self.post("install/configure", &Value::Null).await
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod http_tests;
