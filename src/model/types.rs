// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Re-export hub for the record model.
//!
//! Sibling modules pull the whole record vocabulary in with
//! `use super::types::*;` rather than naming each submodule individually.

pub use super::access_list::AccessList;
pub use super::client::Client;
pub use super::dhcp::{DhcpStaticLease, DhcpStatus};
pub use super::dns::DnsConfig;
pub use super::filter::{Filter, FilteringConfig};
pub use super::instance::{unique_replicas, InstanceDescriptor};
pub use super::protection::Protection;
pub use super::query_log::QueryLogConfig;
pub use super::rewrite::RewriteEntry;
pub use super::stats::StatsConfig;
pub use super::status::Status;
