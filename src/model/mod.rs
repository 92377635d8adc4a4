// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The record model: value types for every entity reconciled by this crate,
//! plus the canonicalization and equality rules that let the delta engine
//! (see [`crate::delta`]) compare them across differing JSON representations.
//!
//! Every entity here is an immutable value record: it is built fresh from an
//! appliance's JSON response at the start of a reconciliation pass and
//! discarded at the end of it. Nothing in this module performs I/O.

pub mod access_list;
pub mod client;
pub mod dhcp;
pub mod dns;
pub mod filter;
pub mod instance;
pub mod protection;
pub mod query_log;
pub mod rewrite;
pub mod stats;
pub mod status;
pub mod types;

pub use types::*;
