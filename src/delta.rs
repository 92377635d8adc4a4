// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Pure functions computing `(adds, updates, removes)` deltas between a
//! replica's current state and the origin's desired state.
//!
//! Every function here is deterministic and side-effect free: given the same
//! two slices it always returns the same delta, sorted by identity so that
//! logs and tests don't depend on hash-map iteration order. The
//! [`crate::reconciler::worker`] module is the only caller; it turns these
//! deltas into appliance client calls.

use crate::model::{Client, DhcpStaticLease, Filter, RewriteEntry};

/// Generic two-way delta over a collection keyed by an identity function,
/// with a caller-supplied equality used to distinguish "unchanged" from
/// "changed" among entries present on both sides.
///
/// Returns `(adds, updates, removes)` where:
/// - `adds` are desired entries whose identity is absent from `current`,
/// - `updates` are desired entries whose identity is present in `current`
///   but not equal to it,
/// - `removes` are current entries whose identity is absent from `desired`.
///
/// All three are sorted by identity for deterministic output.
pub fn delta<T, K, I, E>(current: &[T], desired: &[T], identity: I, equals: E) -> (Vec<T>, Vec<T>, Vec<T>)
where
    T: Clone,
    K: Ord + Clone + std::hash::Hash + Eq,
    I: Fn(&T) -> K,
    E: Fn(&T, &T) -> bool,
{
    let mut current_by_key: std::collections::HashMap<K, &T> =
        std::collections::HashMap::with_capacity(current.len());
    for item in current {
        current_by_key.entry(identity(item)).or_insert(item);
    }

    let mut adds = Vec::new();
    let mut updates = Vec::new();
    let mut matched: std::collections::HashSet<K> = std::collections::HashSet::new();

    for item in desired {
        let key = identity(item);
        match current_by_key.get(&key) {
            Some(existing) => {
                matched.insert(key);
                if !equals(existing, item) {
                    updates.push(item.clone());
                }
            }
            None => adds.push(item.clone()),
        }
    }

    let mut removes: Vec<T> = current_by_key
        .into_iter()
        .filter(|(key, _)| !matched.contains(key))
        .map(|(_, item)| item.clone())
        .collect();

    sort_by_key(&mut adds, &identity);
    sort_by_key(&mut updates, &identity);
    sort_by_key(&mut removes, &identity);

    (adds, updates, removes)
}

fn sort_by_key<T, K: Ord, I: Fn(&T) -> K>(items: &mut [T], identity: &I) {
    items.sort_by_key(identity);
}

/// Delta for filter list subscriptions within one channel (normal or
/// whitelist). The reconciler calls this twice, once per channel.
#[must_use]
pub fn filter_delta(current: &[Filter], desired: &[Filter]) -> (Vec<Filter>, Vec<Filter>, Vec<Filter>) {
    delta(
        current,
        desired,
        |f: &Filter| f.key().to_string(),
        |a, b| a == b,
    )
}

/// Delta for client policy records. Removes carry only the client name,
/// matching the mutation endpoint's delete-by-name contract.
#[must_use]
pub fn client_delta(current: &[Client], desired: &[Client]) -> (Vec<Client>, Vec<Client>, Vec<String>) {
    let (adds, updates, removed) = delta(
        current,
        desired,
        |c: &Client| c.key().to_string(),
        Client::equals,
    );
    let mut removes: Vec<String> = removed.into_iter().map(|c| c.name).collect();
    removes.sort();
    (adds, updates, removes)
}

/// MAC-keyed delta for DHCP static leases.
///
/// Matches by MAC address only: a lease whose MAC is present on both sides
/// is left alone even if its IP or hostname differs, since the appliance's
/// static-lease endpoints only support add/delete, not update. This mirrors
/// the presence-only merge the appliance's own DHCP reconciliation performs.
#[must_use]
pub fn lease_delta(
    current: &[DhcpStaticLease],
    desired: &[DhcpStaticLease],
) -> (Vec<DhcpStaticLease>, Vec<DhcpStaticLease>) {
    let mut remaining: std::collections::HashMap<&str, &DhcpStaticLease> =
        std::collections::HashMap::with_capacity(current.len());
    for lease in current {
        remaining.entry(lease.key()).or_insert(lease);
    }

    let mut adds = Vec::new();
    for lease in desired {
        if remaining.remove(lease.key()).is_none() {
            adds.push(lease.clone());
        }
    }

    let mut removes: Vec<DhcpStaticLease> = remaining.into_values().cloned().collect();
    adds.sort_by(|a, b| a.key().cmp(b.key()));
    removes.sort_by(|a, b| a.key().cmp(b.key()));
    (adds, removes)
}

/// Three-way delta for rewrite entries, with the duplicate-handling
/// semantics the rest of this crate's rewrite reconciliation depends on.
///
/// Unlike every other delta in this module, duplicate identities *within*
/// one side are significant, not collapsed:
/// - A second-and-later copy of a key already present on the replica
///   (`current`) is appended to `removes`, since the appliance only ever
///   stores one entry per exact `(domain, answer)` pair and the duplicate
///   must be cleaned up.
/// - A second-and-later copy of a key on the origin (`desired`) that is not
///   needed to satisfy an add or a match against `current` is appended to
///   `duplicates` and is *not* propagated to the replica — propagating it
///   would just recreate the same duplicate there.
///
/// Returns `(adds, removes, duplicates)`.
#[must_use]
pub fn rewrite_delta(
    current: &[RewriteEntry],
    desired: &[RewriteEntry],
) -> (Vec<RewriteEntry>, Vec<RewriteEntry>, Vec<RewriteEntry>) {
    let mut processed: std::collections::HashMap<String, bool> = std::collections::HashMap::new();
    let mut current_keys: std::collections::HashSet<String> =
        std::collections::HashSet::with_capacity(current.len());

    let mut removes = Vec::new();
    for entry in current {
        let key = entry.key();
        if *processed.get(&key).unwrap_or(&false) {
            removes.push(entry.clone());
        } else {
            processed.insert(key.clone(), true);
            current_keys.insert(key);
        }
    }

    let mut adds = Vec::new();
    let mut duplicates = Vec::new();
    let mut seen_desired: std::collections::HashSet<String> = std::collections::HashSet::new();
    for entry in desired {
        let key = entry.key();
        if seen_desired.contains(&key) {
            duplicates.push(entry.clone());
            continue;
        }
        seen_desired.insert(key.clone());
        if !current_keys.contains(&key) {
            adds.push(entry.clone());
        }
    }

    // Anything present on the replica but no longer desired must also go.
    for key in current_keys.iter() {
        if !seen_desired.contains(key) {
            if let Some(entry) = current.iter().find(|e| &e.key() == key) {
                removes.push(entry.clone());
            }
        }
    }

    adds.sort_by_key(RewriteEntry::key);
    removes.sort_by_key(RewriteEntry::key);
    duplicates.sort_by_key(RewriteEntry::key);
    (adds, removes, duplicates)
}

#[cfg(test)]
#[path = "delta_tests.rs"]
mod delta_tests;
