// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn key_combines_domain_and_answer() {
    let entry = RewriteEntry {
        domain: "example.com".to_string(),
        answer: "1.2.3.4".to_string(),
    };
    assert_eq!(entry.key(), "example.com#1.2.3.4");
}

#[test]
fn same_domain_different_answer_is_a_distinct_identity() {
    let a = RewriteEntry {
        domain: "example.com".to_string(),
        answer: "1.2.3.4".to_string(),
    };
    let b = RewriteEntry {
        domain: "example.com".to_string(),
        answer: "5.6.7.8".to_string(),
    };
    assert_ne!(a.key(), b.key());
}
