// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn equals_is_reflexive() {
    let p = Protection {
        protection_enabled: true,
        parental_enabled: false,
        safe_search_enabled: true,
        safe_browsing_enabled: false,
    };
    assert!(p.equals(&p));
}

#[test]
fn differing_toggle_is_unequal() {
    let a = Protection {
        protection_enabled: true,
        ..Default::default()
    };
    let b = Protection {
        protection_enabled: false,
        ..Default::default()
    };
    assert!(!a.equals(&b));
}
