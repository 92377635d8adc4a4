// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn equal_intervals_are_equal() {
    let a = StatsConfig { interval: 24.0 };
    let b = StatsConfig { interval: 24.0 };
    assert!(a.equals(&b));
}

#[test]
fn differing_intervals_are_unequal() {
    let a = StatsConfig { interval: 24.0 };
    let b = StatsConfig { interval: 1.0 };
    assert!(!a.equals(&b));
}
