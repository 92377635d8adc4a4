// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use super::*;

fn descriptor(url: &str, api_path: &str) -> InstanceDescriptor {
    InstanceDescriptor {
        url: url.to_string(),
        api_path: api_path.to_string(),
        username: None,
        password: None,
        insecure_skip_verify: false,
        auto_setup: false,
    }
}

#[test]
fn key_combines_url_and_effective_api_path() {
    // Arrange
    let with_path = descriptor("https://agh.example.com", "/control");
    let without_path = descriptor("https://agh.example.com", "");

    // Act / Assert: empty api_path substitutes the default, so both keys match.
    assert_eq!(with_path.key(), without_path.key());
    assert_eq!(with_path.key(), "https://agh.example.com#/control");
}

#[test]
fn unique_replicas_empty_input_yields_empty_output() {
    assert!(unique_replicas(&[]).is_empty());
}

#[test]
fn unique_replicas_drops_empty_url_entries() {
    // Arrange
    let replicas = vec![descriptor("", ""), descriptor("https://a.example.com", "")];

    // Act
    let result = unique_replicas(&replicas);

    // Assert
    assert_eq!(result.len(), 1, "the empty-URL entry must be skipped");
    assert_eq!(result[0].url, "https://a.example.com");
}

#[test]
fn unique_replicas_dedups_by_url_and_api_path() {
    // Arrange: same URL+path twice, a differing path counts as a distinct instance.
    let replicas = vec![
        descriptor("https://a.example.com", "/control"),
        descriptor("https://a.example.com", "/control"),
        descriptor("https://a.example.com", "/other"),
    ];

    // Act
    let result = unique_replicas(&replicas);

    // Assert
    assert_eq!(result.len(), 2, "duplicate key collapses, distinct path does not");
}

#[test]
fn unique_replicas_substitutes_default_api_path() {
    // Arrange
    let replicas = vec![descriptor("https://a.example.com", "")];

    // Act
    let result = unique_replicas(&replicas);

    // Assert
    assert_eq!(result[0].effective_api_path(), crate::constants::DEFAULT_API_PATH);
}
