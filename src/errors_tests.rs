// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use super::*;

fn protocol(status: u16) -> ApplianceError {
    ApplianceError::Protocol {
        url: "https://appliance".to_string(),
        status,
        body: String::new(),
    }
}

#[test]
fn server_errors_are_transient() {
    assert!(protocol(500).is_transient());
    assert!(protocol(503).is_transient());
    assert!(protocol(429).is_transient());
}

#[test]
fn client_errors_are_not_transient() {
    assert!(!protocol(404).is_transient());
    assert!(!protocol(400).is_transient());
}

#[test]
fn auth_and_setup_and_version_errors_are_not_transient() {
    assert!(!ApplianceError::Auth {
        url: "https://appliance".to_string(),
        status: 401,
    }
    .is_transient());
    assert!(!ApplianceError::SetupNeeded {
        url: "https://appliance".to_string(),
    }
    .is_transient());
    assert!(!ApplianceError::VersionUnsupported {
        url: "https://appliance".to_string(),
        found: "v0.106.0".to_string(),
        minimum: "v0.107.0".to_string(),
    }
    .is_transient());
}

#[test]
fn status_reason_is_stable() {
    assert_eq!(protocol(500).status_reason(), "protocol");
    assert_eq!(
        ApplianceError::SetupNeeded {
            url: "https://appliance".to_string()
        }
        .status_reason(),
        "setup_needed"
    );
}

#[test]
fn only_origin_errors_abort_the_pass() {
    let origin_err = ReconcileError::Origin(protocol(500));
    assert!(origin_err.aborts_pass());

    let replica_err = ReconcileError::ReplicaNotReady {
        replica: "https://replica#/control".to_string(),
        source: protocol(500),
    };
    assert!(!replica_err.aborts_pass());
}
