// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn dhcp_any_is_false_when_both_sub_gates_disabled() {
    assert!(!DhcpGate::default().any());
}

#[test]
fn dhcp_any_is_true_when_one_sub_gate_enabled() {
    let gate = DhcpGate {
        server_config: false,
        static_leases: true,
    };
    assert!(gate.any());
}

#[test]
fn dns_any_is_true_when_any_sub_gate_enabled() {
    let gate = DnsGate {
        server_config: false,
        rewrites: true,
        access_lists: false,
    };
    assert!(gate.any());
}

#[test]
fn deserializes_from_camel_case_yaml() {
    let yaml = r"
dhcp:
  serverConfig: true
  staticLeases: false
dns:
  serverConfig: false
  rewrites: true
  accessLists: true
filters: true
clientSettings: false
services: true
generalSettings: true
statsConfig: false
queryLogConfig: true
";
    let gate: FeatureGate = serde_yaml::from_str(yaml).expect("parses");
    assert!(gate.dhcp.server_config);
    assert!(!gate.dhcp.static_leases);
    assert!(gate.dns.rewrites);
    assert!(gate.dns.access_lists);
    assert!(gate.filters);
    assert!(!gate.client_settings);
    assert!(gate.services);
}
