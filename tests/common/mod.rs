// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Common test utilities: a mock PowerDNS API and JSON fixtures.

use serde_json::{json, Value};
use wiremock::MockServer;

use pdnsctl::api::ApiClient;

pub const API_KEY: &str = "test-key";
pub const SERVER: &str = "/api/v1/servers/localhost";

/// Start a mock server and a client pointed at it.
pub async fn mock_client() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::new(&server.uri(), API_KEY, "localhost").unwrap();
    (server, client)
}

/// A zone listing entry as returned by `GET /zones?zone={name}`.
pub fn zone_listing(name: &str) -> Value {
    json!([{ "id": name, "name": name }])
}

/// A full zone document with the given kind and no special settings.
pub fn zone_detail(name: &str, kind: &str) -> Value {
    json!({
        "id": name,
        "name": name,
        "kind": kind,
        "serial": 2024010101u32,
        "account": "",
        "dnssec": false,
        "masters": [],
        "api_rectify": false,
        "nsec3narrow": false,
        "nsec3param": "",
        "presigned": false,
        "soa_edit": "",
        "soa_edit_api": "",
        "master_tsig_key_ids": [],
        "slave_tsig_key_ids": [],
    })
}

/// A zone document including RRsets.
pub fn zone_with_rrsets(name: &str, kind: &str, rrsets: Value) -> Value {
    let mut zone = zone_detail(name, kind);
    zone["rrsets"] = rrsets;
    zone
}
