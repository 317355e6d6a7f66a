// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # pdnsctl - Declarative zone management for PowerDNS Authoritative
//!
//! This library converges a PowerDNS Authoritative server to a desired
//! state described in plain data: zones, resource-record sets, zone
//! metadata, DNSSEC cryptokeys and TSIG keys.
//!
//! ## Overview
//!
//! Every operation follows the same shape: validate the desired state,
//! read the server, compute the minimal difference, apply it, and report
//! the resulting state. Applying the same desired state twice performs
//! no mutation on the second run; that idempotence is the crate's core
//! contract and its recovery mechanism, since every failure is fatal to
//! the running invocation and handled by simply re-running it.
//!
//! ## Modules
//!
//! - [`api`] - typed client for the PowerDNS Authoritative HTTP API
//! - [`zones`] - zone desired state, creation expansion and the property differ
//! - [`metadata`] - typed registry for zone metadata settings
//! - [`rrsets`] - RRset desired state and the patch planner
//! - [`cryptokeys`] - DNSSEC cryptokey desired state
//! - [`tsigkeys`] - TSIG key desired state
//! - [`reconciler`] - drivers that tie the differs to the API client
//! - [`errors`] - the failure taxonomy
//!
//! ## Example
//!
//! ```rust,no_run
//! use pdnsctl::api::ApiClient;
//! use pdnsctl::reconciler::apply_zone;
//! use pdnsctl::zones::ZoneSpec;
//!
//! # async fn run() -> pdnsctl::errors::Result<()> {
//! let spec: ZoneSpec = serde_yaml::from_str(
//!     r#"
//! name: example.org.
//! properties:
//!   kind: Native
//!   soa:
//!     mname: ns1.example.org.
//!     rname: admin.example.org.
//!   nameservers: [ns1.example.org.]
//! metadata:
//!   api_rectify: true
//! "#,
//! )
//! .unwrap();
//!
//! let client = ApiClient::new("http://localhost:8081", "secret", "localhost")?;
//! let outcome = apply_zone(&client, &spec).await?;
//! assert!(outcome.zone.exists);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cryptokeys;
pub mod errors;
pub mod metadata;
pub mod reconciler;
pub mod rrsets;
pub mod tsigkeys;
pub mod zones;
