// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone metadata operations.
//!
//! The server stores each metadata setting as an opaque list of strings
//! under a kind tag; the typed registry in [`crate::metadata`] gives
//! these values their semantics.

use reqwest::Method;

use super::types::MetadataEntry;
use super::ApiClient;
use crate::errors::Result;

impl ApiClient {
    /// List all metadata items attached to a zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the zone id is unknown or the request fails.
    pub async fn list_metadata(&self, zone_id: &str) -> Result<Vec<MetadataEntry>> {
        let url = self.server_url(&format!("/zones/{zone_id}/metadata"));
        self.fetch_json::<(), _>("listMetadata", Method::GET, &url, &[], None)
            .await
    }

    /// Replace the value list stored under one metadata kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the kind is rejected (e.g. read-only on the
    /// server side) or the request fails.
    pub async fn modify_metadata(&self, zone_id: &str, kind: &str, values: Vec<String>) -> Result<()> {
        let url = self.server_url(&format!("/zones/{zone_id}/metadata/{kind}"));
        let entry = MetadataEntry {
            kind: kind.to_string(),
            metadata: values,
        };
        self.fetch_unit("modifyMetadata", Method::PUT, &url, Some(&entry))
            .await
    }

    /// Remove all values stored under one metadata kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_metadata(&self, zone_id: &str, kind: &str) -> Result<()> {
        let url = self.server_url(&format!("/zones/{zone_id}/metadata/{kind}"));
        self.fetch_unit::<()>("deleteMetadata", Method::DELETE, &url, None)
            .await
    }
}
