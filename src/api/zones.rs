// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone operations: list, fetch, create, update, patch, delete, and the
//! NOTIFY / AXFR-retrieve triggers.

use reqwest::Method;

use super::types::{Rrset, RrsetPatch, Zone, ZoneCreate, ZoneListEntry, ZoneUpdate};
use super::ApiClient;
use crate::errors::Result;

impl ApiClient {
    /// List zones whose name matches `name` exactly.
    ///
    /// This is the name→id resolution step: an empty result means the
    /// zone does not exist on this server.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn list_zones(&self, name: &str) -> Result<Vec<ZoneListEntry>> {
        let url = self.server_url("/zones");
        self.fetch_json::<(), _>(
            "listZones",
            Method::GET,
            &url,
            &[("zone", name)],
            None,
        )
        .await
    }

    /// Fetch full zone detail by id, optionally including the RRsets.
    ///
    /// # Errors
    ///
    /// Returns an error if the zone id is unknown or the request fails.
    pub async fn get_zone(&self, zone_id: &str, rrsets: bool) -> Result<Zone> {
        let url = self.server_url(&format!("/zones/{zone_id}"));
        let rrsets = if rrsets { "true" } else { "false" };
        self.fetch_json::<(), _>(
            "listZone",
            Method::GET,
            &url,
            &[("rrsets", rrsets)],
            None,
        )
        .await
    }

    /// Create a zone, returning the server's view of it (including the
    /// assigned id). Initial RRsets travel inside the creation payload;
    /// the response is requested without RRsets.
    ///
    /// # Errors
    ///
    /// Returns an error if the zone already exists or the payload is
    /// rejected by the server.
    pub async fn create_zone(&self, zone: &ZoneCreate) -> Result<Zone> {
        let url = self.server_url("/zones");
        self.fetch_json(
            "createZone",
            Method::POST,
            &url,
            &[("rrsets", "false")],
            Some(zone),
        )
        .await
    }

    /// Update zone properties (partial update; only set fields change).
    ///
    /// # Errors
    ///
    /// Returns an error if the zone id is unknown or the update is
    /// rejected.
    pub async fn update_zone(&self, zone_id: &str, update: &ZoneUpdate) -> Result<()> {
        let url = self.server_url(&format!("/zones/{zone_id}"));
        self.fetch_unit("putZone", Method::PUT, &url, Some(update))
            .await
    }

    /// Apply RRset changes to a zone.
    ///
    /// # Errors
    ///
    /// Returns an error if any change is rejected by the server; the
    /// server applies the patch atomically.
    pub async fn patch_rrsets(&self, zone_id: &str, rrsets: Vec<Rrset>) -> Result<()> {
        let url = self.server_url(&format!("/zones/{zone_id}"));
        let patch = RrsetPatch { rrsets };
        self.fetch_unit("patchZone", Method::PATCH, &url, Some(&patch))
            .await
    }

    /// Delete a zone by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the zone id is unknown or the deletion fails.
    pub async fn delete_zone(&self, zone_id: &str) -> Result<()> {
        let url = self.server_url(&format!("/zones/{zone_id}"));
        self.fetch_unit::<()>("deleteZone", Method::DELETE, &url, None)
            .await
    }

    /// Queue a NOTIFY to the zone's slaves.
    ///
    /// Kind gating (Master/Producer only) is enforced by the reconciler
    /// before this is called.
    ///
    /// # Errors
    ///
    /// Returns an error if the zone id is unknown or the server refuses.
    pub async fn notify_zone(&self, zone_id: &str) -> Result<()> {
        let url = self.server_url(&format!("/zones/{zone_id}/notify"));
        self.fetch_unit::<()>("notifyZone", Method::PUT, &url, None)
            .await
    }

    /// Queue retrieval of the zone from its master (AXFR).
    ///
    /// Kind gating (Slave/Consumer only) is enforced by the reconciler
    /// before this is called.
    ///
    /// # Errors
    ///
    /// Returns an error if the zone id is unknown or the server refuses.
    pub async fn retrieve_zone(&self, zone_id: &str) -> Result<()> {
        let url = self.server_url(&format!("/zones/{zone_id}/axfr-retrieve"));
        self.fetch_unit::<()>("axfrRetrieveZone", Method::PUT, &url, None)
            .await
    }
}
