// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! DNSSEC cryptokey operations (zone-scoped).

use reqwest::Method;

use super::types::{Cryptokey, CryptokeyCreate, CryptokeyUpdate};
use super::ApiClient;
use crate::errors::Result;

impl ApiClient {
    /// List all cryptokeys of a zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the zone id is unknown or the request fails.
    pub async fn list_cryptokeys(&self, zone_id: &str) -> Result<Vec<Cryptokey>> {
        let url = self.server_url(&format!("/zones/{zone_id}/cryptokeys"));
        self.fetch_json::<(), _>("listCryptokeys", Method::GET, &url, &[], None)
            .await
    }

    /// Fetch one cryptokey by id, including the private key material.
    ///
    /// # Errors
    ///
    /// Returns an error if the key id is unknown or the request fails.
    pub async fn get_cryptokey(&self, zone_id: &str, key_id: &str) -> Result<Cryptokey> {
        let url = self.server_url(&format!("/zones/{zone_id}/cryptokeys/{key_id}"));
        self.fetch_json::<(), _>("getCryptokey", Method::GET, &url, &[], None)
            .await
    }

    /// Create a cryptokey (server-side generation or import).
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is rejected, e.g. an RSA
    /// algorithm without `bits`.
    pub async fn create_cryptokey(&self, zone_id: &str, key: &CryptokeyCreate) -> Result<Cryptokey> {
        let url = self.server_url(&format!("/zones/{zone_id}/cryptokeys"));
        self.fetch_json("createCryptokey", Method::POST, &url, &[], Some(key))
            .await
    }

    /// Modify a cryptokey's `active`/`published` flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the key id is unknown or the request fails.
    pub async fn modify_cryptokey(
        &self,
        zone_id: &str,
        key_id: &str,
        update: &CryptokeyUpdate,
    ) -> Result<()> {
        let url = self.server_url(&format!("/zones/{zone_id}/cryptokeys/{key_id}"));
        self.fetch_unit("modifyCryptokey", Method::PUT, &url, Some(update))
            .await
    }

    /// Delete a cryptokey by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the key id is unknown or the request fails.
    pub async fn delete_cryptokey(&self, zone_id: &str, key_id: &str) -> Result<()> {
        let url = self.server_url(&format!("/zones/{zone_id}/cryptokeys/{key_id}"));
        self.fetch_unit::<()>("deleteCryptokey", Method::DELETE, &url, None)
            .await
    }
}
