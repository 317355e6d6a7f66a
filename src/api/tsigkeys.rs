// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! TSIG key operations (server-scoped, not tied to a zone).

use reqwest::Method;

use super::types::{TsigKey, TsigKeyUpsert};
use super::ApiClient;
use crate::errors::Result;

impl ApiClient {
    /// List all TSIG keys on the server.
    ///
    /// The listing omits the key material; use [`Self::get_tsigkey`]
    /// for the full record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_tsigkeys(&self) -> Result<Vec<TsigKey>> {
        let url = self.server_url("/tsigkeys");
        self.fetch_json::<(), _>("listTSIGKeys", Method::GET, &url, &[], None)
            .await
    }

    /// Fetch one TSIG key by id, including the key material.
    ///
    /// # Errors
    ///
    /// Returns an error if the key id is unknown or the request fails.
    pub async fn get_tsigkey(&self, key_id: &str) -> Result<TsigKey> {
        let url = self.server_url(&format!("/tsigkeys/{key_id}"));
        self.fetch_json::<(), _>("getTSIGKey", Method::GET, &url, &[], None)
            .await
    }

    /// Create a TSIG key. The server generates the key material when
    /// none is supplied.
    ///
    /// # Errors
    ///
    /// Returns an error if a key of the same name exists or the payload
    /// is rejected.
    pub async fn create_tsigkey(&self, key: &TsigKeyUpsert) -> Result<TsigKey> {
        let url = self.server_url("/tsigkeys");
        self.fetch_json("createTSIGKey", Method::POST, &url, &[], Some(key))
            .await
    }

    /// Update a TSIG key's algorithm and/or key material.
    ///
    /// # Errors
    ///
    /// Returns an error if the key id is unknown or the request fails.
    pub async fn put_tsigkey(&self, key_id: &str, key: &TsigKeyUpsert) -> Result<TsigKey> {
        let url = self.server_url(&format!("/tsigkeys/{key_id}"));
        self.fetch_json("putTSIGKey", Method::PUT, &url, &[], Some(key))
            .await
    }

    /// Delete a TSIG key by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the key id is unknown or the request fails.
    pub async fn delete_tsigkey(&self, key_id: &str) -> Result<()> {
        let url = self.server_url(&format!("/tsigkeys/{key_id}"));
        self.fetch_unit::<()>("deleteTSIGKey", Method::DELETE, &url, None)
            .await
    }
}
