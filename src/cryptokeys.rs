// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! DNSSEC cryptokey desired state.
//!
//! A key is either generated on the server (an `algorithm`, plus `bits`
//! for the RSA family) or imported (a `dnskey` record together with its
//! `privatekey` in ISC format). Only the `active` and `published` flags
//! can change after creation; everything else requires a new key.

use serde::Deserialize;

use crate::api::types::{CryptokeyCreate, CryptokeyUpdate, KeyType};
use crate::errors::{Error, Result};

/// Default size for generated RSA keys.
pub const DEFAULT_RSA_BITS: u32 = 4096;

fn default_bits() -> u32 {
    DEFAULT_RSA_BITS
}

fn default_published() -> bool {
    true
}

/// Target state of a cryptokey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyState {
    /// The key must exist; with an id, its flags are updated
    #[default]
    Present,
    /// The key must be removed
    Absent,
    /// Report the zone's keys, change nothing
    Exists,
}

/// One cryptokey as the operator wants it.
#[derive(Debug, Clone, Deserialize)]
pub struct CryptokeySpec {
    /// Zone the key belongs to
    pub zone: String,
    /// Target state
    #[serde(default)]
    pub state: KeyState,
    /// Server-assigned key id; identifies an existing key for update,
    /// deletion, or a targeted existence check
    #[serde(default)]
    pub id: Option<String>,
    /// Key role; required for creation
    #[serde(default)]
    pub keytype: Option<KeyType>,
    /// Whether the key signs
    #[serde(default)]
    pub active: bool,
    /// Whether the DNSKEY record is published
    #[serde(default = "default_published")]
    pub published: bool,
    /// Algorithm mnemonic for server-side generation
    #[serde(default)]
    pub algorithm: Option<String>,
    /// Key size for generated RSA keys
    #[serde(default = "default_bits")]
    pub bits: u32,
    /// DNSKEY record content for import
    #[serde(default)]
    pub dnskey: Option<String>,
    /// Private key in ISC format for import
    #[serde(default)]
    pub privatekey: Option<String>,
}

impl CryptokeySpec {
    /// Check structural invariants before any remote call.
    ///
    /// # Errors
    ///
    /// Returns a validation error when an absent state carries no id.
    pub fn validate(&self) -> Result<()> {
        if self.zone.is_empty() {
            return Err(Error::validation("cryptokey 'zone' must not be empty"));
        }
        if self.state == KeyState::Absent && self.id.is_none() {
            return Err(Error::validation(
                "cryptokey deletion requires an 'id'",
            ));
        }
        Ok(())
    }

    /// Build the creation payload for a new key.
    ///
    /// # Errors
    ///
    /// Returns a validation error when neither the generated form
    /// (`algorithm`) nor the imported form (`dnskey` + `privatekey`) is
    /// fully specified, or when `keytype` is missing.
    pub fn creation_payload(&self) -> Result<CryptokeyCreate> {
        let Some(keytype) = self.keytype else {
            return Err(Error::validation(
                "missing 'keytype' in cryptokey definition",
            ));
        };

        let mut create = CryptokeyCreate {
            keytype,
            active: self.active,
            published: self.published,
            algorithm: None,
            bits: None,
            dnskey: None,
            privatekey: None,
        };

        if let Some(algorithm) = &self.algorithm {
            create.algorithm = Some(algorithm.clone());
            if algorithm.to_lowercase().contains("rsa") {
                create.bits = Some(self.bits);
            }
        } else if let (Some(dnskey), Some(privatekey)) = (&self.dnskey, &self.privatekey) {
            create.dnskey = Some(dnskey.clone());
            create.privatekey = Some(privatekey.clone());
        } else {
            return Err(Error::validation(
                "cryptokey creation needs either 'algorithm' or both 'dnskey' and 'privatekey'",
            ));
        }

        Ok(create)
    }

    /// The flag update applied to an existing key.
    #[must_use]
    pub fn flag_update(&self) -> CryptokeyUpdate {
        CryptokeyUpdate {
            active: self.active,
            published: self.published,
        }
    }
}
