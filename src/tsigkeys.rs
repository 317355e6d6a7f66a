// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! TSIG key desired state.
//!
//! Keys are addressed by name; the server-assigned id is resolved from
//! the key listing. Key material is optional on creation (the server
//! generates it) and must be valid base64 when supplied.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;

use crate::api::types::{TsigKey, TsigKeyUpsert};
use crate::errors::{Error, Result};

/// HMAC algorithms the server accepts.
pub const ALGORITHMS: &[&str] = &[
    "hmac-md5",
    "hmac-sha1",
    "hmac-sha224",
    "hmac-sha256",
    "hmac-sha384",
    "hmac-sha512",
];

fn default_algorithm() -> String {
    "hmac-md5".to_string()
}

/// Target state of a TSIG key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyState {
    /// The key must exist and match the spec
    #[default]
    Present,
    /// The key must not exist
    Absent,
    /// Report whether the key exists, change nothing
    Exists,
}

/// One TSIG key as the operator wants it.
#[derive(Debug, Clone, Deserialize)]
pub struct TsigKeySpec {
    /// Key name
    pub name: String,
    /// Target state
    #[serde(default)]
    pub state: KeyState,
    /// HMAC algorithm
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    /// Base64-encoded key material; generated by the server when omitted
    #[serde(default)]
    pub key: Option<String>,
}

impl TsigKeySpec {
    /// Check structural invariants before any remote call.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown algorithm or key
    /// material that is not valid base64.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::validation("TSIG key name must not be empty"));
        }
        if !ALGORITHMS.contains(&self.algorithm.as_str()) {
            return Err(Error::validation(format!(
                "unknown TSIG algorithm '{}'",
                self.algorithm
            )));
        }
        if let Some(key) = &self.key {
            BASE64.decode(key).map_err(|_| {
                Error::validation(format!(
                    "TSIG key material for '{}' is not valid base64",
                    self.name
                ))
            })?;
        }
        Ok(())
    }

    /// The creation payload for a key that does not exist yet.
    #[must_use]
    pub fn creation_payload(&self) -> TsigKeyUpsert {
        TsigKeyUpsert {
            name: Some(self.name.clone()),
            algorithm: Some(self.algorithm.clone()),
            key: self.key.clone(),
        }
    }

    /// The partial update converging an existing key to this spec.
    /// Only fields that actually differ are set; an all-`None` value
    /// means the key already matches.
    #[must_use]
    pub fn update_for(&self, current: &TsigKey) -> TsigKeyUpsert {
        let mut update = TsigKeyUpsert {
            name: None,
            algorithm: None,
            key: None,
        };
        if self.algorithm != current.algorithm {
            update.algorithm = Some(self.algorithm.clone());
        }
        if let Some(key) = &self.key {
            if *key != current.key {
                update.key = Some(key.clone());
            }
        }
        update
    }
}

impl TsigKeyUpsert {
    /// True when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.algorithm.is_none() && self.key.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(yaml: &str) -> TsigKeySpec {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn existing(name: &str, algorithm: &str, key: &str) -> TsigKey {
        TsigKey {
            id: name.trim_end_matches('.').to_string(),
            name: name.to_string(),
            algorithm: algorithm.to_string(),
            key: key.to_string(),
        }
    }

    #[test]
    fn default_algorithm_is_hmac_md5() {
        let s = spec("{name: axfr-key.}");
        assert_eq!(s.algorithm, "hmac-md5");
        s.validate().unwrap();
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        let err = spec("{name: axfr-key., algorithm: hmac-sha3}")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("hmac-sha3"));
    }

    #[test]
    fn key_material_must_be_base64() {
        let err = spec("{name: axfr-key., key: 'not base64!!'}")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("base64"));

        spec("{name: axfr-key., key: 'c2VjcmV0'}").validate().unwrap();
    }

    #[test]
    fn matching_key_needs_no_update() {
        let s = spec("{name: axfr-key., algorithm: hmac-sha256, key: 'c2VjcmV0'}");
        let update = s.update_for(&existing("axfr-key.", "hmac-sha256", "c2VjcmV0"));
        assert!(update.is_empty());
    }

    #[test]
    fn only_differing_fields_are_sent() {
        let s = spec("{name: axfr-key., algorithm: hmac-sha256}");
        let update = s.update_for(&existing("axfr-key.", "hmac-md5", "c2VjcmV0"));
        assert_eq!(update.algorithm.as_deref(), Some("hmac-sha256"));
        assert!(update.key.is_none());
        assert!(update.name.is_none());
    }
}
