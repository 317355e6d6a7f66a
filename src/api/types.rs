// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Wire types for the PowerDNS Authoritative HTTP API (v1).
//!
//! These structs mirror the JSON documents exchanged with the server.
//! Desired-state (caller-facing) types live in [`crate::zones`] and
//! [`crate::rrsets`]; everything here is the remote representation.

use serde::{Deserialize, Serialize};

/// Zone kind as stored by the server.
///
/// `Producer` and `Consumer` are the catalog-zone variants introduced in
/// server version 4.7.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneKind {
    /// Zone served from the local backend, no replication
    Native,
    /// Primary zone, transfer source
    Master,
    /// Secondary zone, transfer sink
    Slave,
    /// Catalog zone producer (transfer source)
    Producer,
    /// Catalog zone consumer (transfer sink)
    Consumer,
}

impl ZoneKind {
    /// True for kinds that can act as a zone-transfer source (NOTIFY senders).
    #[must_use]
    pub fn is_transfer_source(self) -> bool {
        matches!(self, Self::Master | Self::Producer)
    }

    /// True for kinds that can act as a zone-transfer sink (AXFR retrievers).
    #[must_use]
    pub fn is_transfer_sink(self) -> bool {
        matches!(self, Self::Slave | Self::Consumer)
    }

    /// The canonical server-side spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Native => "Native",
            Self::Master => "Master",
            Self::Slave => "Slave",
            Self::Producer => "Producer",
            Self::Consumer => "Consumer",
        }
    }
}

impl std::fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record inside an RRset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Record content in zone-file format (e.g. `192.0.2.1`)
    pub content: String,
    /// Whether the record is disabled (not served)
    #[serde(default)]
    pub disabled: bool,
}

/// Patch operation for an RRset, as understood by `PATCH /zones/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeType {
    /// Replace the whole RRset with the supplied records
    Replace,
    /// Remove the whole RRset
    Delete,
}

/// A named, typed resource-record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rrset {
    /// Owner name, absolute
    pub name: String,
    /// Record type tag (e.g. `A`, `MX`)
    #[serde(rename = "type")]
    pub rtype: String,
    /// TTL in seconds
    #[serde(default)]
    pub ttl: u32,
    /// The records of the set
    #[serde(default)]
    pub records: Vec<Record>,
    /// Present only in patch payloads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changetype: Option<ChangeType>,
}

/// Abbreviated zone entry returned by `GET /zones?zone={name}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneListEntry {
    /// Server-assigned zone id, used for all subsequent calls
    pub id: String,
    /// Zone name, absolute
    pub name: String,
}

/// Full zone detail returned by `GET /zones/{id}`.
///
/// The `api_rectify`/`nsec3*`/`presigned`/`soa_edit*` fields and the TSIG
/// key-id lists are metadata settings the server stores as zone fields
/// rather than metadata items; the typed registry reconciles them through
/// zone updates (see [`crate::metadata`]).
#[derive(Debug, Clone, Deserialize)]
pub struct Zone {
    /// Server-assigned zone id
    pub id: String,
    /// Zone name, absolute
    pub name: String,
    /// Zone kind
    pub kind: ZoneKind,
    /// Serial number from the SOA record
    #[serde(default)]
    pub serial: u32,
    /// Free-text label used for local policy
    #[serde(default)]
    pub account: String,
    /// Name of the catalog zone containing this zone, if any
    #[serde(default)]
    pub catalog: Option<String>,
    /// Whether the zone is signed with DNSSEC
    #[serde(default)]
    pub dnssec: bool,
    /// IP addresses of masters (Slave/Consumer zones only)
    #[serde(default)]
    pub masters: Vec<String>,
    /// Rectify record sets after API changes (API-RECTIFY)
    #[serde(default)]
    pub api_rectify: bool,
    /// NSEC3 narrow mode (NSEC3NARROW)
    #[serde(default)]
    pub nsec3narrow: bool,
    /// NSEC3 parameters (NSEC3PARAM)
    #[serde(default)]
    pub nsec3param: String,
    /// Zone carries pre-signed RRSIGs (PRESIGNED, read-only)
    #[serde(default)]
    pub presigned: bool,
    /// Serial-edit method when serving (SOA-EDIT)
    #[serde(default)]
    pub soa_edit: String,
    /// Serial-edit method after API edits (SOA-EDIT-API)
    #[serde(default)]
    pub soa_edit_api: String,
    /// TSIG key ids for master operation (TSIG-ALLOW-AXFR).
    /// The server only honors the first entry.
    #[serde(default)]
    pub master_tsig_key_ids: Vec<String>,
    /// TSIG key ids for slave operation (AXFR-MASTER-TSIG).
    /// The server only honors the first entry.
    #[serde(default)]
    pub slave_tsig_key_ids: Vec<String>,
    /// Record sets, present only when requested with `rrsets=true`
    #[serde(default)]
    pub rrsets: Option<Vec<Rrset>>,
}

/// Partial zone update for `PUT /zones/{id}`.
///
/// Only fields that actually changed are serialized; an all-`None` value
/// means the zone is converged and no request should be made.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ZoneUpdate {
    /// New zone kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ZoneKind>,
    /// New master address list (Slave/Consumer)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masters: Option<Vec<String>>,
    /// New account label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    /// New containing catalog zone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    /// API-RECTIFY
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_rectify: Option<bool>,
    /// NSEC3NARROW
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nsec3narrow: Option<bool>,
    /// NSEC3PARAM
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nsec3param: Option<String>,
    /// SOA-EDIT
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soa_edit: Option<String>,
    /// SOA-EDIT-API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soa_edit_api: Option<String>,
    /// TSIG-ALLOW-AXFR
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_tsig_key_ids: Option<Vec<String>>,
    /// AXFR-MASTER-TSIG
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slave_tsig_key_ids: Option<Vec<String>>,
}

impl ZoneUpdate {
    /// True when no field is set, i.e. the zone needs no property update.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Zone creation payload for `POST /zones`.
#[derive(Debug, Clone, Serialize)]
pub struct ZoneCreate {
    /// Zone name, absolute
    pub name: String,
    /// Zone kind, required at creation
    pub kind: ZoneKind,
    /// Nameserver list. Always empty for primary kinds because NS records
    /// are supplied through `rrsets` instead; omitted for secondary kinds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nameservers: Option<Vec<String>>,
    /// Initial record sets (SOA + NS + caller extras)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rrsets: Option<Vec<Rrset>>,
    /// Remaining creation-time fields share the update representation
    #[serde(flatten)]
    pub fields: ZoneUpdate,
}

/// RRset patch payload for `PATCH /zones/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct RrsetPatch {
    /// The RRset changes to apply
    pub rrsets: Vec<Rrset>,
}

/// One metadata item as listed by `GET /zones/{id}/metadata`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// Metadata kind tag (e.g. `ALLOW-AXFR-FROM`)
    pub kind: String,
    /// Raw string values stored under the kind
    pub metadata: Vec<String>,
}

/// DNSSEC key role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    /// Zone-signing key
    Zsk,
    /// Key-signing key
    Ksk,
    /// Combined signing key
    Csk,
}

/// A DNSSEC cryptokey as returned by the server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Cryptokey {
    /// Server-assigned key id
    pub id: u64,
    /// Key role
    pub keytype: KeyType,
    /// Whether the key is used for signing
    #[serde(default)]
    pub active: bool,
    /// Whether the DNSKEY record is published
    #[serde(default)]
    pub published: bool,
    /// Signing algorithm mnemonic
    #[serde(default)]
    pub algorithm: Option<String>,
    /// Key size in bits
    #[serde(default)]
    pub bits: Option<u32>,
    /// DNSKEY record content
    #[serde(default)]
    pub dnskey: Option<String>,
    /// DS records for the parent zone (ksk/csk only, derived)
    #[serde(default)]
    pub ds: Option<Vec<String>>,
}

/// Cryptokey creation payload.
///
/// Either `algorithm` (server-side generation, `bits` required for RSA)
/// or `dnskey` + `privatekey` (import) must be supplied; the manager
/// enforces this before the request is built.
#[derive(Debug, Clone, Serialize)]
pub struct CryptokeyCreate {
    /// Key role
    pub keytype: KeyType,
    /// Whether the key should sign immediately
    pub active: bool,
    /// Whether the DNSKEY record should be published
    pub published: bool,
    /// Algorithm mnemonic for generated keys
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    /// Key size for generated RSA keys
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bits: Option<u32>,
    /// DNSKEY record content for imported keys
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dnskey: Option<String>,
    /// Private key material for imported keys (write-only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privatekey: Option<String>,
}

/// Cryptokey modification payload; only these two fields are mutable.
#[derive(Debug, Clone, Serialize)]
pub struct CryptokeyUpdate {
    /// Whether the key is used for signing
    pub active: bool,
    /// Whether the DNSKEY record is published
    pub published: bool,
}

/// A TSIG key.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TsigKey {
    /// Server-assigned key id (URL-safe form of the name)
    #[serde(default)]
    pub id: String,
    /// Key name
    pub name: String,
    /// HMAC algorithm (e.g. `hmac-sha256`)
    #[serde(default)]
    pub algorithm: String,
    /// Base64-encoded key material
    #[serde(default)]
    pub key: String,
}

/// TSIG key creation/update payload.
#[derive(Debug, Clone, Serialize)]
pub struct TsigKeyUpsert {
    /// Key name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// HMAC algorithm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    /// Base64-encoded key material; generated by the server when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_kind_round_trip() {
        for (kind, s) in [
            (ZoneKind::Native, "\"Native\""),
            (ZoneKind::Master, "\"Master\""),
            (ZoneKind::Slave, "\"Slave\""),
            (ZoneKind::Producer, "\"Producer\""),
            (ZoneKind::Consumer, "\"Consumer\""),
        ] {
            assert_eq!(serde_json::to_string(&kind).unwrap(), s);
            let back: ZoneKind = serde_json::from_str(s).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn zone_kind_gating() {
        assert!(ZoneKind::Master.is_transfer_source());
        assert!(ZoneKind::Producer.is_transfer_source());
        assert!(!ZoneKind::Slave.is_transfer_source());
        assert!(ZoneKind::Slave.is_transfer_sink());
        assert!(ZoneKind::Consumer.is_transfer_sink());
        assert!(!ZoneKind::Native.is_transfer_sink());
        assert!(!ZoneKind::Native.is_transfer_source());
    }

    #[test]
    fn changetype_wire_spelling() {
        assert_eq!(
            serde_json::to_string(&ChangeType::Replace).unwrap(),
            "\"REPLACE\""
        );
        assert_eq!(
            serde_json::to_string(&ChangeType::Delete).unwrap(),
            "\"DELETE\""
        );
    }

    #[test]
    fn empty_update_serializes_to_empty_object() {
        let update = ZoneUpdate::default();
        assert!(update.is_empty());
        assert_eq!(serde_json::to_string(&update).unwrap(), "{}");
    }

    #[test]
    fn update_serializes_only_set_fields() {
        let update = ZoneUpdate {
            kind: Some(ZoneKind::Master),
            account: Some("ops".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "Master", "account": "ops"}));
    }

    #[test]
    fn zone_detail_tolerates_missing_optionals() {
        let zone: Zone = serde_json::from_value(serde_json::json!({
            "id": "example.org.",
            "name": "example.org.",
            "kind": "Native",
        }))
        .unwrap();
        assert_eq!(zone.serial, 0);
        assert!(zone.catalog.is_none());
        assert!(zone.masters.is_empty());
        assert!(zone.rrsets.is_none());
        assert!(!zone.presigned);
    }

    #[test]
    fn rrset_serializes_type_tag() {
        let rrset = Rrset {
            name: "www.example.org.".into(),
            rtype: "A".into(),
            ttl: 3600,
            records: vec![Record {
                content: "192.0.2.1".into(),
                disabled: false,
            }],
            changetype: Some(ChangeType::Replace),
        };
        let json = serde_json::to_value(&rrset).unwrap();
        assert_eq!(json["type"], "A");
        assert_eq!(json["changetype"], "REPLACE");
    }
}
