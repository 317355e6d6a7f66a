// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Typed registry for zone metadata settings.
//!
//! The server stores every metadata setting as an untyped list of strings
//! under a kind tag, and additionally surfaces a handful of them as fields
//! on the zone document itself. This module is the single place that knows,
//! for each supported kind:
//!
//! - its value type (boolean, presence, ternary, string, string list)
//! - whether it is mutable through the API
//! - which channel reconciles it (the metadata endpoint, or a zone field)
//!
//! Callers address settings by their semantic key, the kind tag lowercased
//! with `-` replaced by `_` (e.g. `ALLOW-AXFR-FROM` becomes
//! `allow_axfr_from`). The registry handles decoding observed state,
//! diffing it against desired state, and producing the wire operations
//! that converge the two.

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use crate::api::types::{MetadataEntry, Zone, ZoneUpdate};
use crate::errors::{Error, Result};

/// How a metadata setting's string values are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// On/off, stored as `["1"]` when on and absent when off
    Boolean,
    /// On/off, stored as `[""]` when on and absent when off
    Presence,
    /// Explicit yes/no/unset, stored as `["1"]`, `["0"]`, or absent
    Ternary,
    /// Free-form string list, stored verbatim
    StringList,
    /// Single free-form string
    Str,
}

/// Which API surface reconciles a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// `PUT`/`DELETE` on `/zones/{id}/metadata/{kind}`
    Endpoint,
    /// Field of the zone document, changed through a zone update
    ZoneField(&'static str),
}

/// One registry row.
#[derive(Debug, Clone, Copy)]
pub struct MetaItem {
    /// Server-side kind tag
    pub kind: &'static str,
    /// Value interpretation
    pub value_type: ValueType,
    /// Read-only settings are reported but can never be written
    pub immutable: bool,
    /// Reconciliation channel
    pub channel: Channel,
}

/// Every metadata kind the reconciler understands.
///
/// Kinds absent from this table are left untouched on the server, so
/// out-of-band settings (e.g. `X-` custom metadata) survive reconciliation.
pub static REGISTRY: &[MetaItem] = &[
    MetaItem {
        kind: "ALLOW-AXFR-FROM",
        value_type: ValueType::StringList,
        immutable: false,
        channel: Channel::Endpoint,
    },
    MetaItem {
        kind: "ALLOW-DNSUPDATE-FROM",
        value_type: ValueType::StringList,
        immutable: false,
        channel: Channel::Endpoint,
    },
    MetaItem {
        kind: "ALSO-NOTIFY",
        value_type: ValueType::StringList,
        immutable: false,
        channel: Channel::Endpoint,
    },
    MetaItem {
        kind: "API-RECTIFY",
        value_type: ValueType::Boolean,
        immutable: false,
        channel: Channel::ZoneField("api_rectify"),
    },
    MetaItem {
        kind: "AXFR-MASTER-TSIG",
        value_type: ValueType::StringList,
        immutable: false,
        channel: Channel::ZoneField("slave_tsig_key_ids"),
    },
    MetaItem {
        kind: "AXFR-SOURCE",
        value_type: ValueType::Str,
        immutable: false,
        channel: Channel::Endpoint,
    },
    MetaItem {
        kind: "FORWARD-DNSUPDATE",
        value_type: ValueType::Presence,
        immutable: false,
        channel: Channel::Endpoint,
    },
    MetaItem {
        kind: "GSS-ACCEPTOR-PRINCIPAL",
        value_type: ValueType::Str,
        immutable: false,
        channel: Channel::Endpoint,
    },
    MetaItem {
        kind: "GSS-ALLOW-AXFR-PRINCIPAL",
        value_type: ValueType::Str,
        immutable: false,
        channel: Channel::Endpoint,
    },
    MetaItem {
        kind: "IXFR",
        value_type: ValueType::Boolean,
        immutable: false,
        channel: Channel::Endpoint,
    },
    MetaItem {
        kind: "LUA-AXFR-SCRIPT",
        value_type: ValueType::Str,
        immutable: true,
        channel: Channel::Endpoint,
    },
    MetaItem {
        kind: "NOTIFY-DNSUPDATE",
        value_type: ValueType::Boolean,
        immutable: false,
        channel: Channel::Endpoint,
    },
    MetaItem {
        kind: "NSEC3NARROW",
        value_type: ValueType::Boolean,
        immutable: false,
        channel: Channel::ZoneField("nsec3narrow"),
    },
    MetaItem {
        kind: "NSEC3PARAM",
        value_type: ValueType::Str,
        immutable: false,
        channel: Channel::ZoneField("nsec3param"),
    },
    MetaItem {
        kind: "PRESIGNED",
        value_type: ValueType::Boolean,
        immutable: true,
        channel: Channel::ZoneField("presigned"),
    },
    MetaItem {
        kind: "PUBLISH-CDNSKEY",
        value_type: ValueType::Boolean,
        immutable: false,
        channel: Channel::Endpoint,
    },
    MetaItem {
        kind: "PUBLISH-CDS",
        value_type: ValueType::StringList,
        immutable: false,
        channel: Channel::Endpoint,
    },
    MetaItem {
        kind: "SLAVE-RENOTIFY",
        value_type: ValueType::Ternary,
        immutable: false,
        channel: Channel::Endpoint,
    },
    MetaItem {
        kind: "SOA-EDIT",
        value_type: ValueType::Str,
        immutable: false,
        channel: Channel::ZoneField("soa_edit"),
    },
    MetaItem {
        kind: "SOA-EDIT-API",
        value_type: ValueType::Str,
        immutable: false,
        channel: Channel::ZoneField("soa_edit_api"),
    },
    MetaItem {
        kind: "SOA-EDIT-DNSUPDATE",
        value_type: ValueType::Str,
        immutable: false,
        channel: Channel::Endpoint,
    },
    MetaItem {
        kind: "TSIG-ALLOW-AXFR",
        value_type: ValueType::StringList,
        immutable: false,
        channel: Channel::ZoneField("master_tsig_key_ids"),
    },
    MetaItem {
        kind: "TSIG-ALLOW-DNSUPDATE",
        value_type: ValueType::StringList,
        immutable: false,
        channel: Channel::Endpoint,
    },
];

/// A decoded metadata value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaValue {
    /// Boolean and presence settings
    Bool(bool),
    /// Ternary settings; `None` means explicitly unset
    Ternary(Option<bool>),
    /// String-list settings
    List(Vec<String>),
    /// Single-string settings
    Str(String),
}

impl MetaValue {
    /// Native JSON rendering, used in zone snapshots.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::Ternary(Some(b)) => JsonValue::Bool(*b),
            Self::Ternary(None) => JsonValue::Null,
            Self::List(values) => JsonValue::Array(
                values.iter().cloned().map(JsonValue::String).collect(),
            ),
            Self::Str(s) => JsonValue::String(s.clone()),
        }
    }
}

/// One converging operation on the metadata endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaOp {
    /// Replace the values stored under `kind`
    Set {
        /// Kind tag to write
        kind: &'static str,
        /// Wire-encoded values
        values: Vec<String>,
    },
    /// Remove everything stored under `kind`
    Clear {
        /// Kind tag to clear
        kind: &'static str,
    },
}

/// The semantic key of a kind tag: lowercased, `-` replaced by `_`.
#[must_use]
pub fn semantic_key(kind: &str) -> String {
    kind.to_lowercase().replace('-', "_")
}

/// Look up a registry row by its semantic key.
#[must_use]
pub fn lookup(key: &str) -> Option<&'static MetaItem> {
    REGISTRY.iter().find(|item| semantic_key(item.kind) == key)
}

/// Parse caller-supplied metadata into typed values.
///
/// Keys are semantic keys; values arrive as loose JSON from the desired
/// state document and are checked against the registry's value types.
/// Read-only keys are accepted and dropped here, so they can never reach
/// the differ.
///
/// # Errors
///
/// Returns a validation error for unknown keys and values of the wrong
/// shape.
pub fn parse_desired(raw: &BTreeMap<String, JsonValue>) -> Result<BTreeMap<String, MetaValue>> {
    let mut parsed = BTreeMap::new();

    for (key, value) in raw {
        let item = lookup(key)
            .ok_or_else(|| Error::validation(format!("unknown metadata key '{key}'")))?;
        if item.immutable {
            continue;
        }
        parsed.insert(key.clone(), parse_value(item, value)?);
    }

    Ok(parsed)
}

fn parse_value(item: &MetaItem, value: &JsonValue) -> Result<MetaValue> {
    let key = semantic_key(item.kind);
    match item.value_type {
        ValueType::Boolean | ValueType::Presence => match value {
            JsonValue::Bool(b) => Ok(MetaValue::Bool(*b)),
            _ => Err(Error::validation(format!(
                "metadata key '{key}' expects a boolean"
            ))),
        },
        ValueType::Ternary => match value {
            JsonValue::Null => Ok(MetaValue::Ternary(None)),
            JsonValue::Bool(b) => Ok(MetaValue::Ternary(Some(*b))),
            _ => Err(Error::validation(format!(
                "metadata key '{key}' expects a boolean or null"
            ))),
        },
        ValueType::StringList => match value {
            JsonValue::Array(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        JsonValue::String(s) => values.push(s.clone()),
                        _ => {
                            return Err(Error::validation(format!(
                                "metadata key '{key}' expects a list of strings"
                            )))
                        }
                    }
                }
                Ok(MetaValue::List(values))
            }
            _ => Err(Error::validation(format!(
                "metadata key '{key}' expects a list of strings"
            ))),
        },
        ValueType::Str => match value {
            JsonValue::String(s) => Ok(MetaValue::Str(s.clone())),
            _ => Err(Error::validation(format!(
                "metadata key '{key}' expects a string"
            ))),
        },
    }
}

/// Decode the observed server state into a semantic map.
///
/// Endpoint-channel settings come from the metadata listing; zone-field
/// settings come from the zone document. Endpoint kinds absent from the
/// listing are reported with their unset value, except Ternary kinds,
/// which stay omitted because absence is their explicit "unset" state.
#[must_use]
pub fn observe(entries: &[MetadataEntry], zone: &Zone) -> BTreeMap<String, MetaValue> {
    let mut observed = BTreeMap::new();

    for item in REGISTRY {
        let key = semantic_key(item.kind);
        match item.channel {
            Channel::Endpoint => {
                match entries.iter().find(|e| e.kind == item.kind) {
                    Some(entry) => {
                        observed.insert(key, decode_endpoint(item, &entry.metadata));
                    }
                    None if item.value_type != ValueType::Ternary => {
                        observed.insert(key, unset_value(item));
                    }
                    None => {}
                }
            }
            Channel::ZoneField(field) => {
                observed.insert(key, read_zone_field(item, field, zone));
            }
        }
    }

    observed
}

fn decode_endpoint(item: &MetaItem, values: &[String]) -> MetaValue {
    let first_is_one = values.first().is_some_and(|v| v == "1");
    match item.value_type {
        ValueType::Boolean => MetaValue::Bool(first_is_one),
        ValueType::Presence => MetaValue::Bool(true),
        ValueType::Ternary => MetaValue::Ternary(Some(first_is_one)),
        ValueType::StringList => MetaValue::List(values.to_vec()),
        ValueType::Str => MetaValue::Str(values.first().cloned().unwrap_or_default()),
    }
}

fn read_zone_field(item: &MetaItem, field: &'static str, zone: &Zone) -> MetaValue {
    match field {
        "api_rectify" => MetaValue::Bool(zone.api_rectify),
        "nsec3narrow" => MetaValue::Bool(zone.nsec3narrow),
        "presigned" => MetaValue::Bool(zone.presigned),
        "nsec3param" => MetaValue::Str(zone.nsec3param.clone()),
        "soa_edit" => MetaValue::Str(zone.soa_edit.clone()),
        "soa_edit_api" => MetaValue::Str(zone.soa_edit_api.clone()),
        "master_tsig_key_ids" => MetaValue::List(zone.master_tsig_key_ids.clone()),
        "slave_tsig_key_ids" => MetaValue::List(zone.slave_tsig_key_ids.clone()),
        // Registry rows only name the fields above.
        _ => unreachable!("unmapped zone field '{}' for {}", field, item.kind),
    }
}

/// The value a setting holds when nothing is stored for it.
fn unset_value(item: &MetaItem) -> MetaValue {
    match item.value_type {
        ValueType::Boolean | ValueType::Presence => MetaValue::Bool(false),
        ValueType::Ternary => MetaValue::Ternary(None),
        ValueType::StringList => MetaValue::List(Vec::new()),
        ValueType::Str => MetaValue::Str(String::new()),
    }
}

/// Value equality for diffing. Lists compare as sets (order-insensitive,
/// duplicates kept).
fn values_equal(item: &MetaItem, a: &MetaValue, b: &MetaValue) -> bool {
    match (a, b) {
        (MetaValue::List(a), MetaValue::List(b)) => {
            let mut a = a.clone();
            let mut b = b.clone();
            a.sort();
            b.sort();
            a == b
        }
        _ => {
            debug_assert!(!matches!(item.value_type, ValueType::StringList));
            a == b
        }
    }
}

/// Compute the operations that converge observed metadata to `desired`.
///
/// Keys absent from `desired` are unmanaged and never touched, and
/// immutable kinds are skipped outright so they can never produce an
/// operation. Endpoint settings produce [`MetaOp`]s; zone-field settings
/// are written into `update` with native JSON types. The result is
/// deterministic (keys in sorted order) and empty when the two states
/// already agree.
pub fn diff(
    desired: &BTreeMap<String, MetaValue>,
    observed: &BTreeMap<String, MetaValue>,
    update: &mut ZoneUpdate,
) -> Vec<MetaOp> {
    let mut ops = Vec::new();

    for (key, want) in desired {
        let Some(item) = lookup(key) else {
            // parse_desired already rejected unknown keys
            continue;
        };
        if item.immutable {
            continue;
        }
        let have = observed
            .get(key)
            .cloned()
            .unwrap_or_else(|| unset_value(item));
        if values_equal(item, want, &have) {
            continue;
        }

        match item.channel {
            Channel::Endpoint => match encode_endpoint(item, want) {
                Some(values) => ops.push(MetaOp::Set {
                    kind: item.kind,
                    values,
                }),
                None => ops.push(MetaOp::Clear { kind: item.kind }),
            },
            Channel::ZoneField(field) => write_zone_field(update, field, want),
        }
    }

    ops
}

/// Wire encoding for the metadata endpoint. `None` means the setting
/// should be cleared rather than written.
fn encode_endpoint(item: &MetaItem, value: &MetaValue) -> Option<Vec<String>> {
    match (item.value_type, value) {
        (ValueType::Boolean, MetaValue::Bool(true)) => Some(vec!["1".to_string()]),
        (ValueType::Boolean, MetaValue::Bool(false)) => None,
        (ValueType::Presence, MetaValue::Bool(true)) => Some(vec![String::new()]),
        (ValueType::Presence, MetaValue::Bool(false)) => None,
        (ValueType::Ternary, MetaValue::Ternary(Some(true))) => Some(vec!["1".to_string()]),
        (ValueType::Ternary, MetaValue::Ternary(Some(false))) => Some(vec!["0".to_string()]),
        (ValueType::Ternary, MetaValue::Ternary(None)) => None,
        (ValueType::StringList, MetaValue::List(values)) if values.is_empty() => None,
        (ValueType::StringList, MetaValue::List(values)) => Some(values.clone()),
        (ValueType::Str, MetaValue::Str(s)) if s.is_empty() => None,
        (ValueType::Str, MetaValue::Str(s)) => Some(vec![s.clone()]),
        // parse_desired guarantees value shape matches the type
        _ => unreachable!("value shape mismatch for {}", item.kind),
    }
}

fn write_zone_field(update: &mut ZoneUpdate, field: &'static str, value: &MetaValue) {
    match (field, value) {
        ("api_rectify", MetaValue::Bool(b)) => update.api_rectify = Some(*b),
        ("nsec3narrow", MetaValue::Bool(b)) => update.nsec3narrow = Some(*b),
        ("nsec3param", MetaValue::Str(s)) => update.nsec3param = Some(s.clone()),
        ("soa_edit", MetaValue::Str(s)) => update.soa_edit = Some(s.clone()),
        ("soa_edit_api", MetaValue::Str(s)) => update.soa_edit_api = Some(s.clone()),
        ("master_tsig_key_ids", MetaValue::List(v)) => {
            update.master_tsig_key_ids = Some(v.clone());
        }
        ("slave_tsig_key_ids", MetaValue::List(v)) => {
            update.slave_tsig_key_ids = Some(v.clone());
        }
        _ => unreachable!("unmapped zone field '{}'", field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn desired(pairs: &[(&str, JsonValue)]) -> BTreeMap<String, MetaValue> {
        let raw: BTreeMap<String, JsonValue> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect();
        parse_desired(&raw).unwrap()
    }

    fn bare_zone() -> Zone {
        serde_json::from_value(json!({
            "id": "example.org.",
            "name": "example.org.",
            "kind": "Native",
        }))
        .unwrap()
    }

    #[test]
    fn semantic_keys_follow_the_kind() {
        assert_eq!(semantic_key("ALLOW-AXFR-FROM"), "allow_axfr_from");
        assert_eq!(semantic_key("IXFR"), "ixfr");
        assert!(lookup("slave_renotify").is_some());
        assert!(lookup("no_such_key").is_none());
    }

    #[test]
    fn unknown_key_rejected() {
        let raw: BTreeMap<String, JsonValue> =
            [("bogus".to_string(), json!(true))].into_iter().collect();
        let err = parse_desired(&raw).unwrap_err();
        assert!(err.to_string().contains("unknown metadata key"));
    }

    #[test]
    fn read_only_keys_are_dropped_at_parse() {
        let raw: BTreeMap<String, JsonValue> = [
            ("presigned".to_string(), json!(true)),
            ("lua_axfr_script".to_string(), json!("script.lua")),
            ("ixfr".to_string(), json!(true)),
        ]
        .into_iter()
        .collect();
        let parsed = parse_desired(&raw).unwrap();
        assert_eq!(parsed.len(), 1);
        assert!(parsed.contains_key("ixfr"));
    }

    #[test]
    fn immutable_kinds_never_appear_in_diff_output() {
        // even a hand-built desired map cannot make an immutable kind
        // produce an operation or a zone-field write
        let desired: BTreeMap<String, MetaValue> = [
            ("presigned".to_string(), MetaValue::Bool(true)),
            (
                "lua_axfr_script".to_string(),
                MetaValue::Str("script.lua".to_string()),
            ),
        ]
        .into_iter()
        .collect();
        let mut update = ZoneUpdate::default();
        let ops = diff(&desired, &BTreeMap::new(), &mut update);
        assert!(ops.is_empty());
        assert!(update.is_empty());
    }

    #[test]
    fn boolean_true_sets_one_false_clears() {
        let observed = BTreeMap::new();
        let mut update = ZoneUpdate::default();

        let ops = diff(&desired(&[("ixfr", json!(true))]), &observed, &mut update);
        assert_eq!(
            ops,
            vec![MetaOp::Set {
                kind: "IXFR",
                values: vec!["1".to_string()]
            }]
        );

        // false against nothing stored is already converged
        let ops = diff(&desired(&[("ixfr", json!(false))]), &observed, &mut update);
        assert!(ops.is_empty());

        // false against a stored "1" clears
        let observed: BTreeMap<String, MetaValue> =
            [("ixfr".to_string(), MetaValue::Bool(true))]
                .into_iter()
                .collect();
        let ops = diff(&desired(&[("ixfr", json!(false))]), &observed, &mut update);
        assert_eq!(ops, vec![MetaOp::Clear { kind: "IXFR" }]);
        assert!(update.is_empty());
    }

    #[test]
    fn presence_encodes_empty_string() {
        let mut update = ZoneUpdate::default();
        let ops = diff(
            &desired(&[("forward_dnsupdate", json!(true))]),
            &BTreeMap::new(),
            &mut update,
        );
        assert_eq!(
            ops,
            vec![MetaOp::Set {
                kind: "FORWARD-DNSUPDATE",
                values: vec![String::new()]
            }]
        );
    }

    #[test]
    fn ternary_false_writes_zero_instead_of_clearing() {
        let mut update = ZoneUpdate::default();
        let ops = diff(
            &desired(&[("slave_renotify", json!(false))]),
            &BTreeMap::new(),
            &mut update,
        );
        assert_eq!(
            ops,
            vec![MetaOp::Set {
                kind: "SLAVE-RENOTIFY",
                values: vec!["0".to_string()]
            }]
        );

        // explicit null clears a stored value
        let observed: BTreeMap<String, MetaValue> =
            [("slave_renotify".to_string(), MetaValue::Ternary(Some(true)))]
                .into_iter()
                .collect();
        let ops = diff(
            &desired(&[("slave_renotify", json!(null))]),
            &observed,
            &mut update,
        );
        assert_eq!(ops, vec![MetaOp::Clear { kind: "SLAVE-RENOTIFY" }]);
    }

    #[test]
    fn list_comparison_ignores_order() {
        let observed: BTreeMap<String, MetaValue> = [(
            "also_notify".to_string(),
            MetaValue::List(vec!["192.0.2.2".to_string(), "192.0.2.1".to_string()]),
        )]
        .into_iter()
        .collect();
        let mut update = ZoneUpdate::default();
        let ops = diff(
            &desired(&[("also_notify", json!(["192.0.2.1", "192.0.2.2"]))]),
            &observed,
            &mut update,
        );
        assert!(ops.is_empty());
    }

    #[test]
    fn empty_list_clears_stored_value() {
        let observed: BTreeMap<String, MetaValue> = [(
            "allow_axfr_from".to_string(),
            MetaValue::List(vec!["AUTO-NS".to_string()]),
        )]
        .into_iter()
        .collect();
        let mut update = ZoneUpdate::default();
        let ops = diff(
            &desired(&[("allow_axfr_from", json!([]))]),
            &observed,
            &mut update,
        );
        assert_eq!(ops, vec![MetaOp::Clear { kind: "ALLOW-AXFR-FROM" }]);
    }

    #[test]
    fn zone_field_settings_land_in_the_update() {
        let mut update = ZoneUpdate::default();
        let ops = diff(
            &desired(&[
                ("api_rectify", json!(true)),
                ("soa_edit", json!("INCEPTION-INCREMENT")),
                ("tsig_allow_axfr", json!(["axfr-key."])),
            ]),
            &BTreeMap::new(),
            &mut update,
        );
        assert!(ops.is_empty());
        assert_eq!(update.api_rectify, Some(true));
        assert_eq!(update.soa_edit.as_deref(), Some("INCEPTION-INCREMENT"));
        assert_eq!(
            update.master_tsig_key_ids,
            Some(vec!["axfr-key.".to_string()])
        );
        assert!(update.nsec3param.is_none());
    }

    #[test]
    fn converged_zone_fields_stay_out_of_the_update() {
        let mut zone = bare_zone();
        zone.api_rectify = true;
        zone.soa_edit = "EPOCH".to_string();
        let observed = observe(&[], &zone);

        let mut update = ZoneUpdate::default();
        let ops = diff(
            &desired(&[("api_rectify", json!(true)), ("soa_edit", json!("EPOCH"))]),
            &observed,
            &mut update,
        );
        assert!(ops.is_empty());
        assert!(update.is_empty());
    }

    #[test]
    fn observe_decodes_endpoint_entries() {
        let entries = vec![
            MetadataEntry {
                kind: "IXFR".to_string(),
                metadata: vec!["1".to_string()],
            },
            MetadataEntry {
                kind: "FORWARD-DNSUPDATE".to_string(),
                metadata: vec![String::new()],
            },
            MetadataEntry {
                kind: "SLAVE-RENOTIFY".to_string(),
                metadata: vec!["0".to_string()],
            },
            MetadataEntry {
                kind: "AXFR-SOURCE".to_string(),
                metadata: vec!["198.51.100.9".to_string()],
            },
            // not in the registry, must be ignored
            MetadataEntry {
                kind: "X-CUSTOM".to_string(),
                metadata: vec!["whatever".to_string()],
            },
        ];
        let observed = observe(&entries, &bare_zone());

        assert_eq!(observed.get("ixfr"), Some(&MetaValue::Bool(true)));
        assert_eq!(
            observed.get("forward_dnsupdate"),
            Some(&MetaValue::Bool(true))
        );
        assert_eq!(
            observed.get("slave_renotify"),
            Some(&MetaValue::Ternary(Some(false)))
        );
        assert_eq!(
            observed.get("axfr_source"),
            Some(&MetaValue::Str("198.51.100.9".to_string()))
        );
        assert!(!observed.contains_key("x_custom"));
        // zone fields are always present
        assert_eq!(observed.get("api_rectify"), Some(&MetaValue::Bool(false)));
    }

    #[test]
    fn absent_endpoint_kinds_observe_as_defaults() {
        let observed = observe(&[], &bare_zone());

        assert_eq!(observed.get("ixfr"), Some(&MetaValue::Bool(false)));
        assert_eq!(
            observed.get("forward_dnsupdate"),
            Some(&MetaValue::Bool(false))
        );
        assert_eq!(observed.get("also_notify"), Some(&MetaValue::List(vec![])));
        assert_eq!(
            observed.get("axfr_source"),
            Some(&MetaValue::Str(String::new()))
        );
        // absence is the ternary "unset" state, so no entry is reported
        assert!(!observed.contains_key("slave_renotify"));
    }
}
