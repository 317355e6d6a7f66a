// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone desired state: validation, creation payload expansion, and the
//! property differ.
//!
//! A [`ZoneSpec`] describes one zone the way an operator writes it down:
//! a name, a target state, optional properties and optional metadata.
//! Creation expands the SOA and nameserver fields into initial RRsets;
//! updates compare field by field and produce a partial [`ZoneUpdate`]
//! that is empty when the zone already matches.

use std::collections::BTreeMap;
use std::net::IpAddr;

use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::api::types::{Record, Rrset, Zone, ZoneCreate, ZoneKind, ZoneUpdate};
use crate::errors::{Error, Result};
use crate::metadata::{self, MetaOp, MetaValue};
use crate::rrsets::RecordSpec;

/// Default TTL for the SOA and NS records created with a zone.
pub const DEFAULT_ZONE_TTL: u32 = 86_400;

fn default_zone_ttl() -> u32 {
    DEFAULT_ZONE_TTL
}

fn default_soa_serial() -> u32 {
    1
}

fn default_soa_refresh() -> u32 {
    86_400
}

fn default_soa_retry() -> u32 {
    7_200
}

fn default_soa_expire() -> u32 {
    3_600_000
}

fn default_soa_ttl() -> u32 {
    172_800
}

fn default_rrset_ttl() -> u32 {
    3_600
}

/// Target state of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneTarget {
    /// The zone must exist and match the spec
    #[default]
    Present,
    /// The zone must not exist
    Absent,
    /// Report whether the zone exists, change nothing
    Exists,
    /// Queue a NOTIFY to the zone's slaves
    Notify,
    /// Queue retrieval of the zone from its master
    Retrieve,
}

/// SOA field set used when creating a primary-style zone.
#[derive(Debug, Clone, Deserialize)]
pub struct SoaSpec {
    /// Primary master name server
    pub mname: String,
    /// Zone administrator mailbox, in domain-name form
    pub rname: String,
    /// Initial serial number
    #[serde(default = "default_soa_serial")]
    pub serial: u32,
    /// Refresh interval in seconds
    #[serde(default = "default_soa_refresh")]
    pub refresh: u32,
    /// Retry interval in seconds
    #[serde(default = "default_soa_retry")]
    pub retry: u32,
    /// Expire time in seconds
    #[serde(default = "default_soa_expire")]
    pub expire: u32,
    /// Negative-caching TTL in seconds
    #[serde(default = "default_soa_ttl")]
    pub ttl: u32,
}

impl SoaSpec {
    /// The zone-file content string, fields space-joined.
    #[must_use]
    pub fn content(&self) -> String {
        format!(
            "{} {} {} {} {} {} {}",
            self.mname, self.rname, self.serial, self.refresh, self.retry, self.expire, self.ttl
        )
    }
}

/// An extra RRset supplied at zone creation, in raw form.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneRrsetSpec {
    /// Owner name, absolute
    pub name: String,
    /// Record type tag
    #[serde(rename = "type")]
    pub rtype: String,
    /// TTL in seconds
    #[serde(default = "default_rrset_ttl")]
    pub ttl: u32,
    /// The records
    #[serde(default)]
    pub records: Vec<RecordSpec>,
}

/// Zone properties reconciled through the zone document itself.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ZoneProperties {
    /// Zone kind; required for creation
    #[serde(default)]
    pub kind: Option<ZoneKind>,
    /// Free-text account label
    #[serde(default)]
    pub account: Option<String>,
    /// Name of the catalog zone that should contain this zone
    #[serde(default)]
    pub catalog: Option<String>,
    /// Nameserver hostnames, expanded into NS records at creation
    #[serde(default)]
    pub nameservers: Option<Vec<String>>,
    /// TTL for the SOA and NS records created with the zone
    #[serde(default = "default_zone_ttl")]
    pub ttl: u32,
    /// SOA fields; required when creating a primary-style zone
    #[serde(default)]
    pub soa: Option<SoaSpec>,
    /// Extra RRsets created with the zone
    #[serde(default)]
    pub rrsets: Option<Vec<ZoneRrsetSpec>>,
    /// Master addresses; required for Slave and Consumer zones
    #[serde(default)]
    pub masters: Option<Vec<String>>,
}

/// One zone as the operator wants it.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneSpec {
    /// Zone name, absolute
    pub name: String,
    /// Target state
    #[serde(default)]
    pub state: ZoneTarget,
    /// Zone properties
    #[serde(default)]
    pub properties: Option<ZoneProperties>,
    /// Metadata settings, keyed by semantic key
    #[serde(default)]
    pub metadata: BTreeMap<String, JsonValue>,
}

fn absolute_name(name: &str, what: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::validation(format!("{what} must not be empty")));
    }
    if !name.ends_with('.') {
        return Err(Error::validation(format!(
            "{what} '{name}' must be absolute (end with '.')"
        )));
    }
    Ok(())
}

impl ZoneSpec {
    /// Check structural invariants before any remote call.
    ///
    /// # Errors
    ///
    /// Returns a validation error for relative names and master entries
    /// that are not IP addresses.
    pub fn validate(&self) -> Result<()> {
        absolute_name(&self.name, "zone name")?;

        if let Some(props) = &self.properties {
            if let Some(nameservers) = &props.nameservers {
                for ns in nameservers {
                    absolute_name(ns, "nameserver")?;
                }
            }
            if let Some(masters) = &props.masters {
                for master in masters {
                    master.parse::<IpAddr>().map_err(|_| {
                        Error::validation(format!("master '{master}' is not a valid IP address"))
                    })?;
                }
            }
            if let Some(rrsets) = &props.rrsets {
                for rrset in rrsets {
                    absolute_name(&rrset.name, "rrset name")?;
                }
            }
        }

        Ok(())
    }

    /// Parse and type-check the metadata settings. Read-only settings
    /// are accepted and ignored.
    ///
    /// # Errors
    ///
    /// Returns a validation error for unknown keys and wrongly shaped
    /// values.
    pub fn desired_metadata(&self) -> Result<BTreeMap<String, MetaValue>> {
        metadata::parse_desired(&self.metadata)
    }
}

/// Build the creation payload for a zone that does not exist yet.
///
/// Primary-style kinds (Native, Master, Producer) require SOA fields and
/// nameservers; both are expanded into initial RRsets and the top-level
/// nameserver list is submitted empty. Secondary-style kinds (Slave,
/// Consumer) require master addresses instead. Metadata settings stored
/// as zone fields land in the payload; the remaining settings are
/// returned as endpoint operations to run after creation.
///
/// # Errors
///
/// Returns a validation error when required properties are missing or an
/// extra RRset carries the SOA type.
pub fn creation_payload(
    spec: &ZoneSpec,
    desired_meta: &BTreeMap<String, MetaValue>,
) -> Result<(ZoneCreate, Vec<MetaOp>)> {
    let Some(props) = &spec.properties else {
        return Err(Error::validation(
            "'properties' must be specified for zone creation",
        ));
    };
    let Some(kind) = props.kind else {
        return Err(Error::validation(
            "'properties -> kind' must be specified for zone creation",
        ));
    };

    let mut fields = ZoneUpdate::default();
    let meta_ops = metadata::diff(desired_meta, &BTreeMap::new(), &mut fields);

    let mut create = ZoneCreate {
        name: spec.name.clone(),
        kind,
        nameservers: None,
        rrsets: None,
        fields,
    };

    if !kind.is_transfer_sink() {
        let Some(soa) = &props.soa else {
            return Err(Error::validation(format!(
                "'properties -> soa' must be specified for '{kind}' zone creation"
            )));
        };
        let nameservers = props.nameservers.as_deref().unwrap_or_default();
        if nameservers.is_empty() {
            return Err(Error::validation(format!(
                "'properties -> nameservers' must be specified for '{kind}' zone creation"
            )));
        }

        // NS records travel in the rrsets, so the top-level list stays empty
        create.nameservers = Some(Vec::new());

        let mut rrsets = vec![
            Rrset {
                name: spec.name.clone(),
                rtype: "SOA".to_string(),
                ttl: props.ttl,
                records: vec![Record {
                    content: soa.content(),
                    disabled: false,
                }],
                changetype: None,
            },
            Rrset {
                name: spec.name.clone(),
                rtype: "NS".to_string(),
                ttl: props.ttl,
                records: nameservers
                    .iter()
                    .map(|ns| Record {
                        content: ns.clone(),
                        disabled: false,
                    })
                    .collect(),
                changetype: None,
            },
        ];

        if let Some(extra) = &props.rrsets {
            for rrset in extra {
                if rrset.rtype == "SOA" {
                    return Err(Error::validation(
                        "'SOA' type is not permitted in 'properties -> rrsets'",
                    ));
                }
                rrsets.push(Rrset {
                    name: rrset.name.clone(),
                    rtype: rrset.rtype.clone(),
                    ttl: rrset.ttl,
                    records: rrset
                        .records
                        .iter()
                        .map(|r| Record {
                            content: r.content.clone(),
                            disabled: r.disabled,
                        })
                        .collect(),
                    changetype: None,
                });
            }
        }

        create.rrsets = Some(rrsets);
    } else {
        let masters = props.masters.clone().unwrap_or_default();
        if masters.is_empty() {
            return Err(Error::validation(format!(
                "'properties -> masters' must be specified for '{kind}' zone creation"
            )));
        }
        create.fields.masters = Some(masters);
    }

    if let Some(account) = &props.account {
        if !account.is_empty() {
            create.fields.account = Some(account.clone());
        }
    }
    if let Some(catalog) = &props.catalog {
        if !catalog.is_empty() {
            create.fields.catalog = Some(catalog.clone());
        }
    }

    Ok((create, meta_ops))
}

/// Compare desired properties against an existing zone.
///
/// Only explicitly desired, differing fields are set. Master lists
/// compare as sorted sets but are submitted in the order given.
#[must_use]
pub fn property_diff(props: Option<&ZoneProperties>, zone: &Zone) -> ZoneUpdate {
    let mut update = ZoneUpdate::default();
    let Some(props) = props else {
        return update;
    };

    if let Some(kind) = props.kind {
        if zone.kind != kind {
            update.kind = Some(kind);
        }

        if kind.is_transfer_sink() {
            if let Some(masters) = &props.masters {
                if !masters.is_empty() {
                    let mut want = masters.clone();
                    let mut have = zone.masters.clone();
                    want.sort();
                    have.sort();
                    if want != have {
                        update.masters = Some(masters.clone());
                    }
                }
            }
        }
    }

    if let Some(account) = &props.account {
        if !account.is_empty() && zone.account != *account {
            update.account = Some(account.clone());
        }
    }
    if let Some(catalog) = &props.catalog {
        if !catalog.is_empty() && zone.catalog.as_deref().unwrap_or_default() != catalog {
            update.catalog = Some(catalog.clone());
        }
    }

    update
}
