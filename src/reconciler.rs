// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Reconciliation drivers.
//!
//! Each driver takes a desired-state spec, reads the server, computes the
//! minimal set of changes, applies them, and reports the server's state
//! after the run. Running a driver twice with the same spec performs no
//! mutation on the second run; every failure is fatal and leaves recovery
//! to a re-run.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{debug, info};

use crate::api::types::{Cryptokey, Rrset, TsigKey, Zone, ZoneKind};
use crate::api::ApiClient;
use crate::cryptokeys::{CryptokeySpec, KeyState as CryptokeyState};
use crate::errors::{Error, Result};
use crate::metadata::{self, MetaOp, MetaValue};
use crate::rrsets::{self, RrsetSpec};
use crate::tsigkeys::{KeyState as TsigKeyState, TsigKeySpec};
use crate::zones::{self, ZoneSpec, ZoneTarget};

/// Server-side view of a zone after a reconcile run.
#[derive(Debug, Clone, Serialize)]
pub struct ZoneStatus {
    /// Whether the zone exists on the server
    pub exists: bool,
    /// Zone name
    pub name: String,
    /// Zone kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ZoneKind>,
    /// SOA serial
    pub serial: u32,
    /// Whether the zone is DNSSEC-signed
    pub dnssec: bool,
    /// Account label
    pub account: String,
    /// Containing catalog zone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    /// Master addresses (Slave/Consumer zones)
    pub masters: Vec<String>,
    /// Metadata settings, decoded to native values
    pub metadata: BTreeMap<String, JsonValue>,
}

impl ZoneStatus {
    fn missing(name: &str) -> Self {
        Self {
            exists: false,
            name: name.to_string(),
            kind: None,
            serial: 0,
            dnssec: false,
            account: String::new(),
            catalog: None,
            masters: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    fn from_zone(zone: &Zone, observed: &BTreeMap<String, MetaValue>) -> Self {
        Self {
            exists: true,
            name: zone.name.clone(),
            kind: Some(zone.kind),
            serial: zone.serial,
            dnssec: zone.dnssec,
            account: zone.account.clone(),
            catalog: zone.catalog.clone(),
            masters: zone.masters.clone(),
            metadata: observed
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        }
    }
}

/// Result of a zone reconcile run.
#[derive(Debug, Clone, Serialize)]
pub struct ZoneOutcome {
    /// Whether any mutation was performed
    pub changed: bool,
    /// State of the zone after the run
    pub zone: ZoneStatus,
}

/// Result of an RRset reconcile run.
#[derive(Debug, Clone, Serialize)]
pub struct RrsetOutcome {
    /// Whether any mutation was performed
    pub changed: bool,
    /// The zone's RRsets after the run
    pub rrsets: Vec<Rrset>,
}

/// Result of an RRset existence query.
#[derive(Debug, Clone, Serialize)]
pub struct RrsetQuery {
    /// Whether a matching set exists; absent when no filter was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,
    /// The matching RRsets
    pub rrsets: Vec<Rrset>,
}

/// Result of a cryptokey reconcile run.
#[derive(Debug, Clone, Serialize)]
pub struct CryptokeyOutcome {
    /// Whether any mutation was performed
    pub changed: bool,
    /// For existence checks, whether a key was found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,
    /// The zone's keys after the run (or the queried key)
    pub cryptokeys: Vec<Cryptokey>,
}

/// Result of a TSIG key reconcile run.
#[derive(Debug, Clone, Serialize)]
pub struct TsigKeyOutcome {
    /// Whether any mutation was performed
    pub changed: bool,
    /// Whether the key exists after the run
    pub exists: bool,
    /// The key, including its material, when it exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<TsigKey>,
}

/// Resolve a zone name to its server-assigned id.
async fn resolve_zone(client: &ApiClient, name: &str) -> Result<Option<String>> {
    let listing = client.list_zones(name).await?;
    Ok(listing.into_iter().next().map(|z| z.id))
}

/// Fetch a zone and its metadata and decode the semantic view.
async fn snapshot(
    client: &ApiClient,
    zone_id: &str,
) -> Result<(Zone, BTreeMap<String, MetaValue>, ZoneStatus)> {
    let zone = client.get_zone(zone_id, false).await?;
    let entries = client.list_metadata(zone_id).await?;
    let observed = metadata::observe(&entries, &zone);
    let status = ZoneStatus::from_zone(&zone, &observed);
    Ok((zone, observed, status))
}

async fn apply_meta_ops(client: &ApiClient, zone_id: &str, ops: &[MetaOp]) -> Result<()> {
    for op in ops {
        match op {
            MetaOp::Set { kind, values } => {
                debug!(zone = %zone_id, kind, "setting metadata");
                client.modify_metadata(zone_id, kind, values.clone()).await?;
            }
            MetaOp::Clear { kind } => {
                debug!(zone = %zone_id, kind, "clearing metadata");
                client.delete_metadata(zone_id, kind).await?;
            }
        }
    }
    Ok(())
}

/// Converge one zone to its spec.
///
/// # Errors
///
/// Returns a validation error before any remote call when the spec is
/// malformed, a resolution error when NOTIFY or retrieval targets a zone
/// that does not exist or has the wrong kind, and any API error verbatim.
pub async fn apply_zone(client: &ApiClient, spec: &ZoneSpec) -> Result<ZoneOutcome> {
    spec.validate()?;
    let desired_meta = spec.desired_metadata()?;

    let zone_id = resolve_zone(client, &spec.name).await?;

    let Some(zone_id) = zone_id else {
        return match spec.state {
            ZoneTarget::Exists | ZoneTarget::Absent => Ok(ZoneOutcome {
                changed: false,
                zone: ZoneStatus::missing(&spec.name),
            }),
            ZoneTarget::Notify | ZoneTarget::Retrieve => Err(Error::ZoneNotFound {
                zone: spec.name.clone(),
            }),
            ZoneTarget::Present => {
                let (create, meta_ops) = zones::creation_payload(spec, &desired_meta)?;
                info!(zone = %spec.name, kind = %create.kind, "creating zone");
                let created = client.create_zone(&create).await?;
                apply_meta_ops(client, &created.id, &meta_ops).await?;
                let (_, _, status) = snapshot(client, &created.id).await?;
                Ok(ZoneOutcome {
                    changed: true,
                    zone: status,
                })
            }
        };
    };

    let (zone, observed, status) = snapshot(client, &zone_id).await?;

    match spec.state {
        ZoneTarget::Exists => Ok(ZoneOutcome {
            changed: false,
            zone: status,
        }),
        ZoneTarget::Absent => {
            info!(zone = %spec.name, "deleting zone");
            client.delete_zone(&zone_id).await?;
            Ok(ZoneOutcome {
                changed: true,
                zone: ZoneStatus::missing(&spec.name),
            })
        }
        ZoneTarget::Notify => {
            if !zone.kind.is_transfer_source() {
                return Err(Error::NotifyNotSupported {
                    kind: zone.kind.to_string(),
                });
            }
            info!(zone = %spec.name, "queueing NOTIFY");
            client.notify_zone(&zone_id).await?;
            Ok(ZoneOutcome {
                changed: true,
                zone: status,
            })
        }
        ZoneTarget::Retrieve => {
            if !zone.kind.is_transfer_sink() {
                return Err(Error::RetrieveNotSupported {
                    kind: zone.kind.to_string(),
                });
            }
            info!(zone = %spec.name, "queueing AXFR retrieval");
            client.retrieve_zone(&zone_id).await?;
            Ok(ZoneOutcome {
                changed: true,
                zone: status,
            })
        }
        ZoneTarget::Present => {
            let mut update = zones::property_diff(spec.properties.as_ref(), &zone);
            let meta_ops = metadata::diff(&desired_meta, &observed, &mut update);

            let mut changed = false;
            if !update.is_empty() {
                info!(zone = %spec.name, "updating zone properties");
                client.update_zone(&zone_id, &update).await?;
                changed = true;
            }
            if !meta_ops.is_empty() {
                apply_meta_ops(client, &zone_id, &meta_ops).await?;
                changed = true;
            }

            let zone_status = if changed {
                let (_, _, status) = snapshot(client, &zone_id).await?;
                status
            } else {
                debug!(zone = %spec.name, "zone already converged");
                status
            };
            Ok(ZoneOutcome {
                changed,
                zone: zone_status,
            })
        }
    }
}

/// Converge a zone's RRsets to the given entries.
///
/// # Errors
///
/// Returns [`Error::ZoneNotFound`] when the zone does not exist, a
/// validation error for malformed entries, and
/// [`Error::RrsetNotFound`] for a deletion of a set the server does not
/// hold.
pub async fn apply_rrsets(
    client: &ApiClient,
    zone_name: &str,
    specs: &[RrsetSpec],
) -> Result<RrsetOutcome> {
    let zone_id = resolve_zone(client, zone_name)
        .await?
        .ok_or_else(|| Error::ZoneNotFound {
            zone: zone_name.to_string(),
        })?;

    let zone = client.get_zone(&zone_id, true).await?;
    let existing = zone.rrsets.unwrap_or_default();

    let mut planned = Vec::new();
    for spec in specs {
        planned.extend(spec.expand()?);
    }
    let patch = rrsets::plan(&planned, &existing)?;

    if patch.is_empty() {
        debug!(zone = %zone_name, "rrsets already converged");
        return Ok(RrsetOutcome {
            changed: false,
            rrsets: existing,
        });
    }

    info!(zone = %zone_name, changes = patch.len(), "patching rrsets");
    client.patch_rrsets(&zone_id, patch).await?;

    let zone = client.get_zone(&zone_id, true).await?;
    Ok(RrsetOutcome {
        changed: true,
        rrsets: zone.rrsets.unwrap_or_default(),
    })
}

/// Look up a zone's RRsets, optionally filtered by owner name and type.
///
/// # Errors
///
/// Returns [`Error::ZoneNotFound`] when the zone does not exist.
pub async fn query_rrsets(
    client: &ApiClient,
    zone_name: &str,
    name: Option<&str>,
    rtype: Option<&str>,
) -> Result<RrsetQuery> {
    let zone_id = resolve_zone(client, zone_name)
        .await?
        .ok_or_else(|| Error::ZoneNotFound {
            zone: zone_name.to_string(),
        })?;

    let zone = client.get_zone(&zone_id, true).await?;
    let all = zone.rrsets.unwrap_or_default();
    let matching: Vec<Rrset> = rrsets::find(&all, name, rtype)
        .into_iter()
        .cloned()
        .collect();

    if name.is_none() && rtype.is_none() {
        return Ok(RrsetQuery {
            exists: None,
            rrsets: all,
        });
    }
    Ok(RrsetQuery {
        exists: Some(!matching.is_empty()),
        rrsets: matching,
    })
}

/// Converge one cryptokey to its spec.
///
/// # Errors
///
/// Returns [`Error::ZoneNotFound`] when the zone does not exist and
/// [`Error::CryptokeyNotFound`] when an update or deletion names an id
/// missing from the zone's key listing.
pub async fn apply_cryptokey(
    client: &ApiClient,
    spec: &CryptokeySpec,
) -> Result<CryptokeyOutcome> {
    spec.validate()?;

    let zone_id = resolve_zone(client, &spec.zone)
        .await?
        .ok_or_else(|| Error::ZoneNotFound {
            zone: spec.zone.clone(),
        })?;

    let existing = client.list_cryptokeys(&zone_id).await?;

    match spec.state {
        CryptokeyState::Exists => {
            if let Some(id) = &spec.id {
                let key = client.get_cryptokey(&zone_id, id).await?;
                Ok(CryptokeyOutcome {
                    changed: false,
                    exists: Some(true),
                    cryptokeys: vec![key],
                })
            } else {
                Ok(CryptokeyOutcome {
                    changed: false,
                    exists: Some(!existing.is_empty()),
                    cryptokeys: existing,
                })
            }
        }
        CryptokeyState::Present => {
            if let Some(id) = &spec.id {
                if !existing.iter().any(|k| k.id.to_string() == *id) {
                    return Err(Error::CryptokeyNotFound {
                        id: id.clone(),
                        zone: spec.zone.clone(),
                    });
                }
                info!(zone = %spec.zone, key = %id, "updating cryptokey flags");
                client
                    .modify_cryptokey(&zone_id, id, &spec.flag_update())
                    .await?;
            } else {
                let create = spec.creation_payload()?;
                info!(zone = %spec.zone, "creating cryptokey");
                client.create_cryptokey(&zone_id, &create).await?;
            }
            let keys = client.list_cryptokeys(&zone_id).await?;
            Ok(CryptokeyOutcome {
                changed: true,
                exists: None,
                cryptokeys: keys,
            })
        }
        CryptokeyState::Absent => {
            // validate() guarantees the id is present
            let id = spec.id.as_deref().unwrap_or_default();
            if !existing.iter().any(|k| k.id.to_string() == id) {
                return Err(Error::CryptokeyNotFound {
                    id: id.to_string(),
                    zone: spec.zone.clone(),
                });
            }
            info!(zone = %spec.zone, key = %id, "deleting cryptokey");
            client.delete_cryptokey(&zone_id, id).await?;
            let keys = client.list_cryptokeys(&zone_id).await?;
            Ok(CryptokeyOutcome {
                changed: true,
                exists: None,
                cryptokeys: keys,
            })
        }
    }
}

/// Converge one TSIG key to its spec. Keys are resolved by exact name.
///
/// # Errors
///
/// Returns a validation error for a malformed spec and any API error
/// verbatim.
pub async fn apply_tsigkey(client: &ApiClient, spec: &TsigKeySpec) -> Result<TsigKeyOutcome> {
    spec.validate()?;

    let listing = client.list_tsigkeys().await?;
    let found = listing.into_iter().find(|k| k.name == spec.name);

    let Some(found) = found else {
        return match spec.state {
            TsigKeyState::Exists | TsigKeyState::Absent => Ok(TsigKeyOutcome {
                changed: false,
                exists: false,
                key: None,
            }),
            TsigKeyState::Present => {
                info!(key = %spec.name, "creating TSIG key");
                let created = client.create_tsigkey(&spec.creation_payload()).await?;
                Ok(TsigKeyOutcome {
                    changed: true,
                    exists: true,
                    key: Some(created),
                })
            }
        };
    };

    let current = client.get_tsigkey(&found.id).await?;

    match spec.state {
        TsigKeyState::Exists => Ok(TsigKeyOutcome {
            changed: false,
            exists: true,
            key: Some(current),
        }),
        TsigKeyState::Absent => {
            info!(key = %spec.name, "deleting TSIG key");
            client.delete_tsigkey(&found.id).await?;
            Ok(TsigKeyOutcome {
                changed: true,
                exists: false,
                key: None,
            })
        }
        TsigKeyState::Present => {
            let update = spec.update_for(&current);
            if update.is_empty() {
                debug!(key = %spec.name, "TSIG key already converged");
                return Ok(TsigKeyOutcome {
                    changed: false,
                    exists: true,
                    key: Some(current),
                });
            }
            info!(key = %spec.name, "updating TSIG key");
            let updated = client.put_tsigkey(&found.id, &update).await?;
            Ok(TsigKeyOutcome {
                changed: true,
                exists: true,
                key: Some(updated),
            })
        }
    }
}
