// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! RRset desired state and the patch planner.
//!
//! Records can be supplied in two forms: raw (`type` plus `records` with
//! preformatted zone-file content) or typed (per-type structures such as
//! [`ARecord`] or [`MxRecord`] whose fields are assembled into content
//! strings here). Fields the server expects to be quoted (TXT/SPF strings,
//! HINFO cpu/os, NAPTR flags/services/regexp, CAA value) are normalized to
//! exactly one surrounding pair of double quotes, so callers may supply
//! them quoted or bare.
//!
//! [`plan`] computes the PATCH document that converges a zone's RRsets to
//! the desired state. An empty plan means the zone is already converged
//! and no request should be made.

use serde::Deserialize;

use crate::api::types::{ChangeType, Record, Rrset};
use crate::errors::{Error, Result};

/// Default TTL for records, in seconds.
pub const DEFAULT_TTL: u32 = 3600;

fn default_ttl() -> u32 {
    DEFAULT_TTL
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

fn default_soa_minimum() -> u32 {
    172_800
}

/// Desired presence of an RRset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RrsetState {
    /// The records must exist
    #[default]
    Present,
    /// The records (or the whole set) must not exist
    Absent,
}

/// One raw record, preformatted in zone-file syntax.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecordSpec {
    /// Record content, e.g. `192.0.2.1` or `10 mail.example.org.`
    pub content: String,
    /// Whether the record is disabled
    #[serde(default)]
    pub disabled: bool,
}

/// An `A` record.
#[derive(Debug, Clone, Deserialize)]
pub struct ARecord {
    /// IPv4 address
    pub address: String,
    /// Whether the record is disabled
    #[serde(default)]
    pub disabled: bool,
}

/// An `AAAA` record.
#[derive(Debug, Clone, Deserialize)]
pub struct AaaaRecord {
    /// IPv6 address
    pub address: String,
    /// Whether the record is disabled
    #[serde(default)]
    pub disabled: bool,
}

/// A `CNAME` record.
#[derive(Debug, Clone, Deserialize)]
pub struct CnameRecord {
    /// Canonical domain name
    pub cname: String,
    /// Whether the record is disabled
    #[serde(default)]
    pub disabled: bool,
}

/// An `MX` record.
#[derive(Debug, Clone, Deserialize)]
pub struct MxRecord {
    /// Delivery preference, lower wins
    pub preference: u16,
    /// Mail server hostname
    pub exchange: String,
    /// Whether the record is disabled
    #[serde(default)]
    pub disabled: bool,
}

/// An `NS` record.
#[derive(Debug, Clone, Deserialize)]
pub struct NsRecord {
    /// Name server hostname
    pub host: String,
    /// Whether the record is disabled
    #[serde(default)]
    pub disabled: bool,
}

/// A `PTR` record.
#[derive(Debug, Clone, Deserialize)]
pub struct PtrRecord {
    /// Domain name pointed to
    pub ptrdname: String,
    /// Whether the record is disabled
    #[serde(default)]
    pub disabled: bool,
}

/// A `TXT` record. The strings field is quoted on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct TxtRecord {
    /// Text content
    pub strings: String,
    /// Whether the record is disabled
    #[serde(default)]
    pub disabled: bool,
}

/// An `SPF` record. The strings field is quoted on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct SpfRecord {
    /// Policy content
    pub strings: String,
    /// Whether the record is disabled
    #[serde(default)]
    pub disabled: bool,
}

/// An `SRV` record.
#[derive(Debug, Clone, Deserialize)]
pub struct SrvRecord {
    /// Priority of the target host, lower wins
    pub priority: u16,
    /// Relative weight among records of the same priority
    pub weight: u16,
    /// TCP or UDP port
    pub port: u16,
    /// Target hostname
    pub target: String,
    /// Whether the record is disabled
    #[serde(default)]
    pub disabled: bool,
}

/// A `CAA` record. The value field is quoted on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct CaaRecord {
    /// Critical flag, 0 or 128
    #[serde(default)]
    pub flags: u8,
    /// Property tag (`issue`, `issuewild`, `iodef`)
    pub tag: String,
    /// Property value
    pub value: String,
    /// Whether the record is disabled
    #[serde(default)]
    pub disabled: bool,
}

/// An `HINFO` record. Both fields are quoted on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct HinfoRecord {
    /// CPU type
    pub cpu: String,
    /// Operating system
    pub os: String,
    /// Whether the record is disabled
    #[serde(default)]
    pub disabled: bool,
}

/// A `NAPTR` record. Flags, services and regexp are quoted on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct NaptrRecord {
    /// Processing order
    pub order: u16,
    /// Preference among records of the same order
    pub preference: u16,
    /// Flags field
    pub flags: String,
    /// Services field
    pub services: String,
    /// Substitution expression
    pub regexp: String,
    /// Replacement domain name
    pub replacement: String,
    /// Whether the record is disabled
    #[serde(default)]
    pub disabled: bool,
}

/// An `SOA` record.
#[derive(Debug, Clone, Deserialize)]
pub struct SoaRecord {
    /// Primary master name server
    pub mname: String,
    /// Zone administrator mailbox, in domain-name form
    pub rname: String,
    /// Zone serial number
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
    #[serde(default = "default_soa_minimum")]
    pub minimum: u32,
    /// Whether the record is disabled
    #[serde(default)]
    pub disabled: bool,
}

impl SoaRecord {
    /// Assemble the zone-file content string.
    #[must_use]
    pub fn content(&self) -> String {
        format!(
            "{} {} {} {} {} {} {}",
            self.mname, self.rname, self.serial, self.refresh, self.retry, self.expire, self.minimum
        )
    }
}

/// Typed record lists, keyed by record type. At most one of these (or the
/// raw `type`/`records` pair) is expected per RRset entry, but several
/// types may be combined under one owner name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordForms {
    /// `A` records
    #[serde(default)]
    pub a: Option<Vec<ARecord>>,
    /// `AAAA` records
    #[serde(default)]
    pub aaaa: Option<Vec<AaaaRecord>>,
    /// `CNAME` records
    #[serde(default)]
    pub cname: Option<Vec<CnameRecord>>,
    /// `MX` records
    #[serde(default)]
    pub mx: Option<Vec<MxRecord>>,
    /// `NS` records
    #[serde(default)]
    pub ns: Option<Vec<NsRecord>>,
    /// `PTR` records
    #[serde(default)]
    pub ptr: Option<Vec<PtrRecord>>,
    /// `TXT` records
    #[serde(default)]
    pub txt: Option<Vec<TxtRecord>>,
    /// `SPF` records
    #[serde(default)]
    pub spf: Option<Vec<SpfRecord>>,
    /// `SRV` records
    #[serde(default)]
    pub srv: Option<Vec<SrvRecord>>,
    /// `CAA` records
    #[serde(default)]
    pub caa: Option<Vec<CaaRecord>>,
    /// `HINFO` records
    #[serde(default)]
    pub hinfo: Option<Vec<HinfoRecord>>,
    /// `NAPTR` records
    #[serde(default)]
    pub naptr: Option<Vec<NaptrRecord>>,
    /// `SOA` record
    #[serde(default)]
    pub soa: Option<Vec<SoaRecord>>,
}

/// A file-level document: the RRset entries of one zone.
#[derive(Debug, Clone, Deserialize)]
pub struct RrsetDocument {
    /// Name of the zone the entries belong to
    pub zone: String,
    /// The desired entries
    #[serde(default)]
    pub rrsets: Vec<RrsetSpec>,
}

/// One desired RRset entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RrsetSpec {
    /// Owner name; matched and submitted lowercased
    pub name: String,
    /// Presence of the records
    #[serde(default)]
    pub state: RrsetState,
    /// Keep records already present that the entry does not mention
    #[serde(default)]
    pub keep: bool,
    /// TTL in seconds
    #[serde(default = "default_ttl")]
    pub ttl: u32,
    /// Record type for the raw form
    #[serde(rename = "type", default)]
    pub rtype: Option<String>,
    /// Raw records, used together with `type`
    #[serde(default)]
    pub records: Option<Vec<RecordSpec>>,
    /// Typed records
    #[serde(flatten)]
    pub forms: RecordForms,
}

/// An RRset entry resolved to wire records, ready for planning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRrset {
    /// Owner name, lowercased
    pub name: String,
    /// Record type tag
    pub rtype: String,
    /// TTL in seconds
    pub ttl: u32,
    /// Keep unmentioned existing records
    pub keep: bool,
    /// REPLACE for present, DELETE for absent
    pub intent: ChangeType,
    /// The records, content fully assembled
    pub records: Vec<Record>,
}

/// Normalize a field to exactly one surrounding pair of double quotes.
#[must_use]
pub fn quoted(value: &str) -> String {
    let s = value.strip_prefix('"').unwrap_or(value);
    let s = s.strip_suffix('"').unwrap_or(s);
    format!("\"{s}\"")
}

fn record(content: String, disabled: bool) -> Record {
    Record { content, disabled }
}

impl RrsetSpec {
    /// Resolve this entry into one planned RRset per record type.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the raw and typed forms are mixed,
    /// when a present entry carries no records, or when an absent entry
    /// names no type.
    pub fn expand(&self) -> Result<Vec<PlannedRrset>> {
        let name = self.name.to_lowercase();
        let intent = match self.state {
            RrsetState::Present => ChangeType::Replace,
            RrsetState::Absent => ChangeType::Delete,
        };

        let typed = self.typed_sets();
        if !typed.is_empty() && (self.rtype.is_some() || self.records.is_some()) {
            return Err(Error::validation(format!(
                "rrset '{}': typed record lists cannot be combined with 'type'/'records'",
                self.name
            )));
        }

        if !typed.is_empty() {
            return Ok(typed
                .into_iter()
                .map(|(rtype, records)| PlannedRrset {
                    name: name.clone(),
                    rtype: rtype.to_string(),
                    ttl: self.ttl,
                    keep: self.keep,
                    intent,
                    records,
                })
                .collect());
        }

        let Some(rtype) = &self.rtype else {
            return Err(Error::validation(format!(
                "rrset '{}': no record type given",
                self.name
            )));
        };
        let records: Vec<Record> = self
            .records
            .clone()
            .unwrap_or_default()
            .into_iter()
            .map(|r| record(r.content, r.disabled))
            .collect();
        if intent == ChangeType::Replace && records.is_empty() {
            return Err(Error::validation(format!(
                "rrset '{}': present state requires at least one record",
                self.name
            )));
        }

        Ok(vec![PlannedRrset {
            name,
            rtype: rtype.clone(),
            ttl: self.ttl,
            keep: self.keep,
            intent,
            records,
        }])
    }

    /// Assemble the typed record lists into wire records, in a fixed
    /// type order so plans are deterministic.
    fn typed_sets(&self) -> Vec<(&'static str, Vec<Record>)> {
        let f = &self.forms;
        let mut sets = Vec::new();

        if let Some(rs) = &f.a {
            sets.push((
                "A",
                rs.iter()
                    .map(|r| record(r.address.clone(), r.disabled))
                    .collect(),
            ));
        }
        if let Some(rs) = &f.aaaa {
            sets.push((
                "AAAA",
                rs.iter()
                    .map(|r| record(r.address.clone(), r.disabled))
                    .collect(),
            ));
        }
        if let Some(rs) = &f.caa {
            sets.push((
                "CAA",
                rs.iter()
                    .map(|r| {
                        record(
                            format!("{} {} {}", r.flags, r.tag, quoted(&r.value)),
                            r.disabled,
                        )
                    })
                    .collect(),
            ));
        }
        if let Some(rs) = &f.cname {
            sets.push((
                "CNAME",
                rs.iter()
                    .map(|r| record(r.cname.clone(), r.disabled))
                    .collect(),
            ));
        }
        if let Some(rs) = &f.hinfo {
            sets.push((
                "HINFO",
                rs.iter()
                    .map(|r| record(format!("{} {}", quoted(&r.cpu), quoted(&r.os)), r.disabled))
                    .collect(),
            ));
        }
        if let Some(rs) = &f.mx {
            sets.push((
                "MX",
                rs.iter()
                    .map(|r| record(format!("{} {}", r.preference, r.exchange), r.disabled))
                    .collect(),
            ));
        }
        if let Some(rs) = &f.naptr {
            sets.push((
                "NAPTR",
                rs.iter()
                    .map(|r| {
                        record(
                            format!(
                                "{} {} {} {} {} {}",
                                r.order,
                                r.preference,
                                quoted(&r.flags),
                                quoted(&r.services),
                                quoted(&r.regexp),
                                r.replacement
                            ),
                            r.disabled,
                        )
                    })
                    .collect(),
            ));
        }
        if let Some(rs) = &f.ns {
            sets.push((
                "NS",
                rs.iter()
                    .map(|r| record(r.host.clone(), r.disabled))
                    .collect(),
            ));
        }
        if let Some(rs) = &f.ptr {
            sets.push((
                "PTR",
                rs.iter()
                    .map(|r| record(r.ptrdname.clone(), r.disabled))
                    .collect(),
            ));
        }
        if let Some(rs) = &f.soa {
            sets.push((
                "SOA",
                rs.iter().map(|r| record(r.content(), r.disabled)).collect(),
            ));
        }
        if let Some(rs) = &f.spf {
            sets.push((
                "SPF",
                rs.iter()
                    .map(|r| record(quoted(&r.strings), r.disabled))
                    .collect(),
            ));
        }
        if let Some(rs) = &f.srv {
            sets.push((
                "SRV",
                rs.iter()
                    .map(|r| {
                        record(
                            format!("{} {} {} {}", r.priority, r.weight, r.port, r.target),
                            r.disabled,
                        )
                    })
                    .collect(),
            ));
        }
        if let Some(rs) = &f.txt {
            sets.push((
                "TXT",
                rs.iter()
                    .map(|r| record(quoted(&r.strings), r.disabled))
                    .collect(),
            ));
        }

        sets
    }
}

/// Compute the PATCH document converging `existing` to the planned sets.
///
/// For each planned set, keyed by lowercased owner name and type:
///
/// - no existing set, or `keep` off: the plan is emitted verbatim
///   (a DELETE of a set that does not exist is an error)
/// - records identical: a DELETE intent removes the whole set, a
///   REPLACE intent emits nothing
/// - otherwise the plan merges: REPLACE appends the planned records that
///   are missing, DELETE removes the planned records that are present,
///   and a REPLACE of the merged list is emitted only if it actually
///   differs from what the server holds
///
/// # Errors
///
/// Returns [`Error::RrsetNotFound`] for a DELETE of a set that is not
/// present on the server.
pub fn plan(planned: &[PlannedRrset], existing: &[Rrset]) -> Result<Vec<Rrset>> {
    let mut patch = Vec::new();

    for set in planned {
        let current = existing
            .iter()
            .find(|r| r.name.to_lowercase() == set.name && r.rtype == set.rtype);

        let Some(current) = current else {
            match set.intent {
                ChangeType::Replace => patch.push(Rrset {
                    name: set.name.clone(),
                    rtype: set.rtype.clone(),
                    ttl: set.ttl,
                    records: set.records.clone(),
                    changetype: Some(ChangeType::Replace),
                }),
                ChangeType::Delete => {
                    return Err(Error::RrsetNotFound {
                        name: set.name.clone(),
                        rtype: set.rtype.clone(),
                    })
                }
            }
            continue;
        };

        if !set.keep {
            patch.push(Rrset {
                name: set.name.clone(),
                rtype: set.rtype.clone(),
                ttl: set.ttl,
                records: set.records.clone(),
                changetype: Some(set.intent),
            });
            continue;
        }

        if set.records == current.records {
            // identical records with keep: DELETE drops the whole set,
            // REPLACE has nothing left to do
            if set.intent == ChangeType::Delete {
                patch.push(Rrset {
                    name: set.name.clone(),
                    rtype: set.rtype.clone(),
                    ttl: set.ttl,
                    records: Vec::new(),
                    changetype: Some(ChangeType::Delete),
                });
            }
            continue;
        }

        let merged: Vec<Record> = match set.intent {
            ChangeType::Replace => current
                .records
                .iter()
                .cloned()
                .chain(
                    set.records
                        .iter()
                        .filter(|r| !current.records.contains(r))
                        .cloned(),
                )
                .collect(),
            ChangeType::Delete => current
                .records
                .iter()
                .filter(|r| !set.records.contains(r))
                .cloned()
                .collect(),
        };

        if merged != current.records {
            patch.push(Rrset {
                name: set.name.clone(),
                rtype: set.rtype.clone(),
                ttl: set.ttl,
                records: merged,
                changetype: Some(ChangeType::Replace),
            });
        }
    }

    Ok(patch)
}

/// Filter a zone's RRsets by optional owner name and type, for existence
/// queries. Name matching is case-insensitive.
#[must_use]
pub fn find<'a>(
    rrsets: &'a [Rrset],
    name: Option<&str>,
    rtype: Option<&str>,
) -> Vec<&'a Rrset> {
    let name = name.map(str::to_lowercase);
    rrsets
        .iter()
        .filter(|r| {
            name.as_deref()
                .is_none_or(|n| r.name.to_lowercase() == n)
        })
        .filter(|r| rtype.is_none_or(|t| r.rtype == t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, rtype: &str, contents: &[&str]) -> Rrset {
        Rrset {
            name: name.to_string(),
            rtype: rtype.to_string(),
            ttl: DEFAULT_TTL,
            records: contents
                .iter()
                .map(|c| Record {
                    content: (*c).to_string(),
                    disabled: false,
                })
                .collect(),
            changetype: None,
        }
    }

    fn planned(
        name: &str,
        rtype: &str,
        contents: &[&str],
        keep: bool,
        intent: ChangeType,
    ) -> PlannedRrset {
        PlannedRrset {
            name: name.to_string(),
            rtype: rtype.to_string(),
            ttl: DEFAULT_TTL,
            keep,
            intent,
            records: contents
                .iter()
                .map(|c| Record {
                    content: (*c).to_string(),
                    disabled: false,
                })
                .collect(),
        }
    }

    #[test]
    fn quoting_is_normalizing() {
        assert_eq!(quoted("v=spf1 -all"), "\"v=spf1 -all\"");
        assert_eq!(quoted("\"v=spf1 -all\""), "\"v=spf1 -all\"");
        assert_eq!(quoted(""), "\"\"");
    }

    #[test]
    fn typed_forms_assemble_content() {
        let spec: RrsetSpec = serde_yaml::from_str(
            r#"
name: Mail.Example.Org.
mx:
  - preference: 10
    exchange: mx1.example.org.
txt:
  - strings: v=spf1 -all
"#,
        )
        .unwrap();
        let sets = spec.expand().unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].name, "mail.example.org.");
        assert_eq!(sets[0].rtype, "MX");
        assert_eq!(sets[0].records[0].content, "10 mx1.example.org.");
        assert_eq!(sets[1].rtype, "TXT");
        assert_eq!(sets[1].records[0].content, "\"v=spf1 -all\"");
    }

    #[test]
    fn naptr_quotes_three_fields() {
        let spec: RrsetSpec = serde_yaml::from_str(
            r#"
name: example.org.
naptr:
  - order: 100
    preference: 50
    flags: s
    services: SIP+D2U
    regexp: ""
    replacement: _sip._udp.example.org.
"#,
        )
        .unwrap();
        let sets = spec.expand().unwrap();
        assert_eq!(
            sets[0].records[0].content,
            "100 50 \"s\" \"SIP+D2U\" \"\" _sip._udp.example.org."
        );
    }

    #[test]
    fn mixing_typed_and_raw_forms_is_rejected() {
        let spec: RrsetSpec = serde_yaml::from_str(
            r#"
name: example.org.
type: A
records:
  - content: 192.0.2.1
a:
  - address: 192.0.2.1
"#,
        )
        .unwrap();
        assert!(spec.expand().is_err());
    }

    #[test]
    fn present_without_records_is_rejected() {
        let spec: RrsetSpec = serde_yaml::from_str("{name: example.org., type: A}").unwrap();
        assert!(spec.expand().is_err());
    }

    #[test]
    fn replace_of_missing_set_is_emitted_verbatim() {
        let sets = [planned(
            "www.example.org.",
            "A",
            &["192.0.2.1"],
            true,
            ChangeType::Replace,
        )];
        let patch = plan(&sets, &[]).unwrap();
        assert_eq!(patch.len(), 1);
        assert_eq!(patch[0].changetype, Some(ChangeType::Replace));
        assert_eq!(patch[0].records.len(), 1);
    }

    #[test]
    fn delete_of_missing_set_fails() {
        let sets = [planned(
            "www.example.org.",
            "A",
            &[],
            false,
            ChangeType::Delete,
        )];
        let err = plan(&sets, &[]).unwrap_err();
        assert!(matches!(err, Error::RrsetNotFound { .. }));
    }

    #[test]
    fn keep_appends_missing_records() {
        let existing = [raw("www.example.org.", "A", &["192.0.2.1"])];
        let sets = [planned(
            "www.example.org.",
            "A",
            &["192.0.2.2"],
            true,
            ChangeType::Replace,
        )];
        let patch = plan(&sets, &existing).unwrap();
        assert_eq!(patch.len(), 1);
        let contents: Vec<&str> = patch[0].records.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, vec!["192.0.2.1", "192.0.2.2"]);
        assert_eq!(patch[0].changetype, Some(ChangeType::Replace));
    }

    #[test]
    fn keep_with_identical_records_is_a_noop() {
        let existing = [raw("www.example.org.", "A", &["192.0.2.1"])];
        let sets = [planned(
            "www.example.org.",
            "A",
            &["192.0.2.1"],
            true,
            ChangeType::Replace,
        )];
        let patch = plan(&sets, &existing).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn delete_with_keep_removes_only_named_records() {
        let existing = [raw(
            "www.example.org.",
            "A",
            &["192.0.2.1", "192.0.2.2", "192.0.2.3"],
        )];
        let sets = [planned(
            "www.example.org.",
            "A",
            &["192.0.2.2"],
            true,
            ChangeType::Delete,
        )];
        let patch = plan(&sets, &existing).unwrap();
        assert_eq!(patch.len(), 1);
        assert_eq!(patch[0].changetype, Some(ChangeType::Replace));
        let contents: Vec<&str> = patch[0].records.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, vec!["192.0.2.1", "192.0.2.3"]);
    }

    #[test]
    fn delete_with_keep_of_absent_records_is_a_noop() {
        let existing = [raw("www.example.org.", "A", &["192.0.2.1"])];
        let sets = [planned(
            "www.example.org.",
            "A",
            &["198.51.100.7"],
            true,
            ChangeType::Delete,
        )];
        let patch = plan(&sets, &existing).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn delete_with_keep_and_identical_records_drops_the_set() {
        let existing = [raw("www.example.org.", "A", &["192.0.2.1"])];
        let sets = [planned(
            "www.example.org.",
            "A",
            &["192.0.2.1"],
            true,
            ChangeType::Delete,
        )];
        let patch = plan(&sets, &existing).unwrap();
        assert_eq!(patch.len(), 1);
        assert_eq!(patch[0].changetype, Some(ChangeType::Delete));
        assert!(patch[0].records.is_empty());
    }

    #[test]
    fn owner_names_match_case_insensitively() {
        let existing = [raw("WWW.Example.Org.", "A", &["192.0.2.1"])];
        let sets = [planned(
            "www.example.org.",
            "A",
            &["192.0.2.1"],
            true,
            ChangeType::Replace,
        )];
        let patch = plan(&sets, &existing).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn find_filters_by_name_and_type() {
        let rrsets = vec![
            raw("example.org.", "SOA", &["..."]),
            raw("example.org.", "NS", &["ns1.example.org."]),
            raw("www.example.org.", "A", &["192.0.2.1"]),
        ];
        assert_eq!(find(&rrsets, None, None).len(), 3);
        assert_eq!(find(&rrsets, Some("EXAMPLE.ORG."), None).len(), 2);
        assert_eq!(find(&rrsets, Some("example.org."), Some("NS")).len(), 1);
        assert!(find(&rrsets, Some("missing."), None).is_empty());
    }
}
