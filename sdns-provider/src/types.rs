use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ============ Caller-facing records ============

/// A DNS resource record as callers see it.
///
/// Callers supply these for writes; reads and reconciliation results are
/// returned as these. The TTL on returned records is always the zone's SOA
/// minimum TTL, since the provider does not report per-record TTLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Record name, as the provider addresses it (usually relative to the zone).
    pub name: String,
    /// Record type, e.g. `A`, `TXT`.
    #[serde(rename = "type")]
    pub record_type: String,
    /// Record data, e.g. an address or a TXT value.
    pub data: String,
    /// Time to live.
    pub ttl: Duration,
}

impl Record {
    /// Record with a zero TTL; the provider applies the zone TTL on write.
    pub fn new(
        name: impl Into<String>,
        record_type: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            data: data.into(),
            ttl: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

// ============ Action verbs ============

/// Server-side action selected by a request.
///
/// Zone actions are upper case; the root-zone lookup lives in a separate,
/// lower-camel-case namespace with its own request shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    GetZone,
    AddOrUpdate,
    Delete,
    GetRootZone,
}

impl Action {
    /// Verb as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetZone => "GETZONE",
            Self::AddOrUpdate => "ADDORUPDATERR",
            Self::Delete => "DELRR",
            Self::GetRootZone => "getRootZone",
        }
    }

    /// Mutation payloads carry an explicit encoding declaration.
    pub fn is_mutation(self) -> bool {
        matches!(self, Self::AddOrUpdate | Self::Delete)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ Outcomes ============

/// What the provider actually did with a submitted record.
///
/// Authoritative only in mutation responses. Zone exports always decode to
/// [`Unchanged`](Self::Unchanged).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformedAction {
    Added,
    Updated,
    Deleted,
    /// No tag: the record was skipped or the request did not apply to it.
    #[default]
    Unchanged,
}

impl PerformedAction {
    /// Decode a wire tag. Absent and empty tags mean [`Unchanged`](Self::Unchanged).
    ///
    /// Returns the offending tag when it is not one of the known outcomes.
    pub fn from_tag(tag: Option<&str>) -> std::result::Result<Self, String> {
        let Some(tag) = tag.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(Self::Unchanged);
        };

        if tag.eq_ignore_ascii_case("added") {
            Ok(Self::Added)
        } else if tag.eq_ignore_ascii_case("updated") {
            Ok(Self::Updated)
        } else if tag.eq_ignore_ascii_case("deleted") {
            Ok(Self::Deleted)
        } else {
            Err(tag.to_string())
        }
    }
}

// ============ Provider-side records ============

/// A resource record in the provider's terms, after decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRecord {
    pub host: String,
    pub record_type: String,
    pub value: String,
    pub keep_existing: bool,
    pub performed_action: PerformedAction,
}

impl ProviderRecord {
    /// Re-hydrate as a caller-facing record carrying the zone TTL.
    pub fn to_record(&self, ttl: Duration) -> Record {
        Record {
            name: self.host.clone(),
            record_type: self.record_type.clone(),
            data: self.value.clone(),
            ttl,
        }
    }
}

/// Result of a zone query: the current record set and the SOA minimum TTL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ZoneExport {
    pub records: Vec<ProviderRecord>,
    /// SOA minimum TTL, used as the TTL of every record in the zone.
    pub ttl: Duration,
    pub reseller: Option<String>,
    pub dnssec: bool,
}

impl ZoneExport {
    /// Every record in the zone with the zone TTL applied uniformly.
    pub fn to_records(&self) -> Vec<Record> {
        self.records.iter().map(|r| r.to_record(self.ttl)).collect()
    }
}

/// Keep the records whose outcome matches `wanted`, as caller-facing records.
pub(crate) fn filter_outcome(
    records: &[ProviderRecord],
    wanted: PerformedAction,
    ttl: Duration,
) -> Vec<Record> {
    records
        .iter()
        .filter(|r| r.performed_action == wanted)
        .map(|r| r.to_record(ttl))
        .collect()
}
