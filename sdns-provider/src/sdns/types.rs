//! s-dns XML schema
//!
//! Attribute fields are prefixed with `@`; everything else is a child element.

use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

/// Boolean attribute in any of the spellings the robot emits.
///
/// Surrounding whitespace is ignored and an empty value is `false`.
fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(deserializer)?;
    match raw.trim() {
        "" | "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        other => Err(de::Error::invalid_value(Unexpected::Str(other), &"a boolean")),
    }
}

/// Signed integer attribute; an empty value is `0`.
fn lenient_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse()
        .map_err(|_| de::Error::invalid_value(Unexpected::Str(raw), &"an integer"))
}

/// Request envelope for zone actions (`GETZONE`, `ADDORUPDATERR`, `DELRR`)
#[derive(Debug, Serialize)]
#[serde(rename = "zoneRequest")]
pub struct ZoneRequest {
    pub zone: WireZone,
}

/// `<zone>` element
///
/// Sent inside a [`ZoneRequest`], and returned on its own by `GETZONE`.
/// `reseller`, `dnssec` and `soa` only appear in exports.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct WireZone {
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@action", default, skip_serializing_if = "String::is_empty")]
    pub action: String,
    #[serde(rename = "@ddnskey", default, skip_serializing_if = "String::is_empty")]
    pub ddns_key: String,
    #[serde(rename = "@reseller", default, skip_serializing_if = "Option::is_none")]
    pub reseller: Option<String>,
    #[serde(
        rename = "@dnssec",
        default,
        skip_serializing_if = "is_false",
        deserialize_with = "lenient_bool"
    )]
    pub dnssec: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soa: Option<WireSoa>,
    #[serde(rename = "rr", default)]
    pub records: Vec<WireRecord>,
}

/// `<soa>` element (export only)
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub struct WireSoa {
    #[serde(rename = "@refresh", default, deserialize_with = "lenient_int")]
    pub refresh: i64,
    #[serde(rename = "@retry", default, deserialize_with = "lenient_int")]
    pub retry: i64,
    #[serde(rename = "@expire", default, deserialize_with = "lenient_int")]
    pub expire: i64,
    /// Minimum TTL, applied to every record of the zone
    #[serde(rename = "@mttl", default, deserialize_with = "lenient_int")]
    pub mttl: i64,
}

/// `<rr>` element
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireRecord {
    #[serde(rename = "@host", default)]
    pub host: String,
    #[serde(rename = "@type", default)]
    pub record_type: String,
    #[serde(rename = "@value", default)]
    pub value: String,
    #[serde(
        rename = "@keepExisting",
        default,
        skip_serializing_if = "is_false",
        deserialize_with = "lenient_bool"
    )]
    pub keep_existing: bool,
    /// Set by the provider in mutation responses only
    #[serde(
        rename = "@performedAction",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub performed_action: Option<String>,
}

/// Response to `ADDORUPDATERR` / `DELRR`
#[derive(Debug, Default, Deserialize)]
pub struct ZoneResponse {
    #[serde(rename = "@status", default)]
    pub status: String,
    #[serde(rename = "@zone", default)]
    pub zone: String,
    #[serde(rename = "@action", default)]
    pub action: String,
    #[serde(rename = "rr", default)]
    pub records: Vec<WireRecord>,
}

/// `getRootZone` request
#[derive(Debug, Serialize)]
#[serde(rename = "zoneRequest")]
pub struct RootZoneRequest {
    #[serde(rename = "@action")]
    pub action: &'static str,
    #[serde(rename = "@ddnskey")]
    pub ddns_key: String,
    pub hostname: String,
}

/// `getRootZone` response
#[derive(Debug, Default, Deserialize)]
pub struct RootZoneResponse {
    #[serde(rename = "@status", default)]
    pub status: String,
    #[serde(default)]
    pub zonename: String,
    #[serde(default)]
    pub hostname: String,
}
