//! s-dns wire codec
//!
//! Encodes typed requests into the provider's XML and decodes its replies.
//! Decode failures always surface as `ParseError`; whether a well-formed reply
//! means success is decided by the caller of the codec, never here.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::traits::ErrorContext;
use crate::types::{Action, PerformedAction, ProviderRecord, Record, ZoneExport};

use super::types::{
    RootZoneRequest, RootZoneResponse, WireRecord, WireSoa, WireZone, ZoneRequest,
    ZoneResponse,
};

/// Declaration prefixed to mutation payloads. The body that follows is Latin-1.
pub(crate) const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n";

// ============ Request builders ============

/// Build a zone action envelope.
///
/// `keep_existing` is only meaningful for `ADDORUPDATERR`; it is forced off for
/// every other action so deletions never carry the flag.
pub(crate) fn zone_request(
    action: Action,
    ddns_key: &str,
    zone: &str,
    records: &[Record],
    keep_existing: bool,
) -> ZoneRequest {
    let keep_existing = keep_existing && action == Action::AddOrUpdate;
    let records = records
        .iter()
        .map(|r| WireRecord {
            host: r.name.clone(),
            record_type: r.record_type.clone(),
            value: r.data.clone(),
            keep_existing,
            performed_action: None,
        })
        .collect();

    ZoneRequest {
        zone: WireZone {
            name: zone.to_string(),
            action: action.as_str().to_string(),
            ddns_key: ddns_key.to_string(),
            records,
            ..WireZone::default()
        },
    }
}

pub(crate) fn root_zone_request(ddns_key: &str, hostname: &str) -> RootZoneRequest {
    RootZoneRequest {
        action: Action::GetRootZone.as_str(),
        ddns_key: ddns_key.to_string(),
        hostname: hostname.to_string(),
    }
}

// ============ Encoding ============

/// Serialize a request body for `ctx.action`.
///
/// Mutation payloads get the encoding declaration and are transcoded to
/// Latin-1; everything else is plain UTF-8 without a declaration.
pub(crate) fn encode<T: Serialize>(request: &T, ctx: &ErrorContext) -> Result<Vec<u8>> {
    let mut xml = String::new();
    let mut serializer = quick_xml::se::Serializer::new(&mut xml);
    serializer.indent(' ', 2);
    request
        .serialize(serializer)
        .map_err(|e| ctx.serialization_error(e))?;

    if !ctx.action.is_mutation() {
        return Ok(xml.into_bytes());
    }

    let mut body = Vec::with_capacity(XML_DECLARATION.len() + xml.len());
    body.extend_from_slice(XML_DECLARATION.as_bytes());
    body.extend(to_latin1(&xml));
    Ok(body)
}

/// Latin-1 bytes; characters beyond U+00FF become numeric character references.
fn to_latin1(xml: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(xml.len());
    for c in xml.chars() {
        if let Ok(byte) = u8::try_from(u32::from(c)) {
            out.push(byte);
        } else {
            out.extend_from_slice(format!("&#x{:X};", u32::from(c)).as_bytes());
        }
    }
    out
}

// ============ Decoding ============

/// Response text: UTF-8 if valid, Latin-1 otherwise.
fn decode_text(body: Vec<u8>) -> String {
    match String::from_utf8(body) {
        Ok(text) => text,
        Err(e) => e.into_bytes().into_iter().map(char::from).collect(),
    }
}

fn decode<T: DeserializeOwned>(body: Vec<u8>, ctx: &ErrorContext) -> Result<T> {
    let text = decode_text(body);
    quick_xml::de::from_str(&text).map_err(|e| {
        log::error!("[sdns] {} {}: XML parse failed: {e}", ctx.action, ctx.zone);
        ctx.parse_error(e)
    })
}

/// Decode a `GETZONE` export.
///
/// `performedAction` is not meaningful here and is ignored.
pub(crate) fn decode_zone(body: Vec<u8>, ctx: &ErrorContext) -> Result<ZoneExport> {
    let zone: WireZone = decode(body, ctx)?;
    let soa = zone.soa.unwrap_or_else(|| {
        log::warn!(
            "[sdns] {} {}: reply has no <soa>, check the key and zone name",
            ctx.action,
            ctx.zone
        );
        WireSoa::default()
    });
    // negative minimum TTLs clamp to zero
    let ttl = Duration::from_secs(u64::try_from(soa.mttl).unwrap_or(0));

    let records = zone
        .records
        .into_iter()
        .map(|r| ProviderRecord {
            host: r.host,
            record_type: r.record_type,
            value: r.value,
            keep_existing: r.keep_existing,
            performed_action: PerformedAction::Unchanged,
        })
        .collect();

    Ok(ZoneExport {
        records,
        ttl,
        reseller: zone.reseller,
        dnssec: zone.dnssec,
    })
}

/// Decode an `ADDORUPDATERR` / `DELRR` response. The status is not checked here.
pub(crate) fn decode_mutation(body: Vec<u8>, ctx: &ErrorContext) -> Result<ZoneResponse> {
    let response: ZoneResponse = decode(body, ctx)?;
    log::debug!(
        "[sdns] {} reply for zone '{}': status '{}', {} records",
        response.action,
        response.zone,
        response.status,
        response.records.len()
    );
    Ok(response)
}

pub(crate) fn decode_root_zone(body: Vec<u8>, ctx: &ErrorContext) -> Result<RootZoneResponse> {
    let response: RootZoneResponse = decode(body, ctx)?;
    log::debug!(
        "[sdns] getRootZone reply for '{}': status '{}'",
        response.hostname,
        response.status
    );
    Ok(response)
}

/// Turn echoed mutation records into typed outcomes.
pub(crate) fn classify_records(
    records: Vec<WireRecord>,
    ctx: &ErrorContext,
) -> Result<Vec<ProviderRecord>> {
    records
        .into_iter()
        .map(|r| {
            let performed_action = PerformedAction::from_tag(r.performed_action.as_deref())
                .map_err(|tag| ctx.unrecognized_action(tag))?;
            Ok(ProviderRecord {
                host: r.host,
                record_type: r.record_type,
                value: r.value,
                keep_existing: r.keep_existing,
                performed_action,
            })
        })
        .collect()
}
