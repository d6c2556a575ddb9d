//! s-dns 单次请求方法
//!
//! Each method here is exactly one exchange with the robot endpoint:
//! zone query, add/update, delete, and root-zone lookup.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::error::{ProviderError, Result};
use crate::http_client::OutboundRequest;
use crate::traits::ErrorContext;
use crate::types::{Action, ProviderRecord, Record, ZoneExport};
use crate::utils::log_sanitizer::{sanitize_body, truncate_for_log};

use super::SdnsProvider;
use super::codec;

const MUTATION_OK: &str = "ok";
const ROOT_ZONE_FOUND: &str = "found";

impl SdnsProvider {
    /// Encode, send, return the raw response body.
    async fn exchange<T: Serialize>(
        &self,
        ctx: &ErrorContext,
        request: &T,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>> {
        let body = codec::encode(request, ctx)?;
        log::debug!(
            "[sdns] Request Body: {}",
            sanitize_body(&String::from_utf8_lossy(&body))
        );

        let mut headers = HeaderMap::new();
        if ctx.action != Action::GetZone {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/xml"));
        }

        let response = self
            .transport
            .post(
                &self.endpoint,
                OutboundRequest {
                    context: ctx.clone(),
                    headers,
                    body,
                },
                cancel,
            )
            .await?;

        log::debug!(
            "[sdns] Response Body: {}",
            truncate_for_log(&String::from_utf8_lossy(&response))
        );
        Ok(response)
    }

    /// `GETZONE`: current records plus the SOA minimum TTL.
    ///
    /// Never cached; every call goes to the provider.
    pub async fn get_zone(&self, zone: &str, cancel: &CancellationToken) -> Result<ZoneExport> {
        let ctx = ErrorContext::new(Action::GetZone, zone);
        let request = codec::zone_request(Action::GetZone, &self.ddns_key, zone, &[], false);

        let body = self.exchange(&ctx, &request, cancel).await?;
        let export = codec::decode_zone(body, &ctx)?;

        log::debug!(
            "[sdns] Zone {zone}: {} records, ttl {}s",
            export.records.len(),
            export.ttl.as_secs()
        );
        Ok(export)
    }

    /// `ADDORUPDATERR`: one outcome per submitted record.
    ///
    /// With `keep_existing` the provider leaves existing name/type entries
    /// alone; otherwise it overwrites them. Any status other than `ok`
    /// (case-insensitive) is a [`ProviderError::ProviderStatus`] carrying the
    /// status verbatim.
    pub async fn add_or_update(
        &self,
        zone: &str,
        records: &[Record],
        keep_existing: bool,
        cancel: &CancellationToken,
    ) -> Result<Vec<ProviderRecord>> {
        let ctx = ErrorContext::new(Action::AddOrUpdate, zone);
        let request =
            codec::zone_request(Action::AddOrUpdate, &self.ddns_key, zone, records, keep_existing);

        let body = self.exchange(&ctx, &request, cancel).await?;
        let response = codec::decode_mutation(body, &ctx)?;

        if !response.status.eq_ignore_ascii_case(MUTATION_OK) {
            return Err(ctx.provider_status(response.status));
        }

        codec::classify_records(response.records, &ctx)
    }

    /// `DELRR`: whatever the provider reports, without a status gate.
    ///
    /// Callers filter on [`PerformedAction::Deleted`](crate::PerformedAction::Deleted);
    /// a response that only deleted some of the records is not an error.
    pub async fn delete(
        &self,
        zone: &str,
        records: &[Record],
        cancel: &CancellationToken,
    ) -> Result<Vec<ProviderRecord>> {
        let ctx = ErrorContext::new(Action::Delete, zone);
        let request = codec::zone_request(Action::Delete, &self.ddns_key, zone, records, false);

        let body = self.exchange(&ctx, &request, cancel).await?;
        let response = codec::decode_mutation(body, &ctx)?;

        if !response.status.eq_ignore_ascii_case(MUTATION_OK) {
            log::warn!(
                "[sdns] DELRR {zone} returned status '{}', reporting records as echoed",
                response.status
            );
        }

        codec::classify_records(response.records, &ctx)
    }

    /// `getRootZone`: the zone that administratively owns `hostname`.
    pub async fn get_root_zone(
        &self,
        hostname: &str,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let ctx = ErrorContext::new(Action::GetRootZone, hostname);
        let request = codec::root_zone_request(&self.ddns_key, hostname);

        let body = self.exchange(&ctx, &request, cancel).await?;
        let response = codec::decode_root_zone(body, &ctx)?;

        if response.status != ROOT_ZONE_FOUND {
            log::warn!(
                "[sdns] No root zone for {hostname} (status '{}')",
                response.status
            );
            return Err(ProviderError::RootZoneNotFound {
                hostname: hostname.to_string(),
                status: response.status,
            });
        }

        log::debug!("[sdns] Root zone of {hostname}: {}", response.zonename);
        Ok(response.zonename)
    }
}
