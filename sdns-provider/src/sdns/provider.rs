//! s-dns `RecordProvider` trait 实现
//!
//! Append, set and delete are two sequential exchanges: a zone query for the
//! TTL and the mutation itself. The mutation response carries no TTLs and
//! echoes every submitted record, so results are filtered by outcome and
//! re-hydrated with the zone TTL from the same call.
//!
//! Append and set read the TTL before mutating; delete reads it afterwards.
//! The token is checked between the two phases.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::{ProviderError, Result};
use crate::traits::{ErrorContext, RecordProvider};
use crate::types::{Action, PerformedAction, Record, filter_outcome};

use super::{PROVIDER_ID, SdnsProvider};

fn log_failure(operation: &str, zone: &str, error: &ProviderError) {
    if error.is_expected() {
        log::warn!("[sdns] {operation} {zone} failed: {error}");
    } else {
        log::error!("[sdns] {operation} {zone} failed: {error}");
    }
}

impl SdnsProvider {
    /// Zone TTL first, then add/update, keeping only `wanted` outcomes.
    async fn upsert_filtered(
        &self,
        zone: &str,
        records: &[Record],
        keep_existing: bool,
        wanted: PerformedAction,
        cancel: &CancellationToken,
    ) -> Result<Vec<Record>> {
        let export = self.get_zone(zone, cancel).await?;
        ErrorContext::new(Action::AddOrUpdate, zone).ensure_active(cancel)?;

        let outcome = self
            .add_or_update(zone, records, keep_existing, cancel)
            .await?;
        Ok(filter_outcome(&outcome, wanted, export.ttl))
    }

    /// Delete, then read the TTL, keeping only `deleted` outcomes.
    async fn delete_filtered(
        &self,
        zone: &str,
        records: &[Record],
        cancel: &CancellationToken,
    ) -> Result<Vec<Record>> {
        let outcome = self.delete(zone, records, cancel).await?;
        ErrorContext::new(Action::GetZone, zone).ensure_active(cancel)?;

        // post-mutation TTL, reflecting any SOA change the delete caused
        let export = self.get_zone(zone, cancel).await?;
        Ok(filter_outcome(&outcome, PerformedAction::Deleted, export.ttl))
    }
}

#[async_trait]
impl RecordProvider for SdnsProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_records(&self, zone: &str, cancel: &CancellationToken) -> Result<Vec<Record>> {
        let export = self
            .get_zone(zone, cancel)
            .await
            .inspect_err(|e| log_failure("get_records", zone, e))?;
        Ok(export.to_records())
    }

    async fn append_records(
        &self,
        zone: &str,
        records: &[Record],
        cancel: &CancellationToken,
    ) -> Result<Vec<Record>> {
        let added = self
            .upsert_filtered(zone, records, true, PerformedAction::Added, cancel)
            .await
            .inspect_err(|e| log_failure("append_records", zone, e))?;

        log::info!(
            "[sdns] append_records {zone}: {} submitted, {} added",
            records.len(),
            added.len()
        );
        Ok(added)
    }

    async fn set_records(
        &self,
        zone: &str,
        records: &[Record],
        cancel: &CancellationToken,
    ) -> Result<Vec<Record>> {
        let updated = self
            .upsert_filtered(zone, records, false, PerformedAction::Updated, cancel)
            .await
            .inspect_err(|e| log_failure("set_records", zone, e))?;

        log::info!(
            "[sdns] set_records {zone}: {} submitted, {} updated",
            records.len(),
            updated.len()
        );
        Ok(updated)
    }

    async fn delete_records(
        &self,
        zone: &str,
        records: &[Record],
        cancel: &CancellationToken,
    ) -> Result<Vec<Record>> {
        let deleted = self
            .delete_filtered(zone, records, cancel)
            .await
            .inspect_err(|e| log_failure("delete_records", zone, e))?;
        log::info!(
            "[sdns] delete_records {zone}: {} submitted, {} deleted",
            records.len(),
            deleted.len()
        );
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::super::test_support::{Reply, ScriptedTransport, provider};
    use super::*;

    const EMPTY_ZONE: &str = r#"<zone name="example.com"><soa refresh="3600" retry="900" expire="604800" mttl="3600"/></zone>"#;

    fn zone_with_ttl(ttl: u32) -> String {
        format!(
            r#"<zone name="example.com"><soa mttl="{ttl}"/><rr host="www" type="A" value="1.2.3.4"/><rr host="@" type="TXT" value="hello"/></zone>"#
        )
    }

    fn mutation_reply(records: &[(&str, Option<&str>)]) -> String {
        let rrs: String = records
            .iter()
            .map(|(host, tag)| match tag {
                Some(tag) => format!(
                    r#"<rr host="{host}" type="A" value="1.2.3.4" performedAction="{tag}"/>"#
                ),
                None => format!(r#"<rr host="{host}" type="A" value="1.2.3.4"/>"#),
            })
            .collect();
        format!(r#"<zoneRequest status="ok" zone="example.com">{rrs}</zoneRequest>"#)
    }

    fn www() -> Record {
        Record::new("www", "A", "1.2.3.4")
    }

    #[tokio::test]
    async fn append_into_empty_zone_returns_added_with_zone_ttl() {
        let transport = ScriptedTransport::new(vec![
            Reply::body(EMPTY_ZONE),
            Reply::body(&mutation_reply(&[("www", Some("added"))])),
        ]);
        let provider = provider(transport.clone());

        let added = provider
            .append_records("example.com", &[www()], &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            added,
            vec![Record::new("www", "A", "1.2.3.4").with_ttl(Duration::from_secs(3600))]
        );
        assert_eq!(transport.actions(), vec!["GETZONE", "ADDORUPDATERR"]);
        assert!(transport.body(1).contains(r#"keepExisting="true""#));
    }

    #[tokio::test]
    async fn repeated_append_returns_nothing() {
        let transport = ScriptedTransport::new(vec![
            Reply::body(&zone_with_ttl(3600)),
            Reply::body(&mutation_reply(&[("www", None)])),
        ]);
        let provider = provider(transport);

        let added = provider
            .append_records("example.com", &[www()], &CancellationToken::new())
            .await
            .unwrap();

        assert!(added.is_empty());
    }

    #[tokio::test]
    async fn append_ignores_updated_outcomes() {
        let transport = ScriptedTransport::new(vec![
            Reply::body(EMPTY_ZONE),
            Reply::body(&mutation_reply(&[
                ("www", Some("updated")),
                ("api", Some("added")),
            ])),
        ]);
        let provider = provider(transport);

        let added = provider
            .append_records(
                "example.com",
                &[www(), Record::new("api", "A", "1.2.3.4")],
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(added.len(), 1);
        assert_eq!(added[0].name, "api");
    }

    #[tokio::test]
    async fn set_returns_only_updated() {
        let transport = ScriptedTransport::new(vec![
            Reply::body(&zone_with_ttl(600)),
            Reply::body(&mutation_reply(&[
                ("www", Some("updated")),
                ("new", Some("added")),
                ("same", None),
            ])),
        ]);
        let provider = provider(transport.clone());

        let updated = provider
            .set_records(
                "example.com",
                &[
                    www(),
                    Record::new("new", "A", "1.2.3.4"),
                    Record::new("same", "A", "1.2.3.4"),
                ],
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(
            updated,
            vec![Record::new("www", "A", "1.2.3.4").with_ttl(Duration::from_secs(600))]
        );
        assert!(!transport.body(1).contains("keepExisting"));
    }

    #[tokio::test]
    async fn get_records_applies_zone_ttl() {
        let transport = ScriptedTransport::new(vec![Reply::body(&zone_with_ttl(7200))]);
        let provider = provider(transport.clone());

        let records = provider
            .get_records("example.com", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.ttl == Duration::from_secs(7200)));
        assert_eq!(transport.actions(), vec!["GETZONE"]);
    }

    #[tokio::test]
    async fn delete_mutates_first_and_filters_deleted() {
        let transport = ScriptedTransport::new(vec![
            Reply::body(&mutation_reply(&[("www", Some("deleted")), ("ghost", None)])),
            Reply::body(&zone_with_ttl(300)),
        ]);
        let provider = provider(transport.clone());

        let deleted = provider
            .delete_records(
                "example.com",
                &[www(), Record::new("ghost", "A", "1.2.3.4")],
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(
            deleted,
            vec![Record::new("www", "A", "1.2.3.4").with_ttl(Duration::from_secs(300))]
        );
        assert_eq!(transport.actions(), vec!["DELRR", "GETZONE"]);
    }

    #[tokio::test]
    async fn zone_query_failure_aborts_append_before_mutation() {
        let ctx = ErrorContext::new(Action::GetZone, "example.com");
        let transport = ScriptedTransport::new(vec![Reply::error(ctx.network_error("refused"))]);
        let provider = provider(transport.clone());

        let result = provider
            .append_records("example.com", &[www()], &CancellationToken::new())
            .await;

        assert!(
            matches!(&result, Err(ProviderError::NetworkError { action, .. }) if action == "GETZONE"),
            "unexpected result: {result:?}"
        );
        assert_eq!(transport.actions(), vec!["GETZONE"]);
    }

    #[tokio::test]
    async fn mutation_failure_returns_no_partial_results() {
        let transport = ScriptedTransport::new(vec![
            Reply::body(EMPTY_ZONE),
            Reply::body(r#"<zoneRequest status="ERR: quota"><rr host="www" type="A" value="1.2.3.4" performedAction="added"/></zoneRequest>"#),
        ]);
        let provider = provider(transport);

        let result = provider
            .append_records("example.com", &[www()], &CancellationToken::new())
            .await;

        assert!(
            matches!(&result, Err(ProviderError::ProviderStatus { status, .. }) if status == "ERR: quota"),
            "unexpected result: {result:?}"
        );
    }

    #[tokio::test]
    async fn ttl_fetch_failure_after_delete_fails_whole_operation() {
        let ctx = ErrorContext::new(Action::GetZone, "example.com");
        let transport = ScriptedTransport::new(vec![
            Reply::body(&mutation_reply(&[("www", Some("deleted"))])),
            Reply::error(ctx.http_status(500)),
        ]);
        let provider = provider(transport);

        let result = provider
            .delete_records("example.com", &[www()], &CancellationToken::new())
            .await;

        assert!(
            matches!(&result, Err(ProviderError::HttpStatus { status: 500, .. })),
            "unexpected result: {result:?}"
        );
    }

    #[tokio::test]
    async fn cancellation_after_first_phase_prevents_mutation() {
        let transport = ScriptedTransport::new(vec![Reply::body(EMPTY_ZONE).then_cancel()]);
        let provider = provider(transport.clone());

        let result = provider
            .set_records("example.com", &[www()], &CancellationToken::new())
            .await;

        assert!(
            matches!(&result, Err(ProviderError::Cancelled { action, .. }) if action == "ADDORUPDATERR"),
            "unexpected result: {result:?}"
        );
        assert_eq!(transport.actions(), vec!["GETZONE"]);
    }

    #[tokio::test]
    async fn cancellation_after_delete_skips_ttl_fetch() {
        let transport = ScriptedTransport::new(vec![
            Reply::body(&mutation_reply(&[("www", Some("deleted"))])).then_cancel(),
        ]);
        let provider = provider(transport.clone());

        let result = provider
            .delete_records("example.com", &[www()], &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(ProviderError::Cancelled { .. })));
        assert_eq!(transport.actions(), vec!["DELRR"]);
    }

    #[tokio::test]
    async fn unknown_outcome_tag_fails_operation() {
        let transport = ScriptedTransport::new(vec![
            Reply::body(EMPTY_ZONE),
            Reply::body(&mutation_reply(&[("www", Some("merged"))])),
        ]);
        let provider = provider(transport);

        let result = provider
            .append_records("example.com", &[www()], &CancellationToken::new())
            .await;

        assert!(
            matches!(&result, Err(ProviderError::UnrecognizedAction { tag, .. }) if tag == "merged"),
            "unexpected result: {result:?}"
        );
    }

    #[tokio::test]
    async fn ttl_is_fetched_fresh_on_every_call() {
        let transport = ScriptedTransport::new(vec![
            Reply::body(&zone_with_ttl(3600)),
            Reply::body(&mutation_reply(&[("www", Some("added"))])),
            Reply::body(&zone_with_ttl(60)),
            Reply::body(&mutation_reply(&[("www", Some("updated"))])),
        ]);
        let provider = provider(transport.clone());
        let cancel = CancellationToken::new();

        let added = provider
            .append_records("example.com", &[www()], &cancel)
            .await
            .unwrap();
        let updated = provider
            .set_records("example.com", &[www()], &cancel)
            .await
            .unwrap();

        assert_eq!(added[0].ttl, Duration::from_secs(3600));
        assert_eq!(updated[0].ttl, Duration::from_secs(60));
        assert_eq!(
            transport.actions(),
            vec!["GETZONE", "ADDORUPDATERR", "GETZONE", "ADDORUPDATERR"]
        );
    }

    #[test]
    fn usable_as_trait_object() {
        let transport = ScriptedTransport::new(Vec::new());
        let provider: std::sync::Arc<dyn RecordProvider> =
            std::sync::Arc::new(provider(transport));
        assert_eq!(provider.id(), "sdns");
    }
}
