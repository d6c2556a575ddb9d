//! # sdns-provider
//!
//! Keeps a caller's view of DNS records in step with a zone hosted by the
//! [s-dns.de](https://www.s-dns.de/) robot, which speaks XML over HTTP.
//!
//! Callers work with plain [`Record`]s (name, type, data, TTL). The crate
//! translates them into the provider's zone/record/SOA schema, interprets the
//! per-record outcome the provider reports, and returns only what actually
//! happened.
//!
//! ## Operations
//!
//! | Operation | Exchanges | Returned records |
//! |-----------|-----------|------------------|
//! | [`get_records`](RecordProvider::get_records) | `GETZONE` | the whole zone |
//! | [`append_records`](RecordProvider::append_records) | `GETZONE`, `ADDORUPDATERR` (keep existing) | outcome `added` |
//! | [`set_records`](RecordProvider::set_records) | `GETZONE`, `ADDORUPDATERR` (overwrite) | outcome `updated` |
//! | [`delete_records`](RecordProvider::delete_records) | `DELRR`, `GETZONE` | outcome `deleted` |
//! | [`get_root_zone`](SdnsProvider::get_root_zone) | `getRootZone` | the owning zone name |
//!
//! The provider does not report per-record TTLs, so every returned record
//! carries the zone's SOA minimum TTL, fetched fresh within the same call.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)* - Use the platform's native TLS implementation.
//! - **`rustls`** - Use rustls. Recommended for cross-compilation and Android targets.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use sdns_provider::{CancellationToken, Record, RecordProvider, SdnsProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = SdnsProvider::builder("your-ddns-key")
//!         .timeout(Duration::from_secs(30))
//!         .build()?;
//!     let cancel = CancellationToken::new();
//!
//!     let zone = provider.get_root_zone("host.example.com", &cancel).await?;
//!
//!     let added = provider
//!         .append_records(&zone, &[Record::new("host", "A", "192.0.2.10")], &cancel)
//!         .await?;
//!     for record in &added {
//!         println!("{} {} {} ({}s)", record.name, record.record_type, record.data, record.ttl.as_secs());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError). Failures
//! are never retried and a failed composite operation returns no records.
//!
//! - [`ProviderError::NetworkError`] / [`ProviderError::Timeout`] - the exchange did not complete
//! - [`ProviderError::HttpStatus`] - non-2xx reply
//! - [`ProviderError::ParseError`] - the reply is not valid provider XML
//! - [`ProviderError::ProviderStatus`] - the provider refused the request
//! - [`ProviderError::RootZoneNotFound`] - no zone owns the hostname
//! - [`ProviderError::Cancelled`] - the caller's token fired

mod config;
mod error;
mod http_client;
mod sdns;
mod traits;
mod types;
mod utils;

pub use config::{DEFAULT_ENDPOINT, SdnsConfig};
pub use error::{ProviderError, Result};
pub use http_client::{HttpTransport, OutboundRequest, Transport, create_http_client};
pub use sdns::{SdnsProvider, SdnsProviderBuilder};
pub use traits::{ErrorContext, RecordProvider};
pub use types::{Action, PerformedAction, ProviderRecord, Record, ZoneExport};

pub use utils::log_sanitizer;

// Callers need the token type to invoke any operation.
pub use tokio_util::sync::CancellationToken;
