//! s-dns.de Provider

mod codec;
mod http;
mod provider;
mod types;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Url};

use crate::config::{DEFAULT_ENDPOINT, SdnsConfig};
use crate::error::{ProviderError, Result};
use crate::http_client::{HttpTransport, Transport, create_http_client};

pub(crate) const PROVIDER_ID: &str = "sdns";

/// s-dns.de Provider
///
/// Holds the endpoint, the key and the transport. Cheap to clone; the
/// transport is shared. No state survives between calls.
#[derive(Clone)]
pub struct SdnsProvider {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) endpoint: String,
    pub(crate) ddns_key: String,
}

impl std::fmt::Debug for SdnsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SdnsProvider")
            .field("endpoint", &self.endpoint)
            .field(
                "ddns_key",
                &crate::utils::log_sanitizer::mask_secret(&self.ddns_key),
            )
            .finish_non_exhaustive()
    }
}

/// s-dns Provider Builder
pub struct SdnsProviderBuilder {
    ddns_key: String,
    endpoint: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    client: Option<Client>,
    transport: Option<Arc<dyn Transport>>,
}

impl SdnsProviderBuilder {
    fn new(ddns_key: String) -> Self {
        Self {
            ddns_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
            connect_timeout: None,
            client: None,
            transport: None,
        }
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Whole-request deadline. Unset by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Use a pre-built client. Timeouts set on the builder are ignored.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Use a custom transport instead of HTTP. Takes precedence over `client`.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<SdnsProvider> {
        if self.ddns_key.is_empty() {
            return Err(ProviderError::InvalidConfig {
                field: "ddns_key".to_string(),
                detail: "must not be empty".to_string(),
            });
        }

        Url::parse(&self.endpoint).map_err(|e| ProviderError::InvalidConfig {
            field: "endpoint".to_string(),
            detail: e.to_string(),
        })?;

        let transport = match (self.transport, self.client) {
            (Some(transport), _) => transport,
            (None, Some(client)) => Arc::new(HttpTransport::new(client)),
            (None, None) => Arc::new(HttpTransport::new(create_http_client(
                self.timeout,
                self.connect_timeout,
            )?)),
        };

        Ok(SdnsProvider {
            transport,
            endpoint: self.endpoint,
            ddns_key: self.ddns_key,
        })
    }
}

impl SdnsProvider {
    pub fn new(ddns_key: impl Into<String>) -> Result<Self> {
        Self::builder(ddns_key).build()
    }

    pub fn builder(ddns_key: impl Into<String>) -> SdnsProviderBuilder {
        SdnsProviderBuilder::new(ddns_key.into())
    }

    pub fn from_config(config: SdnsConfig) -> Result<Self> {
        let timeout = config.timeout();
        let connect_timeout = config.connect_timeout();

        let mut builder = Self::builder(config.ddns_key).endpoint(config.endpoint);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        builder.build()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
