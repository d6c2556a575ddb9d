//! HTTP transport
//!
//! Every exchange with the provider is a single POST to one endpoint. This
//! module owns that exchange: sending, status checking, draining the body, and
//! aborting on cancellation. Encoding and decoding live in the codec.
//!
//! # Guarantees
//! - **Any non-2xx status is a hard failure** carrying the numeric code
//! - **No retries** - failures go straight back to the caller
//! - **The connection is released on every path** - the body is drained on
//!   status failures and the in-flight request is dropped on cancellation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::HeaderMap;
use tokio_util::sync::CancellationToken;

use crate::error::{ProviderError, Result};
use crate::traits::ErrorContext;

/// One outbound POST.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    /// Action and zone, for logging and errors.
    pub context: ErrorContext,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Sends a request and returns the raw response body.
///
/// Implementations must honor `cancel` by abandoning the exchange promptly and
/// must map failures onto the transport error kinds of [`ProviderError`]
/// using the request's [`ErrorContext`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(
        &self,
        url: &str,
        request: OutboundRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>>;
}

/// Create a reqwest client with the caller's timeouts.
///
/// `None` leaves the corresponding deadline unset.
pub fn create_http_client(
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(connect_timeout) = connect_timeout {
        builder = builder.connect_timeout(connect_timeout);
    }
    builder.build().map_err(|e| ProviderError::InvalidConfig {
        field: "http_client".to_string(),
        detail: e.to_string(),
    })
}

/// [`Transport`] backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn exchange(&self, url: &str, request: OutboundRequest) -> Result<Vec<u8>> {
        let ctx = request.context;
        log::debug!("[sdns] POST {url} ({} {})", ctx.action, ctx.zone);

        let response = self
            .client
            .post(url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ctx.timeout(e)
                } else {
                    ctx.network_error(e)
                }
            })?;

        let status = response.status();
        log::debug!("[sdns] Response Status: {status}");

        if !status.is_success() {
            // Drain so the connection can be reused
            if let Err(e) = response.bytes().await {
                log::debug!("[sdns] Discarding body of HTTP {status} failed: {e}");
            }
            log::warn!("[sdns] {} {} failed with HTTP {status}", ctx.action, ctx.zone);
            return Err(ctx.http_status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                ctx.timeout(e)
            } else {
                ctx.body_read(e)
            }
        })?;

        Ok(body.to_vec())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(
        &self,
        url: &str,
        request: OutboundRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>> {
        let ctx = request.context.clone();
        ctx.ensure_active(cancel)?;

        // Dropping the exchange future aborts the request and frees its connection.
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                log::debug!("[sdns] {} {} cancelled in flight", ctx.action, ctx.zone);
                Err(ctx.cancelled())
            }
            result = self.exchange(url, request) => result,
        }
    }
}
