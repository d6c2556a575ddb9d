//! Client configuration

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::utils::log_sanitizer::mask_secret;

/// s-dns robot endpoint
pub const DEFAULT_ENDPOINT: &str = "https://robot.s-dns.de:8488/";

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

/// Settings for an [`SdnsProvider`](crate::SdnsProvider), loadable from JSON or any other
/// serde format.
///
/// Timeouts are optional. When absent the client sets no deadline of its own
/// and the caller's cancellation token is the only bound.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdnsConfig {
    /// Pre-issued DDNS key, forwarded verbatim on every request.
    pub ddns_key: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Whole-request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,
}

impl SdnsConfig {
    pub fn new(ddns_key: impl Into<String>) -> Self {
        Self {
            ddns_key: ddns_key.into(),
            endpoint: default_endpoint(),
            timeout_secs: None,
            connect_timeout_secs: None,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }
}

impl fmt::Debug for SdnsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SdnsConfig")
            .field("ddns_key", &mask_secret(&self.ddns_key))
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}
