use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all s-dns operations.
///
/// Every variant that comes out of an exchange names the action verb
/// (`GETZONE`, `ADDORUPDATERR`, `DELRR`, `getRootZone`) and the zone (or, for
/// root-zone lookups, the hostname) it was issued for, so a failure deep in
/// the transport is still diagnosable at the caller.
///
/// The kinds stay distinguishable after wrapping: a body that cannot be
/// decoded is a [`ParseError`](Self::ParseError), a well-formed body carrying a
/// failure status is a [`ProviderStatus`](Self::ProviderStatus), and a non-2xx
/// HTTP reply is an [`HttpStatus`](Self::HttpStatus).
///
/// Nothing in this crate retries. [`is_transient`](Self::is_transient) is
/// there for callers that own a retry policy.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// Connection-level failure (refused, reset, name resolution of the endpoint).
    #[error("[{action} {zone}] Network error: {detail}")]
    NetworkError {
        /// Action verb of the failed exchange.
        action: String,
        /// Zone name or hostname the exchange was issued for.
        zone: String,
        /// Error details.
        detail: String,
    },

    /// The caller-supplied deadline elapsed before the exchange completed.
    #[error("[{action} {zone}] Request timeout: {detail}")]
    Timeout {
        /// Action verb of the failed exchange.
        action: String,
        /// Zone name or hostname the exchange was issued for.
        zone: String,
        /// Error details.
        detail: String,
    },

    /// The endpoint answered with a non-2xx HTTP status.
    #[error("[{action} {zone}] Unexpected HTTP status: {status}")]
    HttpStatus {
        /// Action verb of the failed exchange.
        action: String,
        /// Zone name or hostname the exchange was issued for.
        zone: String,
        /// Numeric HTTP status code.
        status: u16,
    },

    /// The response headers arrived but the body could not be read.
    #[error("[{action} {zone}] Failed to read response body: {detail}")]
    BodyRead {
        /// Action verb of the failed exchange.
        action: String,
        /// Zone name or hostname the exchange was issued for.
        zone: String,
        /// Error details.
        detail: String,
    },

    /// The caller cancelled the operation.
    #[error("[{action} {zone}] Operation cancelled")]
    Cancelled {
        /// Action verb that was in flight or about to start.
        action: String,
        /// Zone name or hostname the operation was issued for.
        zone: String,
    },

    /// The response body is not a well-formed provider document.
    #[error("[{action} {zone}] Parse error: {detail}")]
    ParseError {
        /// Action verb of the failed exchange.
        action: String,
        /// Zone name or hostname the exchange was issued for.
        zone: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// The request body could not be encoded.
    #[error("[{action} {zone}] Serialization error: {detail}")]
    SerializationError {
        /// Action verb of the failed exchange.
        action: String,
        /// Zone name or hostname the exchange was issued for.
        zone: String,
        /// Details about the encoding failure.
        detail: String,
    },

    /// A well-formed response whose status is not the success token.
    #[error("[{action} {zone}] Provider reported failure: {status}")]
    ProviderStatus {
        /// Action verb of the failed exchange.
        action: String,
        /// Zone name the exchange was issued for.
        zone: String,
        /// Status string exactly as the provider sent it.
        status: String,
    },

    /// No zone administratively owns the hostname.
    #[error("[getRootZone] Zone not found for hostname {hostname}")]
    RootZoneNotFound {
        /// Hostname that was looked up.
        hostname: String,
        /// Status string exactly as the provider sent it.
        status: String,
    },

    /// A mutation response tagged a record with an outcome this client does not know.
    #[error("[{action} {zone}] Unrecognized performed action '{tag}'")]
    UnrecognizedAction {
        /// Action verb of the exchange.
        action: String,
        /// Zone name the exchange was issued for.
        zone: String,
        /// The raw `performedAction` value.
        tag: String,
    },

    /// The client could not be constructed from the given settings.
    #[error("Invalid configuration '{field}': {detail}")]
    InvalidConfig {
        /// Offending setting.
        field: String,
        /// What is wrong with it.
        detail: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（凭证错误、区域不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Cancelled { .. }
                | Self::ProviderStatus { .. }
                | Self::RootZoneNotFound { .. }
                | Self::InvalidConfig { .. }
        )
    }

    /// Whether the same request may succeed if the caller tries again later.
    ///
    /// Network errors, timeouts and 5xx replies qualify. Provider-reported
    /// failures, parse errors and cancellations do not.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::BodyRead { .. } => true,
            Self::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
