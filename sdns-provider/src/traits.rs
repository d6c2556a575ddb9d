use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::{ProviderError, Result};
use crate::types::{Action, Record};

/// Where an error happened: the action verb and the zone (or hostname).
///
/// Built once per exchange and handed down to the codec and transport so
/// that every layer produces errors carrying the same context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    pub action: Action,
    /// Zone name, or the hostname for root-zone lookups.
    pub zone: String,
}

impl ErrorContext {
    pub fn new(action: Action, zone: impl Into<String>) -> Self {
        Self {
            action,
            zone: zone.into(),
        }
    }

    fn action_name(&self) -> String {
        self.action.as_str().to_string()
    }

    /// 快捷方法：网络错误
    pub fn network_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::NetworkError {
            action: self.action_name(),
            zone: self.zone.clone(),
            detail: detail.to_string(),
        }
    }

    pub fn timeout(&self, detail: impl ToString) -> ProviderError {
        ProviderError::Timeout {
            action: self.action_name(),
            zone: self.zone.clone(),
            detail: detail.to_string(),
        }
    }

    pub fn http_status(&self, status: u16) -> ProviderError {
        ProviderError::HttpStatus {
            action: self.action_name(),
            zone: self.zone.clone(),
            status,
        }
    }

    pub fn body_read(&self, detail: impl ToString) -> ProviderError {
        ProviderError::BodyRead {
            action: self.action_name(),
            zone: self.zone.clone(),
            detail: detail.to_string(),
        }
    }

    pub fn cancelled(&self) -> ProviderError {
        ProviderError::Cancelled {
            action: self.action_name(),
            zone: self.zone.clone(),
        }
    }

    /// 快捷方法：解析错误
    pub fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            action: self.action_name(),
            zone: self.zone.clone(),
            detail: detail.to_string(),
        }
    }

    pub fn serialization_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::SerializationError {
            action: self.action_name(),
            zone: self.zone.clone(),
            detail: detail.to_string(),
        }
    }

    pub fn provider_status(&self, status: impl Into<String>) -> ProviderError {
        ProviderError::ProviderStatus {
            action: self.action_name(),
            zone: self.zone.clone(),
            status: status.into(),
        }
    }

    pub fn unrecognized_action(&self, tag: impl Into<String>) -> ProviderError {
        ProviderError::UnrecognizedAction {
            action: self.action_name(),
            zone: self.zone.clone(),
            tag: tag.into(),
        }
    }

    /// Fail fast if the caller has already cancelled.
    pub fn ensure_active(&self, cancel: &CancellationToken) -> Result<()> {
        if cancel.is_cancelled() {
            Err(self.cancelled())
        } else {
            Ok(())
        }
    }
}

/// Record-level access to a DNS zone.
///
/// Each method is one logical operation against the remote zone. Results
/// only contain what the provider actually did: records it skipped or did not
/// find are left out rather than reported as errors. A failed operation
/// returns exactly one error and no partial results.
#[async_trait]
pub trait RecordProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// All records currently in the zone, carrying the zone TTL.
    async fn get_records(&self, zone: &str, cancel: &CancellationToken) -> Result<Vec<Record>>;

    /// Add records without touching entries that already exist.
    ///
    /// Returns only the records that were newly created.
    async fn append_records(
        &self,
        zone: &str,
        records: &[Record],
        cancel: &CancellationToken,
    ) -> Result<Vec<Record>>;

    /// Add or overwrite records.
    ///
    /// Returns only the records that changed an existing entry.
    async fn set_records(
        &self,
        zone: &str,
        records: &[Record],
        cancel: &CancellationToken,
    ) -> Result<Vec<Record>>;

    /// Remove records.
    ///
    /// Returns only the records that were actually removed.
    async fn delete_records(
        &self,
        zone: &str,
        records: &[Record],
        cancel: &CancellationToken,
    ) -> Result<Vec<Record>>;
}
