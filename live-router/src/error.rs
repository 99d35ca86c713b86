//! Error taxonomy for channel parsing, pattern handling and rule resolution.

use std::time::Duration;

use crate::TenantId;

/// Channel string failed grammar, length or charset validation.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ChannelError {
    #[error("invalid channel {channel:?}: {reason}")]
    Invalid { channel: String, reason: String },
    #[error("invalid org prefix in channel {channel:?}")]
    InvalidOrgPrefix { channel: String },
}

impl ChannelError {
    pub(crate) fn invalid(channel: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            channel: channel.to_string(),
            reason: reason.into(),
        }
    }
}

/// Wildcard pattern is malformed.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("invalid pattern {pattern:?}: {reason}")]
pub struct PatternError {
    pub pattern: String,
    pub reason: &'static str,
}

/// Failure reported by a [`RuleStorage`](crate::RuleStorage) implementation.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("rule storage unavailable: {0}")]
    Unavailable(String),
    #[error("rule storage returned malformed data: {0}")]
    Malformed(String),
}

/// Errors surfaced by the tenant registry.
///
/// A `RoutingError` means routing could not be determined. It is distinct from a
/// successful lookup that found no rule.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum RoutingError {
    #[error(transparent)]
    InvalidPattern(#[from] PatternError),
    #[error("loading rules for tenant {tenant_id} failed: {source}")]
    Storage {
        tenant_id: TenantId,
        #[source]
        source: StorageError,
    },
    #[error("loading rules for tenant {tenant_id} timed out after {timeout:?}")]
    StorageTimeout {
        tenant_id: TenantId,
        timeout: Duration,
    },
}
