//! Contract towards the authoritative rule store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::TenantId;

/// One tenant-scoped rule. `(tenant_id, pattern)` is the natural key.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RuleEntry<V> {
    pub tenant_id: TenantId,
    pub pattern: String,
    pub payload: V,
}

impl<V> RuleEntry<V> {
    pub fn new(tenant_id: TenantId, pattern: impl Into<String>, payload: V) -> Self {
        Self {
            tenant_id,
            pattern: pattern.into(),
            payload,
        }
    }
}

/// Source of truth for channel rules.
///
/// `list_rules` must return the complete rule set of a tenant. The registry replaces
/// its cached index with whatever comes back, so a partial answer reads as deletions.
#[async_trait]
pub trait RuleStorage<V>: Send + Sync {
    async fn list_rules(&self, tenant_id: TenantId) -> Result<Vec<RuleEntry<V>>, StorageError>;
}
