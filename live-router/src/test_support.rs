//! In-memory storage doubles shared by unit tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::error::StorageError;
use crate::storage::{RuleEntry, RuleStorage};
use crate::TenantId;

/// Storage backed by a mutable map that counts `list_rules` calls per tenant.
#[derive(Default)]
pub(crate) struct CountingStorage {
    rules: Mutex<HashMap<TenantId, Result<Vec<RuleEntry<String>>, StorageError>>>,
    calls: Mutex<HashMap<TenantId, usize>>,
    total_calls: AtomicUsize,
}

impl CountingStorage {
    pub(crate) fn set_rules(&self, tenant_id: TenantId, rules: &[(&str, &str)]) {
        let entries = rules
            .iter()
            .map(|(pattern, payload)| RuleEntry::new(tenant_id, *pattern, payload.to_string()))
            .collect();
        self.rules.lock().unwrap().insert(tenant_id, Ok(entries));
    }

    pub(crate) fn set_entries(&self, tenant_id: TenantId, entries: Vec<RuleEntry<String>>) {
        self.rules.lock().unwrap().insert(tenant_id, Ok(entries));
    }

    pub(crate) fn fail(&self, tenant_id: TenantId, reason: &str) {
        self.rules
            .lock()
            .unwrap()
            .insert(tenant_id, Err(StorageError::Unavailable(reason.to_string())));
    }

    pub(crate) fn calls_for(&self, tenant_id: TenantId) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(&tenant_id)
            .copied()
            .unwrap_or_default()
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.total_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RuleStorage<String> for CountingStorage {
    async fn list_rules(&self, tenant_id: TenantId) -> Result<Vec<RuleEntry<String>>, StorageError> {
        *self.calls.lock().unwrap().entry(tenant_id).or_default() += 1;
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        self.rules
            .lock()
            .unwrap()
            .get(&tenant_id)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Storage that answers after a fixed delay, or never for tenants listed as stuck.
pub(crate) struct SlowStorage {
    pub(crate) delay: Duration,
    pub(crate) stuck_tenants: Vec<TenantId>,
    pub(crate) inner: CountingStorage,
}

#[async_trait]
impl RuleStorage<String> for SlowStorage {
    async fn list_rules(&self, tenant_id: TenantId) -> Result<Vec<RuleEntry<String>>, StorageError> {
        if self.stuck_tenants.contains(&tenant_id) {
            std::future::pending::<()>().await;
        }
        tokio::time::sleep(self.delay).await;
        self.inner.list_rules(tenant_id).await
    }
}
