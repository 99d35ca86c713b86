//! Per-tenant rule registry with fill-on-miss and explicit upserts.

use arc_swap::ArcSwap;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::config::RegistryConfig;
use crate::error::RoutingError;
use crate::observability::{events, fields};
use crate::refresh_health::RefreshHealth;
use crate::routing::pattern_index::{validate_pattern, PatternIndex};
use crate::storage::{RuleEntry, RuleStorage};
use crate::TenantId;

const COMPONENT: &str = fields::COMPONENT_TENANT_REGISTRY;

/// A tenant's current index. Replacement is a pointer swap, readers keep whatever
/// snapshot they loaded.
type TenantSlot<V> = Arc<ArcSwap<PatternIndex<V>>>;

/// How a freshly loaded index lands in the tenant map.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Install {
    /// Replace whatever is cached, creating the tenant if needed.
    Replace,
    /// Create the tenant only if nothing, such as a `save`, created it meanwhile.
    IfAbsent,
    /// Replace the tenant only if it is still cached.
    IfPresent,
}

/// Result of one pass over every known tenant.
#[derive(Debug, Default)]
pub struct RefreshReport {
    pub refreshed: Vec<TenantId>,
    pub failed: Vec<(TenantId, RoutingError)>,
}

impl RefreshReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Resolves `(tenant, channel path)` to the payload of the most specific matching rule.
///
/// The tenant map lock is held only to find or create a tenant slot, never across a
/// storage call. Each tenant slot swaps its [`PatternIndex`] atomically, so a fill for
/// one tenant does not stall lookups for another.
pub struct TenantRegistry<V> {
    storage: Arc<dyn RuleStorage<V>>,
    config: RegistryConfig,
    tenants: RwLock<HashMap<TenantId, TenantSlot<V>>>,
    fill_gates: Mutex<HashMap<TenantId, Arc<Mutex<()>>>>,
    refresh_health: Mutex<RefreshHealth>,
}

impl<V> TenantRegistry<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(storage: Arc<dyn RuleStorage<V>>, config: RegistryConfig) -> Self {
        Self {
            storage,
            config,
            tenants: RwLock::new(HashMap::new()),
            fill_gates: Mutex::new(HashMap::new()),
            refresh_health: Mutex::new(RefreshHealth::default()),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Looks up the rule for `channel_path`, loading the tenant from storage on first use.
    ///
    /// `Ok(None)` means no rule applies. An `Err` means routing could not be decided.
    pub async fn get(
        &self,
        tenant_id: TenantId,
        channel_path: &str,
    ) -> Result<Option<V>, RoutingError> {
        self.get_with_timeout(tenant_id, channel_path, self.config.storage_timeout())
            .await
    }

    /// Same as [`TenantRegistry::get`] with a caller-supplied bound on the miss-path load.
    pub async fn get_with_timeout(
        &self,
        tenant_id: TenantId,
        channel_path: &str,
        timeout: Duration,
    ) -> Result<Option<V>, RoutingError> {
        if let Some(index) = self.load_index(tenant_id).await {
            return Ok(index.lookup(channel_path).cloned());
        }

        debug!(
            event = events::REGISTRY_MISS,
            component = COMPONENT,
            tenant_id,
            channel_path,
            "tenant not cached, loading rules"
        );
        self.fill_on_miss(tenant_id, timeout).await?;

        Ok(self
            .load_index(tenant_id)
            .await
            .and_then(|index| index.lookup(channel_path).cloned()))
    }

    /// Upserts one rule locally without consulting storage.
    pub async fn save(
        &self,
        tenant_id: TenantId,
        pattern: &str,
        payload: V,
    ) -> Result<(), RoutingError> {
        validate_pattern(pattern)?;

        let slot = self.slot_or_insert(tenant_id).await;
        slot.rcu(|current| {
            let mut next = PatternIndex::clone(&**current);
            // Validated above.
            let _ = next.insert(pattern, payload.clone());
            next
        });

        debug!(
            event = events::REGISTRY_SAVE,
            component = COMPONENT,
            tenant_id,
            pattern,
            "saved rule"
        );
        Ok(())
    }

    /// Reloads a tenant from storage and replaces its index wholesale.
    ///
    /// Returns the number of rules installed.
    pub async fn fill(&self, tenant_id: TenantId) -> Result<usize, RoutingError> {
        self.fill_with_timeout(tenant_id, self.config.storage_timeout(), Install::Replace)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Sorted snapshot of the tenants currently cached.
    pub async fn tenants(&self) -> Vec<TenantId> {
        let mut tenant_ids: Vec<TenantId> = self.tenants.read().await.keys().copied().collect();
        tenant_ids.sort_unstable();
        tenant_ids
    }

    /// Drops a tenant's cached index; the next `get` loads it again.
    pub async fn evict(&self, tenant_id: TenantId) -> bool {
        self.tenants.write().await.remove(&tenant_id).is_some()
    }

    /// Refills every known tenant once. One tenant failing does not stop the others,
    /// and a failed tenant keeps its previous index. A tenant evicted while the cycle
    /// runs stays evicted.
    pub async fn refresh_all(&self) -> RefreshReport {
        let tenant_ids = self.tenants().await;
        info!(
            event = events::REFRESH_CYCLE_START,
            component = fields::COMPONENT_REFRESHER,
            tenant_count = tenant_ids.len(),
            "refreshing tenant rules"
        );

        let mut report = RefreshReport::default();
        for tenant_id in tenant_ids {
            let refill = self
                .fill_with_timeout(tenant_id, self.config.storage_timeout(), Install::IfPresent)
                .await;
            match refill {
                Ok(Some(_)) => report.refreshed.push(tenant_id),
                Ok(None) => {}
                Err(err) => {
                    warn!(
                        event = events::REFRESH_TENANT_FAILED,
                        component = fields::COMPONENT_REFRESHER,
                        tenant_id,
                        reason = fields::routing_error_reason(&err),
                        err = %err,
                        "tenant refresh failed, keeping previous rules"
                    );
                    report.failed.push((tenant_id, err));
                }
            }
        }

        self.refresh_health
            .lock()
            .await
            .record_attempt(SystemTime::now(), report.is_success());

        info!(
            event = events::REFRESH_CYCLE_DONE,
            component = fields::COMPONENT_REFRESHER,
            refreshed = report.refreshed.len(),
            failed_count = report.failed.len(),
            "refresh cycle finished"
        );
        report
    }

    pub async fn refresh_health(&self) -> RefreshHealth {
        self.refresh_health.lock().await.clone()
    }

    async fn load_index(&self, tenant_id: TenantId) -> Option<Arc<PatternIndex<V>>> {
        let tenants = self.tenants.read().await;
        tenants.get(&tenant_id).map(|slot| slot.load_full())
    }

    async fn slot_or_insert(&self, tenant_id: TenantId) -> TenantSlot<V> {
        if let Some(slot) = self.tenants.read().await.get(&tenant_id) {
            return slot.clone();
        }
        let mut tenants = self.tenants.write().await;
        tenants
            .entry(tenant_id)
            .or_insert_with(|| Arc::new(ArcSwap::from_pointee(PatternIndex::new())))
            .clone()
    }

    /// Returns whether `index` was installed.
    async fn install(&self, tenant_id: TenantId, index: PatternIndex<V>, mode: Install) -> bool {
        let mut tenants = self.tenants.write().await;
        if let Some(slot) = tenants.get(&tenant_id) {
            if mode == Install::IfAbsent {
                return false;
            }
            slot.store(Arc::new(index));
            return true;
        }
        if mode == Install::IfPresent {
            return false;
        }
        tenants.insert(tenant_id, Arc::new(ArcSwap::from_pointee(index)));
        true
    }

    /// Loads a missing tenant once, even when several callers miss at the same time.
    async fn fill_on_miss(&self, tenant_id: TenantId, timeout: Duration) -> Result<(), RoutingError> {
        let gate = self
            .fill_gates
            .lock()
            .await
            .entry(tenant_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let result = {
            let _guard = gate.lock().await;
            if self.tenants.read().await.contains_key(&tenant_id) {
                debug!(
                    event = events::REGISTRY_FILL_COALESCED,
                    component = COMPONENT,
                    tenant_id,
                    "tenant loaded by a concurrent caller"
                );
                Ok(())
            } else {
                self.fill_with_timeout(tenant_id, timeout, Install::IfAbsent)
                    .await
                    .map(|_| ())
            }
        };

        let mut gates = self.fill_gates.lock().await;
        if gates
            .get(&tenant_id)
            .is_some_and(|current| Arc::ptr_eq(current, &gate))
        {
            gates.remove(&tenant_id);
        }
        result
    }

    /// Loads a tenant from storage. `Ok(None)` means the result was discarded because
    /// the tenant map no longer matched `mode`.
    async fn fill_with_timeout(
        &self,
        tenant_id: TenantId,
        timeout: Duration,
        mode: Install,
    ) -> Result<Option<usize>, RoutingError> {
        debug!(
            event = events::REGISTRY_FILL_START,
            component = COMPONENT,
            tenant_id,
            "loading tenant rules"
        );

        let rules = match tokio::time::timeout(timeout, self.storage.list_rules(tenant_id)).await {
            Ok(Ok(rules)) => rules,
            Ok(Err(source)) => {
                warn!(
                    event = events::REGISTRY_FILL_FAILED,
                    component = COMPONENT,
                    tenant_id,
                    err = %source,
                    "rule storage returned an error"
                );
                return Err(RoutingError::Storage { tenant_id, source });
            }
            Err(_) => {
                warn!(
                    event = events::REGISTRY_FILL_TIMEOUT,
                    component = COMPONENT,
                    tenant_id,
                    timeout_ms = fields::duration_ms(timeout),
                    "rule storage did not answer in time"
                );
                return Err(RoutingError::StorageTimeout { tenant_id, timeout });
            }
        };

        let index = build_index(tenant_id, rules);
        let rule_count = index.len();
        if !self.install(tenant_id, index, mode).await {
            debug!(
                event = events::REGISTRY_FILL_DISCARDED,
                component = COMPONENT,
                tenant_id,
                rule_count,
                "tenant changed while loading, keeping cached rules"
            );
            return Ok(None);
        }

        debug!(
            event = events::REGISTRY_FILL_OK,
            component = COMPONENT,
            tenant_id,
            rule_count,
            "installed tenant rules"
        );
        Ok(Some(rule_count))
    }
}

fn build_index<V>(tenant_id: TenantId, rules: Vec<RuleEntry<V>>) -> PatternIndex<V> {
    let mut index = PatternIndex::new();
    for rule in rules {
        if rule.tenant_id != tenant_id {
            warn!(
                event = events::REGISTRY_PATTERN_SKIPPED,
                component = COMPONENT,
                tenant_id,
                rule_tenant_id = rule.tenant_id,
                pattern = rule.pattern.as_str(),
                reason = fields::REASON_FOREIGN_TENANT,
                "skipping rule listed under another tenant"
            );
            continue;
        }
        if let Err(err) = index.insert(&rule.pattern, rule.payload) {
            warn!(
                event = events::REGISTRY_PATTERN_SKIPPED,
                component = COMPONENT,
                tenant_id,
                pattern = rule.pattern.as_str(),
                reason = fields::REASON_INVALID_PATTERN,
                err = %err,
                "skipping malformed rule pattern"
            );
        }
    }
    index
}
