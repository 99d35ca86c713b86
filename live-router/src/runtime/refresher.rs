//! Periodic background refresh of every cached tenant.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::observability::{events, fields};
use crate::routing::tenant_registry::TenantRegistry;

const COMPONENT: &str = fields::COMPONENT_REFRESHER;

/// Handle to a running refresh loop.
pub struct RefresherHandle {
    cancel: CancellationToken,
    join: JoinHandle<()>,
}

impl RefresherHandle {
    /// Asks the loop to stop. An in-flight cycle is abandoned; tenants already
    /// refreshed keep their new index.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Cancels the loop and waits for it to exit.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        self.cancel.cancel();
        self.join.await
    }
}

/// Spawns the refresh loop on the current tokio runtime.
///
/// The first cycle runs one full period after spawning. The loop exits when
/// `cancel` (or the returned handle) is cancelled.
pub fn spawn_refresher<V>(
    registry: Arc<TenantRegistry<V>>,
    cancel: CancellationToken,
) -> RefresherHandle
where
    V: Clone + Send + Sync + 'static,
{
    let period = registry.config().refresh_interval();
    let join = tokio::spawn(run_refresh_loop(registry, period, cancel.clone()));
    RefresherHandle { cancel, join }
}

async fn run_refresh_loop<V>(
    registry: Arc<TenantRegistry<V>>,
    period: Duration,
    cancel: CancellationToken,
) where
    V: Clone + Send + Sync + 'static,
{
    info!(
        event = events::REFRESHER_START,
        component = COMPONENT,
        refresh_interval_ms = fields::duration_ms(period),
        "rule refresher started"
    );

    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = registry.refresh_all() => {}
        }
    }

    info!(
        event = events::REFRESHER_STOP,
        component = COMPONENT,
        reason = fields::REASON_CANCELLED,
        "rule refresher stopped"
    );
}
