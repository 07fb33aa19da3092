//! Periodic connection pool gauges.

use sqlx::PgPool;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Pool gauges are refreshed this often.
pub const POOL_METRICS_INTERVAL: Duration = Duration::from_secs(10);

/// Records the pool gauges on every tick until the task is aborted.
pub fn spawn_pool_metrics(pool: PgPool, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            persistence::metrics::record_pool_metrics(&pool);
        }
    })
}
