//! Job that runs a task on intervals to clean up idle torrent entities.
//!
//! An entity is idle when the proxy hasn't seen an announce for it in more
//! than `max_entity_idle` seconds. Removing it frees memory on long running
//! instances that see many short lived torrents. If a removed torrent is
//! announced again, it's tracked as a new one: the rate limiter has no
//! previous value to cap it.
//!
//! Refer to [`greedy-proxy-configuration documentation`](https://docs.rs/greedy-proxy-configuration) for more info about those options.
use std::sync::Arc;

use chrono::Utc;
use greedy_proxy_configuration::Cleanup;
use tokio::task::JoinHandle;

use crate::core::RatioGovernor;

/// It starts a job for cleaning up the idle entities of the governor.
///
/// The cleaning task is executed every `cleanup.interval` seconds.
#[must_use]
pub fn start_job(config: &Cleanup, governor: &Arc<RatioGovernor>) -> JoinHandle<()> {
    let weak_governor = std::sync::Arc::downgrade(governor);
    let interval = config.interval();
    let max_idle = config.max_entity_idle();

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(interval);
        interval.tick().await;

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Stopping entity cleanup job..");
                    break;
                }
                _ = interval.tick() => {
                    if let Some(governor) = weak_governor.upgrade() {
                        let start_time = Utc::now().time();
                        tracing::info!("Cleaning up idle entities..");
                        let removed = governor.cleanup_entities(max_idle);
                        tracing::info!("Cleaned up {removed} idle entities in: {}ms", (Utc::now().time() - start_time).num_milliseconds());
                    } else {
                        break;
                    }
                }
            }
        }
    })
}
