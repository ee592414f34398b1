//! Greedy proxy application.
//!
//! The proxy application has a global configuration for multiple jobs.
//! It's basically a container for other services.
//!
//! Jobs executed always:
//!
//! - Proxy server: rewrites the announce requests and forwards every request
//!   to the trackers.
//!
//! Optional jobs:
//!
//! - Entity cleaner: it removes the torrents the proxy hasn't seen in a while.
//! - Version check: it looks for a newer release once at startup.
use std::sync::Arc;

use greedy_proxy_configuration::Configuration;
use tokio::task::JoinHandle;

use crate::bootstrap::jobs::{entity_cleanup, proxy_server, version_check};
use crate::core::RatioGovernor;
use crate::servers;

/// It starts every enabled job.
///
/// # Panics
///
/// Will panic if the proxy server can't be started.
pub async fn start(config: &Configuration, governor: Arc<RatioGovernor>) -> Vec<JoinHandle<()>> {
    let mut jobs: Vec<JoinHandle<()>> = Vec::new();

    if let Some(job) = version_check::start_job(&config.version_check) {
        jobs.push(job);
    }

    // Start runners to remove idle entities, every interval
    if config.cleanup.is_enabled() {
        jobs.push(entity_cleanup::start_job(&config.cleanup, &governor));
    } else {
        tracing::info!("Note: Not cleaning up idle entities, max entity idle is zero.");
    }

    jobs.push(proxy_server::start_job(&config.proxy, governor, servers::proxy::Version::V1).await);

    jobs
}
