//! Proxy server job starter.
//!
//! The function [`proxy_server::start_job`](crate::bootstrap::jobs::proxy_server::start_job) starts the proxy server.
//!
//! The server itself runs on a task spawned by its [`Launcher`]. The job
//! only waits for that task to finish, keeping the halt channel open
//! meanwhile so the server stops only on ctrl-c or `SIGTERM`.
use std::sync::Arc;

use greedy_proxy_configuration::Proxy;
use tokio::task::JoinHandle;

use crate::core::RatioGovernor;
use crate::servers::proxy::server::{Launcher, ProxyServer};
use crate::servers::proxy::Version;

/// It starts a new proxy server with the provided configuration and version.
///
/// # Panics
///
/// It would panic if the server can't be started, for example, when the
/// bind address is already in use.
pub async fn start_job(config: &Proxy, governor: Arc<RatioGovernor>, version: Version) -> JoinHandle<()> {
    match version {
        Version::V1 => start_v1(config, governor).await,
    }
}

async fn start_v1(config: &Proxy, governor: Arc<RatioGovernor>) -> JoinHandle<()> {
    let server = match ProxyServer::new(Launcher::new(config.bind_address)).start(governor, config).await {
        Ok(server) => server,
        Err(err) => panic!("it should be able to start the proxy server: {err}"),
    };

    tokio::spawn(async move {
        assert!(
            !server.state.halt_task.is_closed(),
            "Halt channel for the proxy server should be open"
        );

        if let Err(err) = server.state.task.await {
            tracing::error!("Unable to join the proxy server task: {err}");
        }
    })
}
