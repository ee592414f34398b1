//! Best effort reverse DNS of the IP announced by the client.
//!
//! It's only used to enrich the logs. Lookups run on the blocking thread pool
//! and out of the request path, so a slow DNS server never delays an
//! announce.
use std::net::IpAddr;
use std::time::Duration;

use greedy_proxy_primitives::info_hash::InfoHash;
use tokio::task::JoinHandle;

use crate::servers::proxy::PROXY_LOG_TARGET;

/// Resolves the hostname of `ip`. It falls back to the IP itself when the
/// lookup fails or takes longer than `timeout`.
pub async fn resolve(ip: IpAddr, timeout: Duration) -> String {
    let lookup = tokio::task::spawn_blocking(move || dns_lookup::lookup_addr(&ip));

    match tokio::time::timeout(timeout, lookup).await {
        Ok(Ok(Ok(hostname))) => hostname,
        Ok(Ok(Err(err))) => {
            tracing::debug!(target: PROXY_LOG_TARGET, %ip, %err, "Reverse DNS lookup failed");
            ip.to_string()
        }
        Ok(Err(err)) => {
            tracing::debug!(target: PROXY_LOG_TARGET, %ip, %err, "Reverse DNS lookup task failed");
            ip.to_string()
        }
        Err(_) => {
            tracing::debug!(target: PROXY_LOG_TARGET, %ip, "Reverse DNS lookup timed out");
            ip.to_string()
        }
    }
}

/// Logs the hostname of the client announcing a torrent in a detached task.
pub fn spawn_log_client_hostname(ip: IpAddr, info_hash: InfoHash, timeout: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let hostname = resolve(ip, timeout).await;

        tracing::info!(target: PROXY_LOG_TARGET, %info_hash, %ip, %hostname, "Announcing client");
    })
}
