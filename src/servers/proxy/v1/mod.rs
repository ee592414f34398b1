//! Version `1` of the proxy.
//!
//! The proxy is meant to be set as the HTTP proxy of a torrent client. It
//! receives every HTTP request the client sends to its trackers:
//!
//! ```text
//! GET http://tracker.example.com:6969/announce?info_hash=...&uploaded=0&downloaded=104857600&left=0 HTTP/1.1
//! ```
//!
//! and forwards it to the tracker after replacing the `uploaded` value of the
//! announce requests. Any other request is forwarded untouched.
//!
//! Refer to [`requests::announce`] for the params the proxy uses.
use std::sync::Arc;
use std::time::Duration;

use greedy_proxy_configuration::Proxy;

use self::services::forwarder::Forwarder;
use crate::core::RatioGovernor;

pub mod handlers;
pub mod query;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

/// Shared state of the request handlers.
pub struct Context {
    pub governor: Arc<RatioGovernor>,
    pub forwarder: Forwarder,
    /// Timeout for the reverse DNS lookups. `None` disables them.
    pub hostname_lookup_timeout: Option<Duration>,
}

impl Context {
    #[must_use]
    pub fn new(config: &Proxy, governor: Arc<RatioGovernor>) -> Self {
        Self {
            governor,
            forwarder: Forwarder::new(config.upstream_timeout()),
            hostname_lookup_timeout: config
                .resolve_client_hostnames
                .then(|| config.hostname_lookup_timeout()),
        }
    }
}
