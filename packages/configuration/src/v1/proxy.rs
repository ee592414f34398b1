use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::DEFAULT_UPSTREAM_TIMEOUT;

/// The listening side of the proxy and the way it talks to the real trackers.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Proxy {
    /// The address the proxy will bind to.
    /// The format is `ip:port`, for example `0.0.0.0:3456`. If you want to
    /// listen to all interfaces, use `0.0.0.0`. If you want the operating
    /// system to choose a random port, use port `0`.
    ///
    /// The torrent client must be configured to use this address as its HTTP
    /// proxy.
    #[serde(default = "Proxy::default_bind_address")]
    pub bind_address: SocketAddr,

    /// Seconds to wait for the real tracker before giving up with a
    /// `504 Gateway Timeout`.
    #[serde(default = "Proxy::default_upstream_timeout")]
    pub upstream_timeout: u64,

    /// Whether to look up the hostname of the `ip` announced by the client
    /// to enrich the log lines.
    #[serde(default = "Proxy::default_resolve_client_hostnames")]
    pub resolve_client_hostnames: bool,

    /// Seconds to wait for a reverse DNS lookup.
    #[serde(default = "Proxy::default_hostname_lookup_timeout")]
    pub hostname_lookup_timeout: u64,
}

impl Default for Proxy {
    fn default() -> Self {
        Self {
            bind_address: Self::default_bind_address(),
            upstream_timeout: Self::default_upstream_timeout(),
            resolve_client_hostnames: Self::default_resolve_client_hostnames(),
            hostname_lookup_timeout: Self::default_hostname_lookup_timeout(),
        }
    }
}

impl Proxy {
    fn default_bind_address() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)), 3456)
    }

    fn default_upstream_timeout() -> u64 {
        DEFAULT_UPSTREAM_TIMEOUT.as_secs()
    }

    fn default_resolve_client_hostnames() -> bool {
        true
    }

    fn default_hostname_lookup_timeout() -> u64 {
        2
    }

    #[must_use]
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }

    #[must_use]
    pub fn hostname_lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.hostname_lookup_timeout)
    }
}
