//! Configurations used by the tests.
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use greedy_proxy_configuration::{Configuration, Threshold};

/// This configuration is used for testing. The proxy binds to a port chosen
/// by the OS so several proxies can run at the same time.
#[must_use]
pub fn ephemeral() -> Configuration {
    let mut config = Configuration::default();

    config.logging.threshold = Threshold::Off; // Change to `debug` for tests debugging

    // Ephemeral socket address for the proxy
    let port = 0u16;
    config.proxy.bind_address = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port);

    // No reverse DNS lookups in tests
    config.proxy.resolve_client_hostnames = false;

    config.version_check.enabled = false;

    config
}

/// Ephemeral configuration where the reported value only depends on the
/// announced values: no randomization and no rate limit.
#[must_use]
pub fn ephemeral_deterministic() -> Configuration {
    let mut config = ephemeral();

    config.core.randomization_factor = 0.0;
    config.core.max_upload_rate = None;

    config
}

/// Deterministic configuration with a custom global ratio limit and cooldown
/// duration in seconds.
#[must_use]
pub fn ephemeral_with_cooldown(ratio_limit: f64, cooldown_duration: u64) -> Configuration {
    let mut config = ephemeral_deterministic();

    config.core.ratio_limit = ratio_limit;
    config.core.cooldown_duration = cooldown_duration;

    config
}

/// Deterministic configuration with a custom timeout in seconds for the
/// requests to the real tracker.
#[must_use]
pub fn ephemeral_with_upstream_timeout(upstream_timeout: u64) -> Configuration {
    let mut config = ephemeral_deterministic();

    config.proxy.upstream_timeout = upstream_timeout;

    config
}
