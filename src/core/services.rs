//! Builders for the core services.
use std::sync::Arc;

use greedy_proxy_configuration::Configuration;
use greedy_proxy_torrent_repository::Torrents;

use super::jitter::UniformJitter;
use super::{Policy, RatioGovernor};

/// It returns a new governor building its dependencies: an empty torrent
/// repository and a uniform random source.
#[must_use]
pub fn governor_factory(config: &Configuration) -> RatioGovernor {
    RatioGovernor::new(
        Policy::from(&config.core),
        Arc::new(Torrents::default()),
        Box::new(UniformJitter),
    )
}
