use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Passive eviction of torrents the client stopped announcing.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Cleanup {
    /// Seconds without announces after which a torrent is forgotten. `0`
    /// keeps every torrent for the lifetime of the process.
    #[serde(default = "Cleanup::default_max_entity_idle")]
    pub max_entity_idle: u64,

    /// Seconds between two runs of the cleanup job.
    #[serde(default = "Cleanup::default_interval")]
    pub interval: u64,
}

impl Default for Cleanup {
    fn default() -> Self {
        Self {
            max_entity_idle: Self::default_max_entity_idle(),
            interval: Self::default_interval(),
        }
    }
}

impl Cleanup {
    fn default_max_entity_idle() -> u64 {
        0
    }

    fn default_interval() -> u64 {
        600
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.max_entity_idle > 0
    }

    #[must_use]
    pub fn max_entity_idle(&self) -> Duration {
        Duration::from_secs(self.max_entity_idle)
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }
}
