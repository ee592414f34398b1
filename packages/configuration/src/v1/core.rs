use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The reporting policy: how the reported `uploaded` value is computed from
/// the real `downloaded` value.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Core {
    /// Multiplier applied while the download is not finished.
    #[serde(default = "Core::default_max_upload_multiplier")]
    pub max_upload_multiplier: f64,

    /// Multiplier applied once the client reports nothing `left`. It's
    /// expected to be smaller than `max_upload_multiplier`.
    #[serde(default = "Core::default_seeding_multiplier")]
    pub seeding_multiplier: f64,

    /// Fraction `r` of random variation applied to the multiplier: the
    /// effective multiplier is `base * (1 + U(-r, r))`. Use `0` to disable.
    #[serde(default = "Core::default_randomization_factor")]
    pub randomization_factor: f64,

    /// Maximum simulated upload rate in **bits** per second. The reported
    /// value never grows faster than this between two announces of the same
    /// torrent. When the option is missing the rate is unlimited.
    #[serde(default = "Core::default_max_upload_rate")]
    pub max_upload_rate: Option<u64>,

    /// When the global ratio (reported upload over real download for all
    /// torrents) goes over this limit the proxy enters cooldown.
    #[serde(default = "Core::default_ratio_limit")]
    pub ratio_limit: f64,

    /// Seconds the cooldown lasts. Real values are reported meanwhile.
    #[serde(default = "Core::default_cooldown_duration")]
    pub cooldown_duration: u64,

    /// Seconds over which the multipliers grow linearly from `1.0` to their
    /// configured values, starting when the proxy starts. `0` disables the
    /// ramp.
    #[serde(default = "Core::default_ramp_up")]
    pub ramp_up: u64,
}

impl Default for Core {
    fn default() -> Self {
        Self {
            max_upload_multiplier: Self::default_max_upload_multiplier(),
            seeding_multiplier: Self::default_seeding_multiplier(),
            randomization_factor: Self::default_randomization_factor(),
            max_upload_rate: Self::default_max_upload_rate(),
            ratio_limit: Self::default_ratio_limit(),
            cooldown_duration: Self::default_cooldown_duration(),
            ramp_up: Self::default_ramp_up(),
        }
    }
}

impl Core {
    fn default_max_upload_multiplier() -> f64 {
        1.6
    }

    fn default_seeding_multiplier() -> f64 {
        1.2
    }

    fn default_randomization_factor() -> f64 {
        0.1
    }

    #[allow(clippy::unnecessary_wraps)]
    fn default_max_upload_rate() -> Option<u64> {
        Some(10_000_000)
    }

    fn default_ratio_limit() -> f64 {
        3.0
    }

    fn default_cooldown_duration() -> u64 {
        3600
    }

    fn default_ramp_up() -> u64 {
        0
    }

    /// The maximum upload rate converted from bits to bytes per second.
    #[must_use]
    pub fn max_upload_rate_bytes_per_second(&self) -> Option<u64> {
        self.max_upload_rate.map(|bits| bits / 8)
    }

    #[must_use]
    pub fn cooldown_duration(&self) -> Duration {
        Duration::from_secs(self.cooldown_duration)
    }

    #[must_use]
    pub fn ramp_up(&self) -> Duration {
        Duration::from_secs(self.ramp_up)
    }
}
