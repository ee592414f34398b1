//! The reporting decision engine.
//!
//! For every announce it intercepts, the proxy asks the [`RatioGovernor`]
//! which `uploaded` value it should send to the tracker. The governor:
//!
//! 1. Resolves the [`ReportMode`]: `Cooldown` while the safety valve is open,
//!    `Seeding` when nothing is `left`, `Downloading` otherwise.
//! 2. Picks the multiplier for the mode and applies the random variation.
//! 3. Multiplies the real `downloaded` bytes.
//! 4. Bounds the growth with the [`RateLimiter`] so the reported value never
//!    grows faster than the configured upload speed and never decreases.
//! 5. Stores the new state of the torrent.
//!
//! # Cooldown
//!
//! The global ratio is the sum of the reported uploads over the sum of the
//! real downloads of all torrents. When it goes over `ratio_limit` the
//! governor enters cooldown: the multiplier is pinned to `1.0` for
//! `cooldown_duration`. The ratio is evaluated with the totals as they were
//! before the announce being processed.
//!
//! # Ramp-up
//!
//! Optionally the multipliers can grow linearly from `1.0` to their configured
//! values during `ramp_up` after the proxy starts.
//!
//! # Example
//!
//! With no randomization, no rate limit, a `seeding_multiplier` of `1.2` and
//! a `max_upload_multiplier` of `1.6`, a torrent announcing 100 MiB
//! downloaded is reported with an upload of `125829120` bytes when seeding
//! and `167772160` bytes while downloading.
pub mod cooldown;
pub mod jitter;
pub mod rate_limiter;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use greedy_proxy_clock::clock::Time;
use greedy_proxy_clock::conv::format_timestamp;
use greedy_proxy_configuration::Core;
use greedy_proxy_primitives::entity_metrics::EntityMetrics;
use greedy_proxy_primitives::info_hash::InfoHash;
use greedy_proxy_primitives::report_mode::ReportMode;
use greedy_proxy_primitives::{as_mib, DurationSinceUnixEpoch, NumberOfBytes};
use greedy_proxy_torrent_repository::repository::Repository;
use greedy_proxy_torrent_repository::{EntityState, Torrents};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use self::cooldown::Cooldown;
use self::jitter::Jitter;
use self::rate_limiter::RateLimiter;
use crate::CurrentClock;

/// The reporting policy. See [`Core`] for the meaning of each option.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    pub max_upload_multiplier: f64,
    pub seeding_multiplier: f64,
    pub randomization_factor: f64,
    pub rate_limiter: RateLimiter,
    pub ratio_limit: f64,
    pub cooldown_duration: Duration,
    pub ramp_up: Duration,
}

impl From<&Core> for Policy {
    fn from(config: &Core) -> Self {
        Self {
            max_upload_multiplier: config.max_upload_multiplier,
            seeding_multiplier: config.seeding_multiplier,
            randomization_factor: config.randomization_factor,
            rate_limiter: RateLimiter::new(config.max_upload_rate_bytes_per_second()),
            ratio_limit: config.ratio_limit,
            cooldown_duration: config.cooldown_duration(),
            ramp_up: config.ramp_up(),
        }
    }
}

/// What the proxy has to report for one announce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    /// The `uploaded` value to send to the tracker.
    pub uploaded: NumberOfBytes,
    pub mode: ReportMode,
    /// The effective multiplier, after ramp-up and randomization.
    pub multiplier: f64,
}

/// The counters announced by the client for one torrent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnouncedCounters {
    pub downloaded: NumberOfBytes,
    pub uploaded: NumberOfBytes,
    pub left: NumberOfBytes,
}

/// Owns the per-torrent state and the cooldown state machine.
///
/// It's shared by all the request handlers. The internal mutex serializes the
/// decisions so the global ratio, the cooldown transitions and the update of
/// the torrent state are consistent with each other.
pub struct RatioGovernor {
    policy: Policy,
    torrents: Arc<Torrents>,
    cooldown: Mutex<Cooldown>,
    jitter: Box<dyn Jitter>,
    started_at: DurationSinceUnixEpoch,
}

impl RatioGovernor {
    #[must_use]
    pub fn new(policy: Policy, torrents: Arc<Torrents>, jitter: Box<dyn Jitter>) -> Self {
        if policy.seeding_multiplier > policy.max_upload_multiplier {
            warn!(
                seeding_multiplier = policy.seeding_multiplier,
                max_upload_multiplier = policy.max_upload_multiplier,
                "The seeding multiplier is greater than the maximum upload multiplier"
            );
        }

        Self {
            policy,
            torrents,
            cooldown: Mutex::new(Cooldown::default()),
            jitter,
            started_at: CurrentClock::now(),
        }
    }

    /// The policy the decisions follow.
    #[must_use]
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Decides the `uploaded` value to report for an announce and records the
    /// new state of the torrent.
    pub fn decide(&self, info_hash: &InfoHash, counters: &AnnouncedCounters) -> Decision {
        let mut cooldown = self.cooldown.lock();

        let now = CurrentClock::now();

        if cooldown.release_if_expired(now) {
            info!("Cooldown period ended, reporting inflated values again");
        }

        if !cooldown.is_active() {
            let ratio = self.torrents.get_metrics().ratio();

            if ratio > self.policy.ratio_limit {
                cooldown.activate(now, self.policy.cooldown_duration);

                warn!(
                    ratio,
                    ratio_limit = self.policy.ratio_limit,
                    until = %cooldown.ends_at().map(format_timestamp).unwrap_or_default(),
                    "Global ratio over the limit, entering cooldown"
                );
            }
        }

        let mode = if cooldown.is_active() {
            ReportMode::Cooldown
        } else {
            ReportMode::for_remaining(counters.left)
        };

        let multiplier = self.effective_multiplier(mode, now);

        let candidate = apply_multiplier(counters.downloaded, multiplier);

        let previous = self.torrents.get(info_hash);

        let elapsed = previous.map_or(Duration::ZERO, |state| now.saturating_sub(state.last_update));

        let uploaded = self
            .policy
            .rate_limiter
            .cap(previous.map(|state| state.uploaded_reported), elapsed, candidate);

        self.torrents.upsert(
            info_hash,
            EntityState {
                downloaded_real: counters.downloaded,
                uploaded_real: counters.uploaded,
                uploaded_reported: uploaded,
                last_update: now,
            },
        );

        drop(cooldown);

        if uploaded < candidate {
            debug!(
                %info_hash,
                candidate,
                uploaded,
                max_rate = ?self.policy.rate_limiter.max_rate(),
                "Reported upload capped by the maximum upload rate"
            );
        }

        Decision {
            uploaded,
            mode,
            multiplier,
        }
    }

    /// Sums the counters of every tracked torrent.
    #[must_use]
    pub fn get_metrics(&self) -> EntityMetrics {
        self.torrents.get_metrics()
    }

    /// The state kept for a torrent.
    #[must_use]
    pub fn get_torrent(&self, info_hash: &InfoHash) -> Option<EntityState> {
        self.torrents.get(info_hash)
    }

    #[must_use]
    pub fn is_in_cooldown(&self) -> bool {
        self.cooldown.lock().is_active()
    }

    /// Forgets the torrents not announced during the last `max_idle`. It
    /// returns the number of removed torrents.
    pub fn cleanup_entities(&self, max_idle: Duration) -> usize {
        let _guard = self.cooldown.lock();

        let Some(cutoff) = CurrentClock::now_sub(&max_idle) else {
            return 0;
        };

        let removed = self.torrents.remove_inactive(cutoff);

        let metrics = self.torrents.get_metrics();

        info!(
            removed,
            remaining = metrics.entities,
            downloaded_mb = as_mib(metrics.downloaded),
            reported_mb = as_mib(metrics.uploaded_reported),
            "Removed idle torrents"
        );

        removed
    }

    fn effective_multiplier(&self, mode: ReportMode, now: DurationSinceUnixEpoch) -> f64 {
        let base = match mode {
            ReportMode::Cooldown => return 1.0,
            ReportMode::Seeding => self.policy.seeding_multiplier,
            ReportMode::Downloading => self.policy.max_upload_multiplier,
        };

        let base = self.ramped(base, now);

        let variation = self.jitter.sample(self.policy.randomization_factor);

        (base * (1.0 + variation)).max(0.0)
    }

    fn ramped(&self, base: f64, now: DurationSinceUnixEpoch) -> f64 {
        if self.policy.ramp_up.is_zero() {
            return base;
        }

        let progress = (now.saturating_sub(self.started_at).as_secs_f64() / self.policy.ramp_up.as_secs_f64()).min(1.0);

        1.0 + (base - 1.0) * progress
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn apply_multiplier(downloaded: NumberOfBytes, multiplier: f64) -> NumberOfBytes {
    // Float to int casts saturate.
    (downloaded as f64 * multiplier).floor() as NumberOfBytes
}
