//! The safety valve of the proxy.
//!
//! When the global ratio goes over the configured limit the proxy reports
//! real values for a while. This module only keeps the state of that period,
//! the decision to enter it is taken by the [`RatioGovernor`](crate::core::RatioGovernor).
use std::time::Duration;

use greedy_proxy_primitives::DurationSinceUnixEpoch;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    ends_at: Option<DurationSinceUnixEpoch>,
}

impl Cooldown {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.ends_at.is_some()
    }

    /// When the current cooldown ends, if there is one.
    #[must_use]
    pub fn ends_at(&self) -> Option<DurationSinceUnixEpoch> {
        self.ends_at
    }

    /// Starts a cooldown lasting `duration` from `now`.
    pub fn activate(&mut self, now: DurationSinceUnixEpoch, duration: Duration) {
        self.ends_at = Some(now.saturating_add(duration));
    }

    /// Ends the cooldown once `now` is past its end. It returns `true` only
    /// when the cooldown has just been released.
    pub fn release_if_expired(&mut self, now: DurationSinceUnixEpoch) -> bool {
        match self.ends_at {
            Some(ends_at) if now > ends_at => {
                self.ends_at = None;
                true
            }
            _ => false,
        }
    }
}
