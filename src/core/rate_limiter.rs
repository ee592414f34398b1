//! Bounds how fast the reported upload of a torrent can grow.
use std::time::Duration;

use greedy_proxy_primitives::NumberOfBytes;

/// Simulated maximum upload speed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RateLimiter {
    /// Bytes per second. `None` means unlimited.
    max_rate: Option<u64>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(max_rate: Option<u64>) -> Self {
        Self { max_rate }
    }

    #[must_use]
    pub fn unlimited() -> Self {
        Self { max_rate: None }
    }

    #[must_use]
    pub fn max_rate(&self) -> Option<u64> {
        self.max_rate
    }

    /// Returns the value to report given the `previous` reported value, the
    /// time `elapsed` since it was reported and the `candidate` value.
    ///
    /// The result is never over `previous + max_rate * elapsed` and never
    /// below `previous`. Without a previous value the candidate is returned
    /// as it is.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn cap(&self, previous: Option<NumberOfBytes>, elapsed: Duration, candidate: NumberOfBytes) -> NumberOfBytes {
        let Some(previous) = previous else {
            return candidate;
        };

        let bounded = match self.max_rate {
            None => candidate,
            Some(max_rate) => {
                // Float to int casts saturate.
                let allowance = (max_rate as f64 * elapsed.as_secs_f64()) as u64;
                candidate.min(previous.saturating_add(allowance))
            }
        };

        bounded.max(previous)
    }
}
