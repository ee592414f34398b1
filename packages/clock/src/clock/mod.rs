use std::time::Duration;

use greedy_proxy_primitives::DurationSinceUnixEpoch;

use self::stopped::StoppedClock;
use self::working::WorkingClock;

pub mod stopped;
pub mod working;

/// Wall clock or frozen clock, picked at compile time through the
/// `CurrentClock` alias of each crate.
#[derive(Debug)]
pub struct Clock<T> {
    clock: std::marker::PhantomData<T>,
}

/// Reads the system time.
pub type Working = Clock<WorkingClock>;
/// Reads a per-thread time that only moves when a test sets it.
pub type Stopped = Clock<StoppedClock>;

/// Source of timestamps for announce bookkeeping and cooldowns.
pub trait Time: Sized {
    fn now() -> DurationSinceUnixEpoch;

    /// `None` when `sub_time` reaches before the Unix Epoch.
    #[must_use]
    fn now_sub(sub_time: &Duration) -> Option<DurationSinceUnixEpoch> {
        Self::now().checked_sub(*sub_time)
    }
}
