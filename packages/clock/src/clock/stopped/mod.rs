use super::{DurationSinceUnixEpoch, Time};
use crate::clock;

#[allow(clippy::module_name_repetitions)]
pub struct StoppedClock {}

/// A clock frozen at a time chosen by the test that reads it.
///
/// Every thread keeps its own time, so tests running in parallel never see
/// each other's settings.
#[allow(clippy::module_name_repetitions)]
pub trait Stopped: clock::Time {
    fn local_set(unix_time: &DurationSinceUnixEpoch);
}

impl Time for clock::Stopped {
    fn now() -> DurationSinceUnixEpoch {
        detail::FIXED_TIME.with(|time| *time.borrow())
    }
}

impl Stopped for clock::Stopped {
    fn local_set(unix_time: &DurationSinceUnixEpoch) {
        detail::FIXED_TIME.with(|time| {
            *time.borrow_mut() = *unix_time;
        });
    }
}


mod detail {
    use std::cell::RefCell;

    use greedy_proxy_primitives::DurationSinceUnixEpoch;

    thread_local!(pub static FIXED_TIME: RefCell<DurationSinceUnixEpoch> = RefCell::new(get_default_fixed_time()));

    /// Outside of tests the clock starts at the time the application started.
    #[cfg(not(test))]
    fn get_default_fixed_time() -> DurationSinceUnixEpoch {
        (*crate::static_time::TIME_AT_APP_START)
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
    }

    #[cfg(test)]
    fn get_default_fixed_time() -> DurationSinceUnixEpoch {
        DurationSinceUnixEpoch::ZERO
    }
}
