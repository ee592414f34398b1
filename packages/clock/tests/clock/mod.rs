use std::time::Duration;

use greedy_proxy_clock::clock::stopped::Stopped as _;
use greedy_proxy_clock::clock::Time;

use crate::CurrentClock;

#[test]
fn it_should_use_stopped_time_for_testing() {
    CurrentClock::local_set(&Duration::from_secs(10));

    let time = CurrentClock::now();
    std::thread::sleep(Duration::from_millis(50));
    let time_2 = CurrentClock::now();

    assert_eq!(time, time_2);
    assert_eq!(time, Duration::from_secs(10));
}

#[test]
fn it_should_find_the_idle_cutoff_on_the_stopped_clock() {
    CurrentClock::local_set(&Duration::from_secs(100));

    assert_eq!(CurrentClock::now_sub(&Duration::from_secs(90)), Some(Duration::from_secs(10)));
}
