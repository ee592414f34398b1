//! Announce requests the proxy rewrites.
use std::sync::Arc;

use greedy_proxy_primitives::report_mode::ReportMode;
use greedy_proxy_test_helpers::configuration;
use reqwest::StatusCode;

use crate::common::fixtures::{announce_query, sample_info_hash, unescaped_sample_info_hash, UNESCAPED_INFO_HASH};
use crate::common::tracker::{FakeTracker, ANNOUNCE_RESPONSE_BODY};
use crate::servers::proxy::client::{raw_get, Client};
use crate::servers::proxy::environment::Started;

#[tokio::test]
async fn it_should_report_the_seeding_multiplier_times_the_downloaded_bytes_when_seeding() {
    let tracker = FakeTracker::start().await;
    let env = Started::new(&Arc::new(configuration::ephemeral_deterministic())).await;

    let response = Client::new(env.bind_address())
        .get(&tracker.url(&format!("/announce?{}", announce_query(0, 104_857_600, 0))))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        tracker.last_request().query,
        Some(announce_query(125_829_120, 104_857_600, 0))
    );

    let state = env
        .governor
        .get_torrent(&sample_info_hash())
        .expect("the torrent should be tracked");

    assert_eq!(state.uploaded_reported, 125_829_120);
    assert_eq!(state.downloaded_real, 104_857_600);

    env.stop().await;
}

#[tokio::test]
async fn it_should_report_the_maximum_multiplier_times_the_downloaded_bytes_when_downloading() {
    let tracker = FakeTracker::start().await;
    let env = Started::new(&Arc::new(configuration::ephemeral_deterministic())).await;

    Client::new(env.bind_address())
        .get(&tracker.url(&format!("/announce?{}", announce_query(0, 104_857_600, 1_000))))
        .await;

    assert_eq!(
        tracker.last_request().query,
        Some(announce_query(167_772_160, 104_857_600, 1_000))
    );

    env.stop().await;
}

#[tokio::test]
async fn it_should_never_report_less_than_the_previous_announce_of_the_same_torrent() {
    let tracker = FakeTracker::start().await;
    let env = Started::new(&Arc::new(configuration::ephemeral_deterministic())).await;
    let client = Client::new(env.bind_address());

    client
        .get(&tracker.url(&format!("/announce?{}", announce_query(0, 104_857_600, 0))))
        .await;

    // The client restarted and its counters went back to zero.
    client.get(&tracker.url(&format!("/announce?{}", announce_query(0, 0, 0)))).await;

    assert_eq!(tracker.last_request().query, Some(announce_query(125_829_120, 0, 0)));

    env.stop().await;
}

#[tokio::test]
async fn it_should_report_the_real_upload_during_the_cooldown() {
    let tracker = FakeTracker::start().await;
    let env = Started::new(&Arc::new(configuration::ephemeral_with_cooldown(1.0, 3600))).await;
    let client = Client::new(env.bind_address());

    // The first announce takes the global ratio to 1.2, over the limit.
    client
        .get(&tracker.url(&format!("/announce?{}", announce_query(0, 104_857_600, 0))))
        .await;

    assert!(!env.governor.is_in_cooldown());

    client
        .get(&tracker.url(&format!("/announce?{}", announce_query(0, 104_857_600, 0))))
        .await;

    assert!(env.governor.is_in_cooldown());

    // Floored at the previous reported value.
    assert_eq!(
        tracker.last_request().query,
        Some(announce_query(125_829_120, 104_857_600, 0))
    );

    let decision = env.governor.decide(
        &sample_info_hash(),
        &greedy_proxy::core::AnnouncedCounters {
            downloaded: 209_715_200,
            uploaded: 0,
            left: 0,
        },
    );

    assert_eq!(decision.mode, ReportMode::Cooldown);
    assert_eq!(decision.uploaded, 209_715_200);

    env.stop().await;
}

#[tokio::test]
async fn it_should_relay_the_tracker_response_to_the_client() {
    let tracker = FakeTracker::start().await;
    let env = Started::new(&Arc::new(configuration::ephemeral_deterministic())).await;

    let response = Client::new(env.bind_address())
        .get(&tracker.url(&format!("/announce?{}", announce_query(0, 104_857_600, 0))))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-tracker").map(|value| value.as_bytes()),
        Some("fake".as_bytes())
    );
    assert_eq!(
        response.headers().get("content-type").map(|value| value.as_bytes()),
        Some("text/plain".as_bytes())
    );
    assert_eq!(response.text().await.unwrap(), ANNOUNCE_RESPONSE_BODY);

    env.stop().await;
}

#[tokio::test]
async fn it_should_forward_the_client_headers_to_the_tracker() {
    let tracker = FakeTracker::start().await;
    let env = Started::new(&Arc::new(configuration::ephemeral_deterministic())).await;

    Client::new(env.bind_address())
        .get_with_header(
            &tracker.url(&format!("/announce?{}", announce_query(0, 1_024, 0))),
            "user-agent",
            "qBittorrent/4.6.0",
        )
        .await;

    let request = tracker.last_request();

    assert_eq!(
        request.headers.get("user-agent").map(|value| value.as_bytes()),
        Some("qBittorrent/4.6.0".as_bytes())
    );
    assert_eq!(
        request.headers.get("host").map(|value| value.as_bytes()),
        Some(tracker.address.to_string().as_bytes())
    );

    env.stop().await;
}

#[tokio::test]
async fn it_should_forward_the_unescaped_characters_of_the_query_unchanged() {
    let tracker = FakeTracker::start().await;
    let env = Started::new(&Arc::new(configuration::ephemeral_deterministic())).await;

    let query = |uploaded: u64| {
        format!("info_hash={UNESCAPED_INFO_HASH}&peer_id=-lt0D80-abc&uploaded={uploaded}&downloaded=1000&left=0&key=a'b")
    };

    let response = raw_get(env.bind_address(), &tracker.url(&format!("/announce?{}", query(0))), None).await;

    assert!(response.starts_with("HTTP/1.0 200"), "unexpected response: {response}");
    assert_eq!(tracker.last_request().query, Some(query(1_200)));

    let state = env
        .governor
        .get_torrent(&unescaped_sample_info_hash())
        .expect("the torrent should be tracked");

    assert_eq!(state.uploaded_reported, 1_200);

    env.stop().await;
}
