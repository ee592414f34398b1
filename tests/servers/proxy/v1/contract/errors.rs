//! Failures the proxy reports to the client.
use std::sync::Arc;

use greedy_proxy_test_helpers::configuration;
use reqwest::StatusCode;

use crate::common::fixtures::{announce_query, sample_info_hash, unused_local_address};
use crate::common::tracker::{FakeTracker, NOT_FOUND_RESPONSE_BODY, SLOW_PATH};
use crate::servers::proxy::client::{raw_get, Client};
use crate::servers::proxy::environment::Started;

#[tokio::test]
async fn it_should_relay_the_tracker_error_responses() {
    let tracker = FakeTracker::start().await;
    let env = Started::new(&Arc::new(configuration::ephemeral_deterministic())).await;

    let response = Client::new(env.bind_address()).get(&tracker.url("/not-found")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.text().await.unwrap(), NOT_FOUND_RESPONSE_BODY);

    env.stop().await;
}

#[tokio::test]
async fn it_should_answer_bad_gateway_when_the_tracker_is_unreachable() {
    let env = Started::new(&Arc::new(configuration::ephemeral_deterministic())).await;

    let url = format!(
        "http://{}/announce?{}",
        unused_local_address(),
        announce_query(0, 104_857_600, 0)
    );

    let response = Client::new(env.bind_address()).get(&url).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(response.text().await.unwrap().starts_with("d14:failure reason"));

    env.stop().await;
}

#[tokio::test]
async fn it_should_answer_gateway_timeout_when_the_tracker_is_too_slow() {
    let tracker = FakeTracker::start().await;
    let env = Started::new(&Arc::new(configuration::ephemeral_with_upstream_timeout(1))).await;

    let response = Client::new(env.bind_address()).get(&tracker.url(SLOW_PATH)).await;

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    assert!(response.text().await.unwrap().starts_with("d14:failure reason"));

    env.stop().await;
}

#[tokio::test]
async fn it_should_reject_requests_other_than_get() {
    let tracker = FakeTracker::start().await;
    let env = Started::new(&Arc::new(configuration::ephemeral_deterministic())).await;

    let response = Client::new(env.bind_address())
        .post(&tracker.url(&format!("/announce?{}", announce_query(0, 1_024, 0))))
        .await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(tracker.received_requests().is_empty());

    env.stop().await;
}

#[tokio::test]
async fn it_should_reject_an_announce_without_tracker_host_before_updating_the_torrent() {
    let env = Started::new(&Arc::new(configuration::ephemeral_deterministic())).await;

    // Origin form and no `Host` header: there is no tracker to forward to.
    let response = raw_get(
        env.bind_address(),
        &format!("/announce?{}", announce_query(0, 1_000, 0)),
        None,
    )
    .await;

    assert!(response.starts_with("HTTP/1.0 400"), "unexpected response: {response}");
    assert!(response.contains("d14:failure reason"));
    assert!(env.governor.get_torrent(&sample_info_hash()).is_none());
    assert_eq!(env.governor.get_metrics().entities, 0);

    env.stop().await;
}
