//! Requests the proxy forwards untouched.
use std::sync::Arc;

use greedy_proxy_test_helpers::configuration;
use reqwest::StatusCode;

use crate::common::fixtures::{sample_info_hash, ENCODED_INFO_HASH};
use crate::common::tracker::FakeTracker;
use crate::servers::proxy::client::Client;
use crate::servers::proxy::environment::Started;

#[tokio::test]
async fn it_should_forward_an_announce_without_the_downloaded_param_untouched() {
    let tracker = FakeTracker::start().await;
    let env = Started::new(&Arc::new(configuration::ephemeral_deterministic())).await;

    let query = format!("info_hash={ENCODED_INFO_HASH}&uploaded=5&left=0");

    let response = Client::new(env.bind_address())
        .get(&tracker.url(&format!("/announce?{query}")))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(tracker.last_request().query, Some(query));
    assert!(env.governor.get_torrent(&sample_info_hash()).is_none());

    env.stop().await;
}

#[tokio::test]
async fn it_should_forward_an_announce_with_a_non_numeric_counter_untouched() {
    let tracker = FakeTracker::start().await;
    let env = Started::new(&Arc::new(configuration::ephemeral_deterministic())).await;

    let query = format!("info_hash={ENCODED_INFO_HASH}&uploaded=0&downloaded=-1&left=0");

    Client::new(env.bind_address())
        .get(&tracker.url(&format!("/announce?{query}")))
        .await;

    assert_eq!(tracker.last_request().query, Some(query));
    assert_eq!(env.governor.get_metrics().entities, 0);

    env.stop().await;
}

#[tokio::test]
async fn it_should_forward_a_request_without_query_untouched() {
    let tracker = FakeTracker::start().await;
    let env = Started::new(&Arc::new(configuration::ephemeral_deterministic())).await;

    let response = Client::new(env.bind_address()).get(&tracker.url("/health")).await;

    let request = tracker.last_request();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(request.path, "/health");
    assert_eq!(request.query, None);

    env.stop().await;
}

#[tokio::test]
async fn it_should_forward_a_scrape_request_untouched() {
    let tracker = FakeTracker::start().await;
    let env = Started::new(&Arc::new(configuration::ephemeral_deterministic())).await;

    let query = format!("info_hash={ENCODED_INFO_HASH}");

    Client::new(env.bind_address())
        .get(&tracker.url(&format!("/scrape?{query}")))
        .await;

    let request = tracker.last_request();

    assert_eq!(request.path, "/scrape");
    assert_eq!(request.query, Some(query));

    env.stop().await;
}
