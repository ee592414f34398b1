//! Axum handler for every request received by the proxy.
//!
//! The request is processed in these steps:
//!
//! 1. Reject anything other than `GET`.
//! 2. Resolve the tracker the request goes to. A request without a tracker
//!    is rejected before the governor sees it, so it leaves no state behind.
//! 3. Try to intercept it as an announce. If it's not an announce the proxy
//!    can rewrite, the original query is kept.
//! 4. Ask the [`RatioGovernor`](crate::core::RatioGovernor) for the
//!    `uploaded` value and rewrite the query.
//! 5. Forward the request to the tracker and relay its response.
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, Method, Uri};
use axum::response::Response;
use greedy_proxy_primitives::as_mib;

use crate::servers::proxy::v1::requests::announce::{self, Announce};
use crate::servers::proxy::v1::responses::error::{self, Error};
use crate::servers::proxy::v1::services::forwarder::{self, Target, UpstreamResponse};
use crate::servers::proxy::v1::services::hostname;
use crate::servers::proxy::v1::Context;
use crate::servers::proxy::PROXY_LOG_TARGET;

/// It handles any request received by the proxy.
pub async fn handle(
    State(context): State<Arc<Context>>,
    client: Option<ConnectInfo<SocketAddr>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    if method != Method::GET {
        tracing::info!(target: PROXY_LOG_TARGET, %method, %uri, "Rejected non GET request");
        return error::method_not_allowed();
    }

    let target = match Target::resolve(&uri, &headers) {
        Ok(target) => target,
        Err(err) => return fail(&uri, &err),
    };

    let query = match announce::intercept(uri.query()) {
        Ok(announce) => Some(rewrite(&context, &announce, client.map(|ConnectInfo(addr)| addr))),
        Err(reason) => {
            tracing::info!(target: PROXY_LOG_TARGET, %uri, %reason, "Forwarding request without changes");
            uri.query().map(ToOwned::to_owned)
        }
    };

    let result = match target.uri(query.as_deref()) {
        Ok(target) => context.forwarder.forward(target, &headers).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(response) => relay(response),
        Err(err) => fail(&uri, &err),
    }
}

fn fail(uri: &Uri, err: &forwarder::Error) -> Response {
    tracing::error!(target: PROXY_LOG_TARGET, %uri, %err, "Unable to forward the request");
    Error::from(err).with_status(err.status_code())
}

/// Decides the reported value for an announce and returns the rewritten
/// query.
fn rewrite(context: &Context, announce: &Announce, client: Option<SocketAddr>) -> String {
    tracing::info!(
        target: PROXY_LOG_TARGET,
        info_hash = %announce.info_hash,
        client = ?client,
        downloaded_mb = %format!("{:.2}", as_mib(announce.downloaded)),
        uploaded_mb = %format!("{:.2}", as_mib(announce.uploaded)),
        left = announce.left,
        "Intercepted announce"
    );

    if let (Some(ip), Some(timeout)) = (announce.ip, context.hostname_lookup_timeout) {
        drop(hostname::spawn_log_client_hostname(ip, announce.info_hash, timeout));
    }

    let decision = context.governor.decide(&announce.info_hash, &announce.counters());

    tracing::info!(
        target: PROXY_LOG_TARGET,
        info_hash = %announce.info_hash,
        mode = %decision.mode,
        multiplier = %format!("{:.3}", decision.multiplier),
        real_mb = %format!("{:.2}", as_mib(announce.uploaded)),
        reported_mb = %format!("{:.2}", as_mib(decision.uploaded)),
        "Reporting upload"
    );

    announce.rewrite(decision.uploaded)
}

/// Builds the response from the tracker response. Nothing is added: not even
/// a default `Content-Type`.
fn relay(upstream: UpstreamResponse) -> Response {
    let mut response = Response::new(Body::from(upstream.body));

    *response.status_mut() = upstream.status;
    *response.headers_mut() = upstream.headers;

    response
}
