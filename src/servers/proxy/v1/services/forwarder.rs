//! Forwarding of the requests to the real tracker.
//!
//! The forwarder sends exactly one `GET` request per intercepted request and
//! relays the tracker response: status code, headers and body. The body is
//! never inspected nor decompressed. There are no retries.
//!
//! The request target is handed to the HTTP client as an [`Uri`] built from
//! the raw text of the request, so the query reaches the tracker with the
//! same bytes the torrent client sent, apart from the rewritten `uploaded`
//! digits.
//!
//! Hop-by-hop headers are not forwarded in either direction and the `Host`
//! header is set to the tracker authority.
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::header::{self, HeaderMap, HeaderName};
use axum::http::{Request, StatusCode, Uri};
use greedy_proxy_located_error::{DynError, LocatedError};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use thiserror::Error;

/// Request headers that are never sent to the tracker.
static HOP_BY_HOP_REQUEST_HEADERS: [HeaderName; 9] = [
    header::CONNECTION,
    HeaderName::from_static("proxy-connection"),
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    header::CONTENT_LENGTH,
];

/// Response headers that are not relayed to the client. The proxy sets its
/// own framing.
static EXCLUDED_RESPONSE_HEADERS: [HeaderName; 3] = [header::TRANSFER_ENCODING, header::CONTENT_LENGTH, header::CONNECTION];

/// Errors forwarding a request to the tracker.
#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("the tracker did not answer in time: {source}")]
    Timeout {
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
    },

    #[error("unable to connect to the tracker: {source}")]
    Unreachable {
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
    },

    #[error("the request to the tracker failed: {source}")]
    Upstream {
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
    },

    #[error("invalid target {target}: {message}, {location}")]
    InvalidTarget {
        target: String,
        message: String,
        location: &'static Location<'static>,
    },
}

impl Error {
    /// The status code of the response sent to the client.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            Error::Unreachable { .. } | Error::Upstream { .. } => StatusCode::BAD_GATEWAY,
            Error::InvalidTarget { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<hyper_util::client::legacy::Error> for Error {
    #[track_caller]
    fn from(err: hyper_util::client::legacy::Error) -> Self {
        let is_connect = err.is_connect();

        let source: LocatedError<'static, dyn std::error::Error + Send + Sync> = (Arc::new(err) as DynError).into();

        if is_connect {
            Error::Unreachable { source }
        } else {
            Error::Upstream { source }
        }
    }
}

impl From<axum::Error> for Error {
    #[track_caller]
    fn from(err: axum::Error) -> Self {
        Error::Upstream {
            source: (Arc::new(err) as DynError).into(),
        }
    }
}

impl From<tokio::time::error::Elapsed> for Error {
    #[track_caller]
    fn from(err: tokio::time::error::Elapsed) -> Self {
        Error::Timeout {
            source: (Arc::new(err) as DynError).into(),
        }
    }
}

/// The response of the tracker, ready to be relayed.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Where a request goes: the scheme, authority and path of the tracker.
///
/// Proxied requests use the absolute form (`GET http://tracker/announce`).
/// When the request uses the origin form (`GET /announce`) the `Host` header
/// gives the tracker authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    base: String,
}

impl Target {
    /// Resolves the tracker of a request received by the proxy.
    ///
    /// # Errors
    ///
    /// Will return `Err` if there is no tracker authority or the resulting URI
    /// is not valid.
    #[track_caller]
    pub fn resolve(uri: &Uri, headers: &HeaderMap) -> Result<Self, Error> {
        let scheme = uri.scheme_str().unwrap_or("http");

        let authority = match uri.authority() {
            Some(authority) => authority.to_string(),
            None => headers
                .get(header::HOST)
                .and_then(|host| host.to_str().ok())
                .filter(|host| !host.is_empty())
                .map(ToOwned::to_owned)
                .ok_or_else(|| Error::InvalidTarget {
                    target: uri.to_string(),
                    message: "missing tracker host".to_owned(),
                    location: Location::caller(),
                })?,
        };

        let target = Self {
            base: format!("{scheme}://{authority}{}", uri.path()),
        };

        target.uri(None)?;

        Ok(target)
    }

    /// The URI sent to the tracker. The query is appended as it is: it's
    /// neither decoded nor re-encoded.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the query contains bytes that are not allowed in
    /// a request target.
    #[track_caller]
    pub fn uri(&self, query: Option<&str>) -> Result<Uri, Error> {
        let target = match query {
            Some(query) => format!("{}?{query}", self.base),
            None => self.base.clone(),
        };

        Uri::try_from(target.as_str()).map_err(|err| Error::InvalidTarget {
            target,
            message: err.to_string(),
            location: Location::caller(),
        })
    }
}

/// HTTP client to the trackers.
///
/// Redirects are not followed, so 3xx responses are relayed to the client,
/// and no proxy from the environment is used.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client<HttpConnector, Body>,
    timeout: Duration,
}

impl Forwarder {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(timeout));

        Self {
            client: Client::builder(TokioExecutor::new()).build(connector),
            timeout,
        }
    }

    /// Sends the request to the tracker and reads the whole response.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the tracker can't be reached, it does not answer
    /// before the timeout or the connection fails while reading the response.
    pub async fn forward(&self, target: Uri, headers: &HeaderMap) -> Result<UpstreamResponse, Error> {
        let mut request = Request::new(Body::empty());
        *request.uri_mut() = target;
        *request.headers_mut() = request_headers(headers);

        let exchange = async {
            let response = self.client.request(request).await?;

            let (parts, body) = response.into_parts();
            let body = axum::body::to_bytes(Body::new(body), usize::MAX).await?;

            Ok::<_, Error>(UpstreamResponse {
                status: parts.status,
                headers: response_headers(&parts.headers),
                body,
            })
        };

        tokio::time::timeout(self.timeout, exchange).await?
    }
}

/// The headers sent to the tracker. The `Host` header is removed so the
/// client derives it from the target URI.
#[must_use]
pub fn request_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = inbound.clone();

    headers.remove(header::HOST);

    for name in HOP_BY_HOP_REQUEST_HEADERS.iter() {
        headers.remove(name);
    }

    headers
}

/// The tracker headers relayed to the client.
#[must_use]
pub fn response_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut headers = upstream.clone();

    for name in EXCLUDED_RESPONSE_HEADERS.iter() {
        headers.remove(name);
    }

    headers
}
