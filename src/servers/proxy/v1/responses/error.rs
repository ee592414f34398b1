//! `Error` response for the proxy.
//!
//! It uses the same format as a tracker failure: a bencoded dictionary with a
//! `failure reason` key, so torrent clients show the message to the user.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::servers::proxy::v1::services::forwarder;

/// A bencoded failure response.
#[derive(Serialize, Debug, PartialEq)]
pub struct Error {
    /// Human readable string which explains why the request failed.
    #[serde(rename = "failure reason")]
    pub failure_reason: String,
}

impl Error {
    /// Returns the bencoded representation of the `Error` struct.
    ///
    /// ```rust
    /// use greedy_proxy::servers::proxy::v1::responses::error::Error;
    ///
    /// let err = Error {
    ///    failure_reason: "error message".to_owned(),
    /// };
    ///
    /// // cspell:disable-next-line
    /// assert_eq!(err.write(), "d14:failure reason13:error messagee");
    /// ```
    #[must_use]
    pub fn write(&self) -> String {
        serde_bencode::to_string(&self).unwrap_or_else(|_| {
            format!("d14:failure reason{}:{}e", self.failure_reason.len(), self.failure_reason)
        })
    }

    /// Builds the response with the given HTTP status code.
    #[must_use]
    pub fn with_status(self, status: StatusCode) -> Response {
        (status, self.write()).into_response()
    }
}

impl From<&forwarder::Error> for Error {
    fn from(err: &forwarder::Error) -> Self {
        Self {
            failure_reason: format!("Proxy error: {err}"),
        }
    }
}

/// Response for any method other than `GET`.
#[must_use]
pub fn method_not_allowed() -> Response {
    Error {
        failure_reason: "Proxy error: only GET requests are supported".to_owned(),
    }
    .with_status(StatusCode::METHOD_NOT_ALLOWED)
}

/// Response for a request that panicked while being processed.
#[must_use]
pub fn internal_error() -> Response {
    Error {
        failure_reason: "Proxy error: internal error".to_owned(),
    }
    .with_status(StatusCode::INTERNAL_SERVER_ERROR)
}
