//! Greedy HTTP proxy.
//!
//! The proxy sits between a torrent client and its HTTP trackers. The client
//! is configured to use it as its HTTP proxy, so every tracker request arrives
//! here in absolute form (`GET http://tracker/announce?... HTTP/1.1`).
//!
//! For announce requests the proxy replaces the `uploaded` param with the
//! value decided by the [`RatioGovernor`](crate::core::RatioGovernor). Every
//! other request, and every announce the proxy can't parse, is forwarded
//! untouched. Tracker responses are relayed back to the client as they are.
//!
//! Refer to [`v1`] for the details of the request processing.
//!
//! ## Versioning
//!
//! There is only one version of the proxy processing. The [`Version`] enum
//! leaves room for alternative rewriting strategies bound to different
//! ports in the future.
use serde::{Deserialize, Serialize};

pub mod percent_encoding;
pub mod server;
pub mod v1;

pub const PROXY_LOG_TARGET: &str = "PROXY";

/// The version of the proxy request processing.
#[derive(Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Debug)]
pub enum Version {
    /// The `v1` version.
    V1,
}
