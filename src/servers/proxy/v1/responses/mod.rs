//! Responses generated by the proxy itself.
//!
//! Responses from the trackers are relayed as they are. The proxy only writes
//! its own response when it can't reach the tracker or the request can't be
//! forwarded.
pub mod error;
