//! Services used by the proxy handler.
//!
//! - [`forwarder`]: sends the (rewritten) request to the real tracker.
//! - [`hostname`]: best effort reverse DNS of the announced client IP.
pub mod forwarder;
pub mod hostname;
