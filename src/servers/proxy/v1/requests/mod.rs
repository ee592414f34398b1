//! Requests the proxy understands.
pub mod announce;
