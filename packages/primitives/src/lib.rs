//! Primitive types for the [Greedy Proxy](https://docs.rs/greedy-proxy).
//!
//! This module contains the basic data structures shared by the proxy
//! packages: the torrent [`InfoHash`](info_hash::InfoHash) used as the state
//! key, byte counters, timestamps and the reporting [`ReportMode`](report_mode::ReportMode).
use std::time::Duration;

pub mod entity_metrics;
pub mod info_hash;
pub mod report_mode;

/// Duration since the Unix Epoch.
pub type DurationSinceUnixEpoch = Duration;

/// A number of bytes as announced by a client: `downloaded`, `uploaded` or
/// `left`.
pub type NumberOfBytes = u64;

/// Number of bytes in a mebibyte. Used to render human readable log lines.
pub const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Converts a number of bytes into mebibytes for display purposes.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn as_mib(bytes: NumberOfBytes) -> f64 {
    bytes as f64 / BYTES_PER_MIB
}
