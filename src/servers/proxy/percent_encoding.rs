//! Percent decoding of the binary values sent in the announce query.
//!
//! The `info_hash` is a 20-byte binary value. Clients send it
//! percent-encoded, for example:
//!
//! ```text
//! %3B%24U%04%CF%5F%11%BB%DB%E1%20%1C%EAjk%F4Z%EE%1B%C0
//! ```
use greedy_proxy_primitives::info_hash::{self, InfoHash};

/// Percent decodes a percent encoded infohash.
///
/// # Errors
///
/// Will return `Err` if the decoded bytes do not represent a valid
/// [`InfoHash`].
pub fn percent_decode_info_hash(raw_info_hash: &str) -> Result<InfoHash, info_hash::ConversionError> {
    let bytes = percent_encoding::percent_decode_str(raw_info_hash).collect::<Vec<u8>>();
    InfoHash::try_from(bytes)
}
