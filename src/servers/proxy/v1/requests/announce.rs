//! Interception of `announce` requests.
//!
//! The proxy only needs a few params from the announce query:
//!
//! Param | Required | Use
//! ---|---|---
//! `info_hash` | yes | key of the torrent state, percent-decoded
//! `downloaded` | yes | base of the reported upload
//! `uploaded` | yes | the value to replace
//! `left` | no | `0` means the client is seeding. Defaults to `1`
//! `ip` | no | only for logging
//!
//! Any other param is ignored and forwarded as it is. When a required param
//! is missing or malformed the request is not an announce the proxy can
//! rewrite: it's forwarded untouched. See [`PassThrough`].
use std::net::IpAddr;

use greedy_proxy_primitives::info_hash::InfoHash;
use greedy_proxy_primitives::NumberOfBytes;
use thiserror::Error;

use crate::core::AnnouncedCounters;
use crate::servers::proxy::percent_encoding::percent_decode_info_hash;
use crate::servers::proxy::v1::query::Query;

// Query param names
const INFO_HASH: &str = "info_hash";
const DOWNLOADED: &str = "downloaded";
const UPLOADED: &str = "uploaded";
const LEFT: &str = "left";
const IP: &str = "ip";

/// The `left` value assumed when the client does not send it: not complete.
const DEFAULT_LEFT: NumberOfBytes = 1;

/// An announce request the proxy can rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announce {
    pub info_hash: InfoHash,
    pub downloaded: NumberOfBytes,
    pub uploaded: NumberOfBytes,
    pub left: NumberOfBytes,
    /// The `ip` announced by the client, if any.
    pub ip: Option<IpAddr>,
    query: Query,
}

impl Announce {
    #[must_use]
    pub fn counters(&self) -> AnnouncedCounters {
        AnnouncedCounters {
            downloaded: self.downloaded,
            uploaded: self.uploaded,
            left: self.left,
        }
    }

    /// Returns the original query with the `uploaded` value replaced.
    #[must_use]
    pub fn rewrite(&self, uploaded: NumberOfBytes) -> String {
        self.query.with_replaced_param(UPLOADED, &uploaded.to_string())
    }
}

/// Reason why a request is forwarded without changes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PassThrough {
    #[error("the request has no query")]
    NoQuery,

    #[error("missing query param `{name}`")]
    MissingParam { name: &'static str },

    #[error("invalid value `{value}` for query param `{name}`")]
    InvalidNumber { name: &'static str, value: String },

    #[error("invalid info-hash `{value}`")]
    InvalidInfoHash { value: String },
}

/// Extracts the announce data from a raw URL query, without the leading `?`.
///
/// Torrents are tracked by their 20-byte `BitTorrent` v1 info-hash. An
/// `info_hash` that does not decode to 20 bytes (for example a 32-byte v2
/// hash) can't be keyed in the store, so the request is forwarded untouched
/// instead of being reported against a guessed key.
///
/// # Errors
///
/// Will return the [`PassThrough`] reason if the query is not an announce the
/// proxy can rewrite.
pub fn intercept(raw_query: Option<&str>) -> Result<Announce, PassThrough> {
    let raw_query = match raw_query {
        Some(raw_query) if !raw_query.is_empty() => raw_query,
        _ => return Err(PassThrough::NoQuery),
    };

    let query = Query::from(raw_query);

    let downloaded = extract_number(&query, DOWNLOADED)?;
    let uploaded = extract_number(&query, UPLOADED)?;
    let info_hash = extract_info_hash(&query)?;

    // A malformed `left` is treated as missing.
    let left = extract_number(&query, LEFT).unwrap_or(DEFAULT_LEFT);

    let ip = query.get_param(IP).and_then(|raw_ip| raw_ip.parse::<IpAddr>().ok());

    Ok(Announce {
        info_hash,
        downloaded,
        uploaded,
        left,
        ip,
        query,
    })
}

fn extract_number(query: &Query, name: &'static str) -> Result<NumberOfBytes, PassThrough> {
    let raw_value = query.get_param(name).ok_or(PassThrough::MissingParam { name })?;

    // Only plain digits: `u64::from_str` would also accept a leading `+`.
    if raw_value.is_empty() || !raw_value.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(PassThrough::InvalidNumber {
            name,
            value: raw_value.to_owned(),
        });
    }

    raw_value.parse::<NumberOfBytes>().map_err(|_| PassThrough::InvalidNumber {
        name,
        value: raw_value.to_owned(),
    })
}

fn extract_info_hash(query: &Query) -> Result<InfoHash, PassThrough> {
    let raw_value = query.get_param(INFO_HASH).ok_or(PassThrough::MissingParam { name: INFO_HASH })?;

    percent_decode_info_hash(raw_value).map_err(|_| PassThrough::InvalidInfoHash {
        value: raw_value.to_owned(),
    })
}
