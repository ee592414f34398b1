use std::net::SocketAddr;
use std::str::FromStr;

use greedy_proxy_primitives::info_hash::InfoHash;

/// The info-hash `3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0`.
pub const ENCODED_INFO_HASH: &str = "%3B%24U%04%CF_%11%BB%DB%E1%20%1C%EAjk%F4Z%EE%1B%C0";

#[must_use]
pub fn sample_info_hash() -> InfoHash {
    InfoHash::from_str("3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0").expect("it should be a valid info-hash")
}

/// The info-hash `3b245504cf5f11bbdbe1201cea6a6bf45aee1b27` as sent by clients
/// that leave the `'` byte unescaped.
pub const UNESCAPED_INFO_HASH: &str = "%3B%24U%04%CF_%11%BB%DB%E1%20%1C%EAjk%F4Z%EE%1B'";

#[must_use]
pub fn unescaped_sample_info_hash() -> InfoHash {
    InfoHash::from_str("3b245504cf5f11bbdbe1201cea6a6bf45aee1b27").expect("it should be a valid info-hash")
}

/// The query of an announce with the given counters, as a torrent client
/// would send it.
#[must_use]
pub fn announce_query(uploaded: u64, downloaded: u64, left: u64) -> String {
    format!(
        "info_hash={ENCODED_INFO_HASH}&peer_id=-qB00000000000000001&port=17548&uploaded={uploaded}&downloaded={downloaded}&left={left}&event=started&compact=1"
    )
}

/// An address where nothing is listening.
#[must_use]
pub fn unused_local_address() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("it should bind to an ephemeral port");
    listener.local_addr().expect("it should have a local address")
}
