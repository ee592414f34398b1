use std::time::Duration;

use greedy_proxy_primitives::info_hash::InfoHash;
use greedy_proxy_primitives::NumberOfBytes;
use greedy_proxy_torrent_repository::EntityState;

/// An info-hash made of the same byte repeated.
pub fn an_info_hash(byte: u8) -> InfoHash {
    InfoHash([byte; 20])
}

/// A state announced at `last_update` seconds since the epoch.
pub fn a_state(downloaded: NumberOfBytes, reported: NumberOfBytes, last_update: u64) -> EntityState {
    EntityState {
        downloaded_real: downloaded,
        uploaded_real: downloaded / 10,
        uploaded_reported: reported,
        last_update: Duration::from_secs(last_update),
    }
}
