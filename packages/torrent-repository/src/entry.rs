use greedy_proxy_primitives::entity_metrics::EntityMetrics;
use greedy_proxy_primitives::{DurationSinceUnixEpoch, NumberOfBytes};

/// The state kept for one torrent.
///
/// It's replaced as a whole on every announce the proxy rewrites.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EntityState {
    /// The last `downloaded` value announced by the client. It's not assumed
    /// to be monotonic.
    pub downloaded_real: NumberOfBytes,
    /// The last `uploaded` value announced by the client. Only informative.
    pub uploaded_real: NumberOfBytes,
    /// The last `uploaded` value sent to the tracker. It never decreases.
    pub uploaded_reported: NumberOfBytes,
    /// When the last announce for this torrent was processed.
    pub last_update: DurationSinceUnixEpoch,
}

impl EntityState {
    /// The contribution of this torrent to the global counters.
    #[must_use]
    pub fn metrics(&self) -> EntityMetrics {
        EntityMetrics {
            entities: 1,
            downloaded: self.downloaded_real,
            uploaded_real: self.uploaded_real,
            uploaded_reported: self.uploaded_reported,
        }
    }

    /// It returns true if the torrent has not been announced since `cutoff`.
    #[must_use]
    pub fn is_inactive(&self, cutoff: DurationSinceUnixEpoch) -> bool {
        self.last_update < cutoff
    }
}
