use greedy_proxy_primitives::entity_metrics::EntityMetrics;
use greedy_proxy_primitives::info_hash::InfoHash;
use greedy_proxy_primitives::DurationSinceUnixEpoch;

pub mod dash_map;
pub mod rw_lock_std;
pub mod skip_map;

/// A concurrent map from torrent to its last known state.
///
/// Every operation is atomic with respect to the others. Callers that need
/// a read-then-write sequence to be atomic must serialize it themselves.
pub trait Repository<T>: Default + Send + Sync + 'static {
    fn get(&self, key: &InfoHash) -> Option<T>;

    /// Replaces the state of the torrent, creating it when it's new.
    fn upsert(&self, key: &InfoHash, value: T);

    /// Sums the counters of all the torrents.
    fn get_metrics(&self) -> EntityMetrics;

    fn remove(&self, key: &InfoHash) -> Option<T>;

    /// Removes the torrents not announced since `current_cutoff` and returns
    /// how many were removed.
    fn remove_inactive(&self, current_cutoff: DurationSinceUnixEpoch) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
