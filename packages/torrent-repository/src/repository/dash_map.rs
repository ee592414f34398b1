use dashmap::DashMap;
use greedy_proxy_primitives::entity_metrics::EntityMetrics;
use greedy_proxy_primitives::info_hash::InfoHash;
use greedy_proxy_primitives::DurationSinceUnixEpoch;

use super::Repository;
use crate::EntityState;

#[derive(Default, Debug)]
pub struct XacrimonDashMap<T> {
    pub torrents: DashMap<InfoHash, T>,
}

impl Repository<EntityState> for XacrimonDashMap<EntityState> {
    fn get(&self, key: &InfoHash) -> Option<EntityState> {
        self.torrents.get(key).map(|entry| *entry.value())
    }

    fn upsert(&self, key: &InfoHash, value: EntityState) {
        let _unused = self.torrents.insert(*key, value);
    }

    fn get_metrics(&self) -> EntityMetrics {
        let mut metrics = EntityMetrics::default();

        for entry in &self.torrents {
            metrics += entry.value().metrics();
        }

        metrics
    }

    fn remove(&self, key: &InfoHash) -> Option<EntityState> {
        self.torrents.remove(key).map(|(_key, value)| value)
    }

    fn remove_inactive(&self, current_cutoff: DurationSinceUnixEpoch) -> usize {
        let before = self.torrents.len();

        self.torrents.retain(|_, entry| !entry.is_inactive(current_cutoff));

        before.saturating_sub(self.torrents.len())
    }

    fn len(&self) -> usize {
        self.torrents.len()
    }
}
