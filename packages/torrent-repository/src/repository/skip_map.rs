use crossbeam_skiplist::SkipMap;
use greedy_proxy_primitives::entity_metrics::EntityMetrics;
use greedy_proxy_primitives::info_hash::InfoHash;
use greedy_proxy_primitives::DurationSinceUnixEpoch;

use super::Repository;
use crate::EntityState;

#[derive(Default, Debug)]
pub struct CrossbeamSkipList<T> {
    pub torrents: SkipMap<InfoHash, T>,
}

impl Repository<EntityState> for CrossbeamSkipList<EntityState> {
    fn get(&self, key: &InfoHash) -> Option<EntityState> {
        self.torrents.get(key).map(|entry| *entry.value())
    }

    fn upsert(&self, key: &InfoHash, value: EntityState) {
        // Inserting an existing key replaces its value.
        self.torrents.insert(*key, value);
    }

    fn get_metrics(&self) -> EntityMetrics {
        let mut metrics = EntityMetrics::default();

        for entry in &self.torrents {
            metrics += entry.value().metrics();
        }

        metrics
    }

    fn remove(&self, key: &InfoHash) -> Option<EntityState> {
        self.torrents.remove(key).map(|entry| *entry.value())
    }

    fn remove_inactive(&self, current_cutoff: DurationSinceUnixEpoch) -> usize {
        let mut removed = 0;

        for entry in &self.torrents {
            if entry.value().is_inactive(current_cutoff) && entry.remove() {
                removed += 1;
            }
        }

        removed
    }

    fn len(&self) -> usize {
        self.torrents.len()
    }
}
