use std::collections::BTreeMap;

use greedy_proxy_primitives::entity_metrics::EntityMetrics;
use greedy_proxy_primitives::info_hash::InfoHash;
use greedy_proxy_primitives::DurationSinceUnixEpoch;

use super::Repository;
use crate::{EntityState, TorrentsRwLockStd};

#[derive(Default, Debug)]
pub struct RwLockStd<T> {
    pub(crate) torrents: std::sync::RwLock<BTreeMap<InfoHash, T>>,
}

impl TorrentsRwLockStd {
    fn get_torrents(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<InfoHash, EntityState>> {
        // The map is never left half updated, so a poisoned lock is still usable.
        self.torrents.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn get_torrents_mut(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<InfoHash, EntityState>> {
        self.torrents.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Repository<EntityState> for TorrentsRwLockStd {
    fn get(&self, key: &InfoHash) -> Option<EntityState> {
        self.get_torrents().get(key).copied()
    }

    fn upsert(&self, key: &InfoHash, value: EntityState) {
        self.get_torrents_mut().insert(*key, value);
    }

    fn get_metrics(&self) -> EntityMetrics {
        let mut metrics = EntityMetrics::default();

        for entry in self.get_torrents().values() {
            metrics += entry.metrics();
        }

        metrics
    }

    fn remove(&self, key: &InfoHash) -> Option<EntityState> {
        self.get_torrents_mut().remove(key)
    }

    fn remove_inactive(&self, current_cutoff: DurationSinceUnixEpoch) -> usize {
        let mut db = self.get_torrents_mut();
        let before = db.len();

        db.retain(|_, entry| !entry.is_inactive(current_cutoff));

        before - db.len()
    }

    fn len(&self) -> usize {
        self.get_torrents().len()
    }
}
