use greedy_proxy_primitives::entity_metrics::EntityMetrics;
use greedy_proxy_primitives::info_hash::InfoHash;
use greedy_proxy_primitives::DurationSinceUnixEpoch;
use greedy_proxy_torrent_repository::repository::Repository as _;
use greedy_proxy_torrent_repository::{EntityState, TorrentsDashMap, TorrentsRwLockStd, TorrentsSkipMap};

#[derive(Debug)]
pub(crate) enum Repo {
    RwLockStd(TorrentsRwLockStd),
    DashMap(TorrentsDashMap),
    SkipMap(TorrentsSkipMap),
}

impl Repo {
    pub(crate) fn get(&self, key: &InfoHash) -> Option<EntityState> {
        match self {
            Repo::RwLockStd(repo) => repo.get(key),
            Repo::DashMap(repo) => repo.get(key),
            Repo::SkipMap(repo) => repo.get(key),
        }
    }

    pub(crate) fn upsert(&self, key: &InfoHash, value: EntityState) {
        match self {
            Repo::RwLockStd(repo) => repo.upsert(key, value),
            Repo::DashMap(repo) => repo.upsert(key, value),
            Repo::SkipMap(repo) => repo.upsert(key, value),
        }
    }

    pub(crate) fn get_metrics(&self) -> EntityMetrics {
        match self {
            Repo::RwLockStd(repo) => repo.get_metrics(),
            Repo::DashMap(repo) => repo.get_metrics(),
            Repo::SkipMap(repo) => repo.get_metrics(),
        }
    }

    pub(crate) fn remove(&self, key: &InfoHash) -> Option<EntityState> {
        match self {
            Repo::RwLockStd(repo) => repo.remove(key),
            Repo::DashMap(repo) => repo.remove(key),
            Repo::SkipMap(repo) => repo.remove(key),
        }
    }

    pub(crate) fn remove_inactive(&self, current_cutoff: DurationSinceUnixEpoch) -> usize {
        match self {
            Repo::RwLockStd(repo) => repo.remove_inactive(current_cutoff),
            Repo::DashMap(repo) => repo.remove_inactive(current_cutoff),
            Repo::SkipMap(repo) => repo.remove_inactive(current_cutoff),
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Repo::RwLockStd(repo) => repo.len(),
            Repo::DashMap(repo) => repo.len(),
            Repo::SkipMap(repo) => repo.len(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        match self {
            Repo::RwLockStd(repo) => repo.is_empty(),
            Repo::DashMap(repo) => repo.is_empty(),
            Repo::SkipMap(repo) => repo.is_empty(),
        }
    }

    pub(crate) fn insert_all(&self, entries: &[(InfoHash, EntityState)]) {
        for (info_hash, state) in entries {
            self.upsert(info_hash, *state);
        }
    }
}
