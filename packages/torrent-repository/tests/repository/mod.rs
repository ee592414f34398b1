use std::time::Duration;

use greedy_proxy_primitives::entity_metrics::EntityMetrics;
use greedy_proxy_primitives::info_hash::InfoHash;
use greedy_proxy_torrent_repository::repository::dash_map::XacrimonDashMap;
use greedy_proxy_torrent_repository::repository::rw_lock_std::RwLockStd;
use greedy_proxy_torrent_repository::repository::skip_map::CrossbeamSkipList;
use greedy_proxy_torrent_repository::EntityState;
use rstest::{fixture, rstest};

use crate::common::repo::Repo;
use crate::common::state::{a_state, an_info_hash};

#[fixture]
fn standard() -> Repo {
    Repo::RwLockStd(RwLockStd::default())
}

#[fixture]
fn dash_map() -> Repo {
    Repo::DashMap(XacrimonDashMap::default())
}

#[fixture]
fn skip_list() -> Repo {
    Repo::SkipMap(CrossbeamSkipList::default())
}

type Entries = Vec<(InfoHash, EntityState)>;

#[fixture]
fn empty() -> Entries {
    vec![]
}

#[fixture]
fn single() -> Entries {
    vec![(an_info_hash(1), a_state(100, 160, 10))]
}

#[fixture]
fn three() -> Entries {
    vec![
        (an_info_hash(1), a_state(100, 160, 10)),
        (an_info_hash(2), a_state(200, 240, 20)),
        (an_info_hash(3), a_state(0, 0, 30)),
    ]
}

#[fixture]
fn many() -> Entries {
    (0..=255u8).map(|i| (an_info_hash(i), a_state(u64::from(i), u64::from(i) * 2, 1))).collect()
}

#[rstest]
#[case::empty(empty())]
#[case::single(single())]
#[case::three(three())]
#[case::many(many())]
fn it_should_get_the_state_of_a_torrent(
    #[values(standard(), dash_map(), skip_list())] repo: Repo,
    #[case] entries: Entries,
) {
    repo.insert_all(&entries);

    for (info_hash, state) in &entries {
        assert_eq!(repo.get(info_hash), Some(*state));
    }

    assert_eq!(repo.len(), entries.len());
}

#[rstest]
fn it_should_return_none_for_an_unknown_torrent(#[values(standard(), dash_map(), skip_list())] repo: Repo) {
    assert_eq!(repo.get(&an_info_hash(9)), None);
    assert!(repo.is_empty());
}

#[rstest]
fn it_should_replace_the_state_on_upsert(#[values(standard(), dash_map(), skip_list())] repo: Repo) {
    let info_hash = an_info_hash(1);

    repo.upsert(&info_hash, a_state(100, 160, 10));
    repo.upsert(&info_hash, a_state(150, 240, 20));

    assert_eq!(repo.get(&info_hash), Some(a_state(150, 240, 20)));
    assert_eq!(repo.len(), 1);
}

#[rstest]
#[case::empty(empty())]
#[case::single(single())]
#[case::three(three())]
#[case::many(many())]
fn it_should_sum_the_counters_of_all_torrents(
    #[values(standard(), dash_map(), skip_list())] repo: Repo,
    #[case] entries: Entries,
) {
    repo.insert_all(&entries);

    let mut expected = EntityMetrics::default();
    for (_, state) in &entries {
        expected += state.metrics();
    }

    let metrics = repo.get_metrics();

    assert_eq!(metrics, expected);
    assert_eq!(metrics.entities, entries.len() as u64);
}

#[rstest]
fn it_should_saturate_the_sums_instead_of_overflowing(#[values(standard(), dash_map(), skip_list())] repo: Repo) {
    repo.upsert(&an_info_hash(1), a_state(u64::MAX, u64::MAX, 1));
    repo.upsert(&an_info_hash(2), a_state(u64::MAX, u64::MAX, 1));

    let metrics = repo.get_metrics();

    assert_eq!(metrics.downloaded, u64::MAX);
    assert_eq!(metrics.uploaded_reported, u64::MAX);
}

#[rstest]
#[case::single(single())]
#[case::three(three())]
#[case::many(many())]
fn it_should_remove_a_torrent(#[values(standard(), dash_map(), skip_list())] repo: Repo, #[case] entries: Entries) {
    repo.insert_all(&entries);

    let (info_hash, state) = entries[0];

    assert_eq!(repo.remove(&info_hash), Some(state));
    assert_eq!(repo.get(&info_hash), None);
    assert_eq!(repo.len(), entries.len() - 1);
}

#[rstest]
fn it_should_remove_the_torrents_not_announced_since_the_cutoff(
    #[values(standard(), dash_map(), skip_list())] repo: Repo,
) {
    repo.insert_all(&three());

    let removed = repo.remove_inactive(Duration::from_secs(20));

    assert_eq!(removed, 1);
    assert_eq!(repo.get(&an_info_hash(1)), None);
    assert!(repo.get(&an_info_hash(2)).is_some());
    assert!(repo.get(&an_info_hash(3)).is_some());
}

#[rstest]
fn it_should_keep_every_torrent_when_none_is_inactive(#[values(standard(), dash_map(), skip_list())] repo: Repo) {
    repo.insert_all(&three());

    assert_eq!(repo.remove_inactive(Duration::from_secs(5)), 0);
    assert_eq!(repo.len(), 3);
}
