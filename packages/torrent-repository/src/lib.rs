//! In-memory state of the torrents seen by the proxy.
//!
//! Each torrent is identified by its [`InfoHash`](greedy_proxy_primitives::info_hash::InfoHash)
//! and holds the last counters announced by the client together with the
//! last `uploaded` value the proxy reported for it. See [`EntityState`].
//!
//! There are several interchangeable [`Repository`](repository::Repository)
//! implementations. The proxy uses [`Torrents`].
use repository::dash_map::XacrimonDashMap;
use repository::rw_lock_std::RwLockStd;
use repository::skip_map::CrossbeamSkipList;

pub mod entry;
pub mod repository;

pub use entry::EntityState;

// Repos

pub type TorrentsRwLockStd = RwLockStd<EntityState>;
pub type TorrentsDashMap = XacrimonDashMap<EntityState>;
pub type TorrentsSkipMap = CrossbeamSkipList<EntityState>;

/// The repository used by the proxy.
pub type Torrents = TorrentsSkipMap;
