use std::ops::AddAssign;

use crate::NumberOfBytes;

/// Aggregate counters over every tracked torrent.
///
/// The proxy derives the global ratio from these values: it's never stored on
/// its own.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct EntityMetrics {
    /// Number of tracked torrents.
    pub entities: u64,
    /// Sum of the last real `downloaded` values.
    pub downloaded: NumberOfBytes,
    /// Sum of the last real `uploaded` values sent by the client.
    pub uploaded_real: NumberOfBytes,
    /// Sum of the last `uploaded` values reported to the trackers.
    pub uploaded_reported: NumberOfBytes,
}

impl EntityMetrics {
    /// Global ratio: reported upload over real download. It's `0.0` when
    /// nothing has been downloaded yet.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f64 {
        if self.downloaded == 0 {
            return 0.0;
        }
        self.uploaded_reported as f64 / self.downloaded as f64
    }
}

impl AddAssign for EntityMetrics {
    fn add_assign(&mut self, rhs: Self) {
        self.entities = self.entities.saturating_add(rhs.entities);
        self.downloaded = self.downloaded.saturating_add(rhs.downloaded);
        self.uploaded_real = self.uploaded_real.saturating_add(rhs.uploaded_real);
        self.uploaded_reported = self.uploaded_reported.saturating_add(rhs.uploaded_reported);
    }
}
