//! The reporting mode selected for one announce.
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// How the proxy computes the reported `uploaded` value.
///
/// Selection precedence: an active cooldown always wins; otherwise a client
/// with nothing `left` is seeding, and everything else is downloading.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Default)]
pub enum ReportMode {
    /// The download is not finished. Uses the maximum multiplier.
    #[default]
    #[display("DOWNLOADING")]
    Downloading,
    /// The client reports zero bytes left. Uses the seeding multiplier.
    #[display("SEEDING")]
    Seeding,
    /// The global ratio went over the limit. Real values are reported.
    #[display("COOLDOWN")]
    Cooldown,
}

impl ReportMode {
    /// The mode for a client that is not in cooldown.
    #[must_use]
    pub fn for_remaining(left: crate::NumberOfBytes) -> Self {
        if left == 0 {
            Self::Seeding
        } else {
            Self::Downloading
        }
    }
}
