//! Conversions between clock timestamps and calendar dates, used to render
//! times in log lines.
use chrono::{DateTime, SecondsFormat, Utc};
use greedy_proxy_primitives::DurationSinceUnixEpoch;

/// It converts a timestamp to a `DateTime::<Utc>`.
///
/// Returns `None` when the timestamp cannot be represented as a calendar date
/// (around 262 thousand years after the epoch).
#[must_use]
pub fn convert_from_timestamp_to_datetime_utc(duration: DurationSinceUnixEpoch) -> Option<DateTime<Utc>> {
    let secs = i64::try_from(duration.as_secs()).ok()?;
    DateTime::from_timestamp(secs, duration.subsec_nanos())
}

/// It renders a timestamp in RFC 3339 format with second precision, for
/// example `1970-01-01T00:00:00Z`.
///
/// Out of range timestamps are rendered as the raw number of seconds.
#[must_use]
pub fn format_timestamp(duration: DurationSinceUnixEpoch) -> String {
    match convert_from_timestamp_to_datetime_utc(duration) {
        Some(datetime) => datetime.to_rfc3339_opts(SecondsFormat::Secs, true),
        None => format!("{}s", duration.as_secs()),
    }
}
