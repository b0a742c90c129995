//! Wall-clock helpers for the time-based claims

use std::time::{SystemTime, UNIX_EPOCH};

/// Current Unix time in seconds.
///
/// Read fresh on every call. A clock set before the epoch reads as 0.
pub(crate) fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// Add a clock skew to a timestamp, saturating instead of overflowing
pub(crate) fn apply_clock_skew(timestamp: i64, skew_seconds: u64) -> i64 {
    timestamp.saturating_add(i64::try_from(skew_seconds).unwrap_or(i64::MAX))
}
