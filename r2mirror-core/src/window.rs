//! Retention window arithmetic.

use crate::error::{MirrorError, MirrorResult};
use chrono::{DateTime, Duration, Utc};

/// Oldest modification time still inside a window of `days` ending at `now`.
///
/// Fails when the window reaches past the earliest representable timestamp.
pub fn cutoff(now: DateTime<Utc>, days: u32) -> MirrorResult<DateTime<Utc>> {
    Duration::try_days(i64::from(days))
        .and_then(|window| now.checked_sub_signed(window))
        .ok_or_else(|| {
            MirrorError::Config(format!("dias_ultimos={days} is beyond the supported date range"))
        })
}

/// Returns true if an object modified at `last_modified` should be copied.
///
/// The cutoff instant itself is inside the window.
pub fn is_within_window(last_modified: DateTime<Utc>, cutoff: DateTime<Utc>) -> bool {
    last_modified >= cutoff
}

/// Returns true if the window shrank since the previous run.
pub fn has_shrunk(previous_days: u32, current_days: u32) -> bool {
    current_days < previous_days
}
