//! Day and minute arithmetic on review timestamps

use chrono::{DateTime, Duration, Utc};

use crate::error::{FsrsError, Result};

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Minutes in one day; learning steps at or above this graduate the card
pub const MINUTES_PER_DAY: i64 = 1440;

/// Shift `now` by whole minutes
///
/// Fails with `InvalidParameters` when the result leaves chrono's date range.
pub fn add_minutes(now: DateTime<Utc>, minutes: i64) -> Result<DateTime<Utc>> {
    Duration::try_minutes(minutes)
        .and_then(|offset| now.checked_add_signed(offset))
        .ok_or_else(|| out_of_range(now, minutes, "minutes"))
}

/// Shift `now` by whole days
///
/// Fails with `InvalidParameters` when the result leaves chrono's date range.
pub fn add_days(now: DateTime<Utc>, days: i64) -> Result<DateTime<Utc>> {
    Duration::try_days(days)
        .and_then(|offset| now.checked_add_signed(offset))
        .ok_or_else(|| out_of_range(now, days, "days"))
}

/// Whole days from `earlier` to `now`, floored (negative if `now` is earlier)
pub fn days_between(now: DateTime<Utc>, earlier: DateTime<Utc>) -> i64 {
    (now - earlier).num_milliseconds().div_euclid(MS_PER_DAY)
}

fn out_of_range(now: DateTime<Utc>, amount: i64, unit: &str) -> FsrsError {
    FsrsError::InvalidParameters(format!(
        "{} {} after {} is outside the supported date range",
        amount, unit, now
    ))
}
