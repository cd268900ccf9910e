//! Fuzz range for review intervals
//!
//! Intervals of 2.5 days and up are spread over a window that widens with
//! the interval, so cards learned together do not stay clumped together.

use serde::{Deserialize, Serialize};

/// Window widening per interval band: (band start, band end, days added per day)
const FUZZ_RANGES: [(f64, f64, f64); 3] = [
    (2.5, 7.0, 0.15),
    (7.0, 20.0, 0.1),
    (20.0, f64::INFINITY, 0.05),
];

/// Inclusive bounds a fuzzed interval is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzRange {
    /// Smallest interval
    pub min_ivl: i64,
    /// Largest interval
    pub max_ivl: i64,
}

/// Window for `interval`, never below 2 days, never above `maximum_interval`
///
/// When the interval exceeds `elapsed_days` the window starts after the time
/// already elapsed, so a review never schedules into the past.
pub fn fuzz_range(interval: f64, elapsed_days: i64, maximum_interval: i64) -> FuzzRange {
    let mut delta = 1.0;
    for (start, end, factor) in FUZZ_RANGES {
        delta += factor * (interval.min(end) - start).max(0.0);
    }

    let interval = interval.min(maximum_interval as f64);
    let mut min_ivl = 2.max((interval - delta).round() as i64);
    let max_ivl = ((interval + delta).round() as i64).min(maximum_interval);
    if interval > elapsed_days as f64 {
        min_ivl = min_ivl.max(elapsed_days + 1);
    }
    min_ivl = min_ivl.min(max_ivl);

    FuzzRange { min_ivl, max_ivl }
}
