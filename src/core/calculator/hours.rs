//! Duration arithmetic for scheduled and actual shifts.

use crate::errors::{AppError, AppResult};
use crate::utils::time::{format_time, minutes_between};
use chrono::NaiveTime;

/// Minutes between `start` and `end`; `end` must be strictly later.
pub fn shift_minutes(start: NaiveTime, end: NaiveTime) -> AppResult<i64> {
    if end <= start {
        return Err(AppError::InvalidTimeRange {
            start: format_time(start),
            end: format_time(end),
        });
    }
    Ok(minutes_between(start, end))
}

/// Split worked minutes into (regular, overtime) against the standard day.
pub fn split_regular_overtime(worked: i64, standard_day: i64) -> (i64, i64) {
    let worked = worked.max(0);
    let regular = worked.min(standard_day.max(0));
    (regular, worked - regular)
}

/// Actual minus scheduled, positive when more was worked than planned.
pub fn scheduled_vs_actual(scheduled: i64, actual: i64) -> i64 {
    actual - scheduled
}
