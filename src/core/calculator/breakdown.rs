//! Categorized-hours validation.

use crate::errors::{AppError, AppResult};
use crate::models::breakdown::{BreakdownCategory, BreakdownItem};
use crate::utils::formatting::mins2hours;
use crate::utils::time::{format_time, minutes_between};

/// Check every item and the sum against `total` minutes.
///
/// - timed items need `end > start`; a timed item with `minutes == 0` takes
///   its length from the interval, otherwise both must agree
/// - the categorized sum may not exceed `total`
///
/// Returns the items with their minutes resolved.
pub fn validate_breakdown(
    member: &str,
    total: i64,
    items: &[BreakdownItem],
) -> AppResult<Vec<BreakdownItem>> {
    let mut resolved = Vec::with_capacity(items.len());

    for item in items {
        let mut it = item.clone();

        if it.minutes < 0 {
            return Err(AppError::InvalidHours(format!(
                "{} hours for {} cannot be negative",
                it.category.to_db_str(),
                member
            )));
        }

        match (it.start_time, it.end_time) {
            (Some(s), Some(e)) => {
                if e <= s {
                    return Err(AppError::InvalidTimeRange {
                        start: format_time(s),
                        end: format_time(e),
                    });
                }
                let span = minutes_between(s, e);
                if it.minutes == 0 {
                    it.minutes = span;
                } else if it.minutes != span {
                    return Err(AppError::InvalidHours(format!(
                        "{} is {} hours but {} → {} spans {} hours",
                        it.category.to_db_str(),
                        mins2hours(it.minutes),
                        format_time(s),
                        format_time(e),
                        mins2hours(span)
                    )));
                }
            }
            (None, None) => {}
            _ => {
                return Err(AppError::InvalidTime(format!(
                    "{} needs both a start and an end time",
                    it.category.to_db_str()
                )));
            }
        }

        resolved.push(it);
    }

    let exceeds = |categorized: String| AppError::BreakdownExceedsTotal {
        member: member.to_string(),
        categorized,
        total: mins2hours(total),
    };

    let categorized = resolved
        .iter()
        .try_fold(0i64, |acc, i| acc.checked_add(i.minutes))
        .ok_or_else(|| exceeds("overflow".to_string()))?;
    if categorized > total {
        return Err(exceeds(mins2hours(categorized)));
    }

    Ok(resolved)
}

/// Sum of the three mirrored buckets: (working, traveling, standby).
pub fn bucket_totals(items: &[BreakdownItem]) -> (i64, i64, i64) {
    items.iter().fold((0, 0, 0), |(w, t, s), i| match i.category {
        BreakdownCategory::Working => (w + i.minutes, t, s),
        BreakdownCategory::Traveling => (w, t + i.minutes, s),
        BreakdownCategory::Standby => (w, t, s + i.minutes),
        _ => (w, t, s),
    })
}
