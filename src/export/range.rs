// src/export/range.rs

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

fn bad(msg: &str, input: &str) -> AppError {
    AppError::InvalidDate(format!("{msg}: '{input}'"))
}

fn month_last_day(y: i32, m: u32) -> Option<u32> {
    let next = if m == 12 {
        NaiveDate::from_ymd_opt(y + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(y, m + 1, 1)?
    };
    next.pred_opt().map(|d| d.day())
}

/// First and last day covered by a single `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let p = p.trim();
    match p.len() {
        4 => {
            let y: i32 = p.parse().map_err(|_| bad("invalid year", p))?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| bad("invalid year", p))?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| bad("invalid year", p))?;
            Ok((d1, d2))
        }
        7 => {
            let d1 = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| bad("invalid month", p))?;
            let last = month_last_day(d1.year(), d1.month()).ok_or_else(|| bad("invalid month", p))?;
            let d2 = NaiveDate::from_ymd_opt(d1.year(), d1.month(), last)
                .ok_or_else(|| bad("invalid month", p))?;
            Ok((d1, d2))
        }
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| bad("invalid date", p))?;
            Ok((d, d))
        }
        _ => Err(bad("unsupported range format", p)),
    }
}

/// Parse a `--range` / `--period` expression.
///
/// Accepts:
/// - `all` → None (no bounds)
/// - YYYY, YYYY-MM, YYYY-MM-DD
/// - START:END with any of the forms above on each side (same format)
pub fn parse_range(r: &str) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    let r = r.trim();
    if r.eq_ignore_ascii_case("all") {
        return Ok(None);
    }

    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let (start, end) = (start_raw.trim(), end_raw.trim());
        if start.len() != end.len() {
            return Err(bad("start and end must have the same format", r));
        }

        let (d1, _) = period_bounds(start)?;
        let (_, d2) = period_bounds(end)?;
        if d2 < d1 {
            return Err(bad("range end is before its start", r));
        }
        return Ok(Some((d1, d2)));
    }

    period_bounds(r).map(Some)
}
