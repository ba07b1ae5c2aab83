//! Time utilities: parsing HH:MM (24h or 12h), durations, hour amounts.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

/// Parse a clock time. Accepts `HH:MM` (24h) and `H:MM AM|PM` (12h).
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    let t = t.trim();
    if let Ok(v) = NaiveTime::parse_from_str(t, "%H:%M") {
        return Some(v);
    }

    let upper = t.to_ascii_uppercase();
    NaiveTime::parse_from_str(&upper, "%I:%M %p")
        .or_else(|_| NaiveTime::parse_from_str(&upper, "%I:%M%p"))
        .ok()
}

pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    let duration = end - start;
    duration.num_minutes()
}

pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// Longest amount accepted for a single duration: one full day.
pub const MAX_DAY_MINUTES: i64 = 24 * 60;

/// Parse a duration like `8h`, `7h30m`, `45m` or `7:30` into minutes.
pub fn parse_duration_to_minutes(s: &str) -> Option<i64> {
    let s = s.trim().to_lowercase();
    if s.is_empty() {
        return None;
    }

    if let Some((h, m)) = s.split_once(':') {
        let h: i64 = h.parse().ok()?;
        let m: i64 = m.parse().ok()?;
        if !(0..60).contains(&m) || h < 0 {
            return None;
        }
        return h
            .checked_mul(60)
            .and_then(|v| v.checked_add(m))
            .filter(|v| *v <= MAX_DAY_MINUTES);
    }

    let mut total = 0i64;
    let mut digits = String::new();
    let mut seen_unit = false;

    for c in s.chars() {
        match c {
            '0'..='9' => digits.push(c),
            'h' => {
                let mins = digits.parse::<i64>().ok()?.checked_mul(60)?;
                total = total.checked_add(mins)?;
                digits.clear();
                seen_unit = true;
            }
            'm' => {
                total = total.checked_add(digits.parse::<i64>().ok()?)?;
                digits.clear();
                seen_unit = true;
            }
            _ => return None,
        }
    }

    if !digits.is_empty() || !seen_unit || total > MAX_DAY_MINUTES {
        return None;
    }

    Some(total)
}

/// Parse an hour amount entered by the user into whole minutes.
///
/// Accepts decimal hours (`1.5`, `0.25`, `,` as decimal separator too) and
/// the duration forms understood by [`parse_duration_to_minutes`], up to
/// [`MAX_DAY_MINUTES`].
pub fn parse_hours(s: &str) -> AppResult<i64> {
    let trimmed = s.trim();

    if let Some(m) = parse_duration_to_minutes(trimmed) {
        return Ok(m);
    }

    let normalized = trimmed.replace(',', ".");
    let hours: f64 = normalized
        .parse()
        .map_err(|_| AppError::InvalidHours(s.to_string()))?;

    if !hours.is_finite() || hours < 0.0 || hours * 60.0 > MAX_DAY_MINUTES as f64 {
        return Err(AppError::InvalidHours(s.to_string()));
    }

    Ok((hours * 60.0).round() as i64)
}
