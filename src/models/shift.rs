use crate::errors::{AppError, AppResult};
use crate::utils::time::{format_time, minutes_between, parse_time};
use chrono::NaiveTime;
use serde::Serialize;

/// A start/end pair on a single day. `end` is always later than `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShiftTimes {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl ShiftTimes {
    pub fn new(start: NaiveTime, end: NaiveTime) -> AppResult<Self> {
        if end <= start {
            return Err(AppError::InvalidTimeRange {
                start: format_time(start),
                end: format_time(end),
            });
        }
        Ok(Self { start, end })
    }

    /// Parse `HH:MM-HH:MM` (12h forms accepted on both sides).
    pub fn parse(s: &str) -> AppResult<Self> {
        let (a, b) = s
            .split_once('-')
            .ok_or_else(|| AppError::InvalidTime(format!("expected START-END, got '{}'", s)))?;
        let start = parse_time(a).ok_or_else(|| AppError::InvalidTime(a.trim().to_string()))?;
        let end = parse_time(b).ok_or_else(|| AppError::InvalidTime(b.trim().to_string()))?;
        Self::new(start, end)
    }

    pub fn duration_minutes(&self) -> i64 {
        minutes_between(self.start, self.end)
    }

    pub fn display(&self) -> String {
        format!("{} → {}", format_time(self.start), format_time(self.end))
    }
}
