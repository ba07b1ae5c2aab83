use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Accepts `YYYY-MM-DD`, `today` and `yesterday`.
pub fn parse_date_arg(s: &str) -> Option<NaiveDate> {
    match s.trim().to_lowercase().as_str() {
        "today" => Some(today()),
        "yesterday" => today().pred_opt(),
        _ => parse_date(s),
    }
}

/// Long human form, e.g. "Monday, September 1, 2025".
pub fn long_date(d: &NaiveDate) -> String {
    format!(
        "{}, {} {}, {}",
        d.format("%A"),
        d.format("%B"),
        d.day(),
        d.year()
    )
}

pub fn current_month_bounds() -> (NaiveDate, NaiveDate) {
    let t = today();
    let first = t.with_day(1).unwrap_or(t);
    let next_month = if t.month() == 12 {
        NaiveDate::from_ymd_opt(t.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(t.year(), t.month() + 1, 1)
    };
    let last = next_month.and_then(|d| d.pred_opt()).unwrap_or(t);
    (first, last)
}
