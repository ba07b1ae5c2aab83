//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// "+02h 25m", or "+02:25" when `short`.
pub fn mins2readable(mins: i64, want_sign: bool, short: bool) -> String {
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;

    let sign = if mins > 0 && want_sign {
        "+"
    } else if mins < 0 && want_sign {
        "-"
    } else {
        ""
    };

    if short {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

/// Minutes as decimal hours with two digits, e.g. 450 → "7.50".
pub fn mins2hours(mins: i64) -> String {
    format!("{:.2}", mins as f64 / 60.0)
}

/// Minutes as decimal hours for numeric export fields.
pub fn mins2hours_f64(mins: i64) -> f64 {
    (mins as f64 / 60.0 * 100.0).round() / 100.0
}
