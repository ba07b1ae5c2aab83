/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Difference from schedule:
/// \>0 → green (more than scheduled)
/// \<0 → red
/// 0 → reset
pub fn color_for_difference(value: i64) -> &'static str {
    if value > 0 {
        GREEN
    } else if value < 0 {
        RED
    } else {
        RESET
    }
}

/// Status colour used by `list`.
pub fn color_for_status(status: &str) -> &'static str {
    match status {
        "draft" => GREY,
        "submitted" => BLUE,
        "approved" => GREEN,
        "rejected" => RED,
        _ => RESET,
    }
}

/// Grey out empty placeholders.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" || value.trim() == "0.00" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
