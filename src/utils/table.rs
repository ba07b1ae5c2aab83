//! Table rendering utilities for CLI outputs.

use regex::Regex;
use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub width: usize,
}

impl Column {
    pub fn new(header: &str) -> Self {
        Self {
            header: header.to_string(),
            width: UnicodeWidthStr::width(header),
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

/// Printable width of a cell, ignoring ANSI colour sequences.
pub fn visible_width(s: &str) -> usize {
    let re = Regex::new(r"\x1B\[[0-9;]*[mK]").expect("static regex");
    UnicodeWidthStr::width(re.replace_all(s, "").as_ref())
}

fn pad(s: &str, width: usize) -> String {
    let w = visible_width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Add a row; column widths grow to fit.
    pub fn add_row(&mut self, row: Vec<String>) {
        for (i, cell) in row.iter().enumerate() {
            if let Some(col) = self.columns.get_mut(i) {
                col.width = col.width.max(visible_width(cell));
            }
        }
        self.rows.push(row);
    }

    pub fn render(&self, separator: char) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            out.push_str(&pad(&col.header, col.width));
            out.push(' ');
        }
        out.push('\n');

        let total: usize = self.columns.iter().map(|c| c.width + 1).sum();
        out.push_str(&separator.to_string().repeat(total));
        out.push('\n');

        // Rows
        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                out.push_str(&pad(cell, col.width));
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }
}
