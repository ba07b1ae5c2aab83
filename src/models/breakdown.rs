use chrono::NaiveTime;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakdownCategory {
    Working,
    Traveling,
    Standby,
    Setup,
    Cleanup,
    Break,
    Assessment,
}

impl BreakdownCategory {
    pub const ALL: [BreakdownCategory; 7] = [
        BreakdownCategory::Working,
        BreakdownCategory::Traveling,
        BreakdownCategory::Standby,
        BreakdownCategory::Setup,
        BreakdownCategory::Cleanup,
        BreakdownCategory::Break,
        BreakdownCategory::Assessment,
    ];

    pub fn to_db_str(&self) -> &'static str {
        match self {
            BreakdownCategory::Working => "working",
            BreakdownCategory::Traveling => "traveling",
            BreakdownCategory::Standby => "standby",
            BreakdownCategory::Setup => "setup",
            BreakdownCategory::Cleanup => "cleanup",
            BreakdownCategory::Break => "break",
            BreakdownCategory::Assessment => "assessment",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.to_db_str() == s)
    }

    /// CLI input, with the short aliases `work` and `travel`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "work" => Some(BreakdownCategory::Working),
            "travel" => Some(BreakdownCategory::Traveling),
            other => Self::from_db_str(other),
        }
    }
}

/// One categorized slice of a time entry.
#[derive(Debug, Clone, Serialize)]
pub struct BreakdownItem {
    pub id: i64,
    pub time_entry_id: i64,
    pub member_id: i64,
    pub category: BreakdownCategory,
    pub minutes: i64,
    pub description: String,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

impl BreakdownItem {
    /// Item not yet attached to an entry (`id = 0`, `time_entry_id = 0`).
    pub fn new(category: BreakdownCategory, minutes: i64) -> Self {
        Self {
            id: 0,
            time_entry_id: 0,
            member_id: 0,
            category,
            minutes,
            description: String::new(),
            start_time: None,
            end_time: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_times(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }
}
