use super::entry_status::EntryStatus;
use super::shift::ShiftTimes;
use chrono::{Local, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TimeEntry {
    pub id: i64,
    pub date: NaiveDate,       // ⇔ time_entries.date (TEXT "YYYY-MM-DD")
    pub crew_id: i64,          // ⇔ time_entries.crew_id
    pub member_id: i64,        // ⇔ time_entries.member_id
    pub shift: ShiftTimes,     // ⇔ start_time / end_time (TEXT "HH:MM")
    pub regular_minutes: i64,  // ⇔ regular_minutes
    pub overtime_minutes: i64, // ⇔ overtime_minutes
    pub working_minutes: i64,
    pub traveling_minutes: i64,
    pub standby_minutes: i64,
    pub location: String,
    pub comments: String,
    pub status: EntryStatus,
    pub submitted_at: Option<String>, // RFC3339
    pub submitted_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TimeEntry {
    /// New draft entry. `id = 0` until inserted.
    pub fn new(
        date: NaiveDate,
        crew_id: i64,
        member_id: i64,
        shift: ShiftTimes,
        regular_minutes: i64,
        overtime_minutes: i64,
    ) -> Self {
        let now = Local::now().to_rfc3339();
        Self {
            id: 0,
            date,
            crew_id,
            member_id,
            shift,
            regular_minutes,
            overtime_minutes,
            working_minutes: 0,
            traveling_minutes: 0,
            standby_minutes: 0,
            location: String::new(),
            comments: String::new(),
            status: EntryStatus::Draft,
            submitted_at: None,
            submitted_by: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn worked_minutes(&self) -> i64 {
        self.regular_minutes + self.overtime_minutes
    }

    pub fn categorized_minutes(&self) -> i64 {
        self.working_minutes + self.traveling_minutes + self.standby_minutes
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
