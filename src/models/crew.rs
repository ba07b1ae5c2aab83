use chrono::NaiveTime;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Crew {
    pub id: i64,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CrewMember {
    pub id: i64,
    pub name: String,
    pub role: Option<String>,
    pub hourly_rate: Option<f64>,
    pub crew_id: Option<i64>,
    pub active: bool,
    pub scheduled_start: Option<NaiveTime>, // None → config default_shift_start
    pub scheduled_end: Option<NaiveTime>,   // None → config default_shift_end
}

impl CrewMember {
    /// "Name - Role" as shown in member pickers.
    pub fn label(&self) -> String {
        match &self.role {
            Some(r) if !r.is_empty() => format!("{} - {}", self.name, r),
            _ => self.name.clone(),
        }
    }
}
