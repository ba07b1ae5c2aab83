// src/export/model.rs

use crate::core::entries::EntryView;
use crate::utils::formatting::mins2hours_f64;
use serde::Serialize;

/// Flat row per time entry.
#[derive(Serialize, Clone, Debug)]
pub struct EntryExport {
    pub id: i64,
    pub date: String,
    pub crew: String,
    pub member: String,
    pub role: String,
    pub start_time: String,
    pub end_time: String,
    pub hours_total: f64,
    pub hours_regular: f64,
    pub hours_overtime: f64,
    pub hours_working: f64,
    pub hours_traveling: f64,
    pub hours_standby: f64,
    pub labor_cost: Option<f64>,
    pub location: String,
    pub comments: String,
    pub status: String,
    pub submitted_at: String,
    pub submitted_by: String,
}

/// Flat row per breakdown item (`--breakdown`).
#[derive(Serialize, Clone, Debug)]
pub struct BreakdownExport {
    pub entry_id: i64,
    pub date: String,
    pub crew: String,
    pub member: String,
    pub category: String,
    pub hours: f64,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
}

impl From<&EntryView> for EntryExport {
    fn from(v: &EntryView) -> Self {
        let e = &v.entry;
        Self {
            id: e.id,
            date: e.date_str(),
            crew: v.crew_name.clone(),
            member: v.member_name.clone(),
            role: v.member_role.clone().unwrap_or_default(),
            start_time: e.shift.start.format("%H:%M").to_string(),
            end_time: e.shift.end.format("%H:%M").to_string(),
            hours_total: mins2hours_f64(e.worked_minutes()),
            hours_regular: mins2hours_f64(e.regular_minutes),
            hours_overtime: mins2hours_f64(e.overtime_minutes),
            hours_working: mins2hours_f64(e.working_minutes),
            hours_traveling: mins2hours_f64(e.traveling_minutes),
            hours_standby: mins2hours_f64(e.standby_minutes),
            labor_cost: v.labor_cost().map(|c| (c * 100.0).round() / 100.0),
            location: e.location.clone(),
            comments: e.comments.clone(),
            status: e.status.to_db_str().to_string(),
            submitted_at: e.submitted_at.clone().unwrap_or_default(),
            submitted_by: e.submitted_by.clone().unwrap_or_default(),
        }
    }
}

pub(crate) fn breakdown_rows(v: &EntryView) -> Vec<BreakdownExport> {
    v.breakdown
        .iter()
        .map(|b| BreakdownExport {
            entry_id: v.entry.id,
            date: v.entry.date_str(),
            crew: v.crew_name.clone(),
            member: v.member_name.clone(),
            category: b.category.to_db_str().to_string(),
            hours: mins2hours_f64(b.minutes),
            description: b.description.clone(),
            start_time: b
                .start_time
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_default(),
            end_time: b
                .end_time
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_default(),
        })
        .collect()
}
