use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_entry, find_crew, find_member, load_breakdown, load_entries_for_day,
    load_entries_in_range,
};
use crate::errors::{AppError, AppResult};
use crate::models::breakdown::BreakdownItem;
use crate::models::crew::Crew;
use crate::models::time_entry::TimeEntry;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::collections::HashMap;

/// A time entry joined with its crew, member and breakdown.
#[derive(Debug, Clone)]
pub struct EntryView {
    pub entry: TimeEntry,
    pub crew_name: String,
    pub member_name: String,
    pub member_role: Option<String>,
    pub hourly_rate: Option<f64>,
    pub breakdown: Vec<BreakdownItem>,
}

impl EntryView {
    /// Pay for the day at the member's hourly rate, if one is set.
    pub fn labor_cost(&self) -> Option<f64> {
        self.hourly_rate
            .map(|r| r * self.entry.worked_minutes() as f64 / 60.0)
    }
}

pub struct EntriesLogic;

impl EntriesLogic {
    pub fn list(
        conn: &Connection,
        bounds: Option<(NaiveDate, NaiveDate)>,
        crew_id: Option<i64>,
        member_id: Option<i64>,
    ) -> AppResult<Vec<EntryView>> {
        let entries = load_entries_in_range(conn, bounds, crew_id, member_id)?;

        let mut crews: HashMap<i64, String> = HashMap::new();
        let mut out = Vec::with_capacity(entries.len());

        for entry in entries {
            if !crews.contains_key(&entry.crew_id) {
                let name = find_crew(conn, entry.crew_id)?
                    .map(|c| c.name)
                    .unwrap_or_else(|| "Unknown Crew".to_string());
                crews.insert(entry.crew_id, name);
            }
            let crew_name = crews.get(&entry.crew_id).cloned().unwrap_or_default();

            let member = find_member(conn, entry.member_id)?;
            let (member_name, member_role, hourly_rate) = match member {
                Some(m) => (m.name, m.role, m.hourly_rate),
                None => ("Unknown Member".to_string(), None, None),
            };

            let breakdown = load_breakdown(conn, entry.id)?;

            out.push(EntryView {
                entry,
                crew_name,
                member_name,
                member_role,
                hourly_rate,
                breakdown,
            });
        }

        Ok(out)
    }

    /// Delete the crew's entries on `date`, or only `member`'s.
    /// Approved entries are never deleted.
    pub fn delete(
        pool: &mut DbPool,
        crew: &Crew,
        date: NaiveDate,
        member: Option<i64>,
    ) -> AppResult<usize> {
        let tx = pool.conn.transaction()?;

        let entries: Vec<TimeEntry> = load_entries_for_day(&tx, &date, crew.id)?
            .into_iter()
            .filter(|e| member.is_none_or(|id| e.member_id == id))
            .collect();

        if entries.is_empty() {
            return Err(AppError::NoEntriesForDate(format!(
                "{} (crew '{}')",
                date, crew.name
            )));
        }

        for e in &entries {
            if e.status.is_locked() {
                let name = find_member(&tx, e.member_id)?
                    .map(|m| m.name)
                    .unwrap_or_else(|| e.member_id.to_string());
                return Err(AppError::EntryLocked {
                    member: name,
                    date: e.date_str(),
                });
            }
            delete_entry(&tx, e.id)?;
        }

        ttlog(
            &tx,
            "del",
            &format!("{} crew {}", date, crew.id),
            &format!("Deleted {} entries", entries.len()),
        )?;

        tx.commit()?;
        Ok(entries.len())
    }
}
