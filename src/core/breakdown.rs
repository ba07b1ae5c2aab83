use crate::core::calculator::breakdown::{bucket_totals, validate_breakdown};
use crate::core::crew::CrewLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{load_entries_for_day, replace_breakdown, update_entry};
use crate::errors::{AppError, AppResult};
use crate::models::breakdown::BreakdownItem;
use crate::models::crew::Crew;
use crate::models::time_entry::TimeEntry;
use chrono::{Local, NaiveDate};

/// Whose entries get categorized.
#[derive(Debug, Clone, Copy)]
pub enum BreakdownTarget {
    Member(i64),
    /// Same buckets for every entry of the crew on that date.
    Group,
}

/// High-level business logic for the `breakdown` command.
pub struct BreakdownLogic;

impl BreakdownLogic {
    /// Validate `items` against every targeted entry, then replace their
    /// breakdown. Nothing is written if any entry fails validation.
    pub fn apply(
        pool: &mut DbPool,
        crew: &Crew,
        date: NaiveDate,
        target: BreakdownTarget,
        items: &[BreakdownItem],
        comments: Option<&str>,
    ) -> AppResult<Vec<(String, TimeEntry)>> {
        let tx = pool.conn.transaction()?;

        let day = load_entries_for_day(&tx, &date, crew.id)?;
        if day.is_empty() {
            return Err(AppError::NoEntriesForDate(format!(
                "{} (crew '{}')",
                date, crew.name
            )));
        }

        let selected: Vec<TimeEntry> = match target {
            BreakdownTarget::Group => day,
            BreakdownTarget::Member(id) => {
                let member = CrewLogic::member(&tx, id)?;
                let found: Vec<TimeEntry> = day.into_iter().filter(|e| e.member_id == id).collect();
                if found.is_empty() {
                    return Err(AppError::NoEntriesForDate(format!(
                        "{} (member '{}')",
                        date, member.name
                    )));
                }
                found
            }
        };

        let mut out = Vec::with_capacity(selected.len());

        for mut entry in selected {
            let member = CrewLogic::member(&tx, entry.member_id)?;

            if entry.status.is_locked() {
                return Err(AppError::EntryLocked {
                    member: member.name,
                    date: entry.date_str(),
                });
            }

            let resolved = validate_breakdown(&member.name, entry.worked_minutes(), items)?;
            replace_breakdown(&tx, entry.id, member.id, &resolved)?;

            let (working, traveling, standby) = bucket_totals(&resolved);
            entry.working_minutes = working;
            entry.traveling_minutes = traveling;
            entry.standby_minutes = standby;
            if let Some(c) = comments {
                entry.comments = c.to_string();
            }
            entry.updated_at = Local::now().to_rfc3339();
            update_entry(&tx, &entry)?;

            out.push((member.name, entry));
        }

        let scope = match target {
            BreakdownTarget::Group => "group".to_string(),
            BreakdownTarget::Member(id) => format!("member {}", id),
        };
        ttlog(
            &tx,
            "breakdown",
            &format!("{} crew {}", date, crew.id),
            &format!("{} categorized into {} items ({} entries)", scope, items.len(), out.len()),
        )?;

        tx.commit()?;
        Ok(out)
    }
}
