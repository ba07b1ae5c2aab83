//! Schedule confirmation / time correction flow.
//!
//! For a crew and a date the operator either accepts the scheduled hours
//! of every active member, applies one corrected start/end to the whole
//! group, or corrects single members (everybody else keeps the times
//! already recorded, or the schedule when nothing is recorded yet).
//! The outcome is written through [`crate::core::submit::upsert_entry`].

use crate::config::Config;
use crate::core::calculator::hours::scheduled_vs_actual;
use crate::core::crew::CrewLogic;
use crate::core::submit::{EntryNotes, submit_day, upsert_entry};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::find_entry;
use crate::errors::{AppError, AppResult};
use crate::models::crew::{Crew, CrewMember};
use crate::models::shift::ShiftTimes;
use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub enum ScheduleDecision {
    /// Everyone worked their scheduled hours.
    Accept,
    /// One start/end applied to every member.
    Group(ShiftTimes),
    /// Per-member corrections keyed by member id.
    Individual(BTreeMap<i64, ShiftTimes>),
}

impl ScheduleDecision {
    pub fn operation(&self) -> &'static str {
        match self {
            ScheduleDecision::Accept => "confirm",
            ScheduleDecision::Group(_) | ScheduleDecision::Individual(_) => "correct",
        }
    }
}

/// Scheduled and actual shift of one member for the day.
#[derive(Debug, Clone)]
pub struct ReconciledShift {
    pub member: CrewMember,
    pub scheduled: ShiftTimes,
    pub actual: ShiftTimes,
    pub worked_minutes: i64,
    pub difference: i64,
}

#[derive(Debug, Default)]
pub struct VerifyReport {
    pub shifts: Vec<ReconciledShift>,
    pub created: usize,
    pub updated: usize,
    /// Approved entries that already matched and were left untouched.
    pub locked: usize,
    pub breakdown_cleared: Vec<String>,
    pub submitted: usize,
}

pub struct VerifyLogic;

impl VerifyLogic {
    /// Compute the actual shift of every active member.
    pub fn resolve(
        crew: &Crew,
        members: &[CrewMember],
        decision: &ScheduleDecision,
        default_shift: (NaiveTime, NaiveTime),
    ) -> AppResult<Vec<ReconciledShift>> {
        let active: Vec<&CrewMember> = members.iter().filter(|m| m.active).collect();
        if active.is_empty() {
            return Err(AppError::EmptyCrew(crew.name.clone()));
        }

        if let ScheduleDecision::Individual(map) = decision {
            for id in map.keys() {
                if !active.iter().any(|m| m.id == *id) {
                    return Err(AppError::MemberNotFound(format!(
                        "{} is not an active member of crew '{}'",
                        id, crew.name
                    )));
                }
            }
        }

        let mut out = Vec::with_capacity(active.len());
        for m in active {
            let scheduled = CrewLogic::scheduled_shift(m, default_shift)?;
            let actual = match decision {
                ScheduleDecision::Accept => scheduled,
                ScheduleDecision::Group(s) => *s,
                ScheduleDecision::Individual(map) => map.get(&m.id).copied().unwrap_or(scheduled),
            };

            let worked = actual.duration_minutes();
            out.push(ReconciledShift {
                member: m.clone(),
                scheduled,
                actual,
                worked_minutes: worked,
                difference: scheduled_vs_actual(scheduled.duration_minutes(), worked),
            });
        }

        Ok(out)
    }

    /// Resolve and persist in one transaction. With `submit_as`, the day is
    /// submitted right after the entries are written.
    pub fn apply(
        pool: &mut DbPool,
        cfg: &Config,
        crew: &Crew,
        date: NaiveDate,
        decision: &ScheduleDecision,
        notes: &EntryNotes,
        submit_as: Option<&str>,
    ) -> AppResult<VerifyReport> {
        let default_shift = cfg.default_shift()?;
        let standard_day = cfg.standard_day_minutes()?;

        let tx = pool.conn.transaction()?;

        let members = CrewLogic::active_members(&tx, crew)?;
        let mut shifts = Self::resolve(crew, &members, decision, default_shift)?;

        // Individual corrections leave members that are not named, and
        // already recorded, on their stored times.
        if let ScheduleDecision::Individual(map) = decision {
            for s in shifts.iter_mut().filter(|s| !map.contains_key(&s.member.id)) {
                if let Some(existing) = find_entry(&tx, &date, crew.id, s.member.id)? {
                    s.actual = existing.shift;
                    s.worked_minutes = existing.shift.duration_minutes();
                    s.difference = scheduled_vs_actual(
                        s.scheduled.duration_minutes(),
                        s.worked_minutes,
                    );
                }
            }
        }

        let mut report = VerifyReport::default();

        for s in &shifts {
            let outcome = upsert_entry(
                &tx,
                date,
                crew.id,
                &s.member,
                s.actual,
                standard_day,
                notes,
            )?;

            if outcome.kept_locked {
                report.locked += 1;
            } else if outcome.created {
                report.created += 1;
            } else {
                report.updated += 1;
            }
            if outcome.breakdown_cleared {
                report.breakdown_cleared.push(s.member.name.clone());
            }
        }

        let op = decision.operation();
        let message = match decision {
            ScheduleDecision::Accept => format!("Scheduled hours confirmed for {} members", shifts.len()),
            ScheduleDecision::Group(s) => format!("Group hours set to {}", s.display()),
            ScheduleDecision::Individual(map) => {
                format!("Individual hours corrected for {} members", map.len())
            }
        };
        ttlog(&tx, op, &format!("{} crew {}", date, crew.id), &message)?;

        if let Some(by) = submit_as {
            report.submitted = submit_day(&tx, &date, crew.id, by)?;
            ttlog(
                &tx,
                "submit",
                &format!("{} crew {}", date, crew.id),
                &format!("{} entries submitted by {}", report.submitted, by),
            )?;
        }

        tx.commit()?;

        report.shifts = shifts;
        Ok(report)
    }
}
