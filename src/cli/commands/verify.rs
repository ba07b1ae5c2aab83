use crate::cli::commands::{actor_name, open_db, parse_day};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::crew::CrewLogic;
use crate::core::submit::EntryNotes;
use crate::core::verify::{ScheduleDecision, VerifyLogic, VerifyReport};
use crate::errors::{AppError, AppResult};
use crate::models::shift::ShiftTimes;
use crate::ui::messages::{header, info, success, warning};
use crate::utils::colors::{RESET, color_for_difference};
use crate::utils::date::long_date;
use crate::utils::table::{Column, Table};
use crate::utils::time::parse_time;
use crate::utils::{mins2hours, mins2readable};
use std::collections::BTreeMap;

/// Handle both `confirm` and `correct`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let (date, crew, decision, comments, location, submit) = match cmd {
        Commands::Confirm {
            date,
            crew,
            comments,
            location,
            submit,
        } => (
            date,
            crew,
            ScheduleDecision::Accept,
            comments,
            location,
            *submit,
        ),

        Commands::Correct {
            date,
            crew,
            start,
            end,
            members,
            comments,
            location,
            submit,
        } => {
            let decision = match (start, end) {
                (Some(s), Some(e)) => ScheduleDecision::Group(group_shift(s, e)?),
                _ if !members.is_empty() => ScheduleDecision::Individual(parse_individual(members)?),
                _ => {
                    return Err(AppError::Other(
                        "nothing to correct: pass --in/--out or at least one --member".into(),
                    ));
                }
            };
            (date, crew, decision, comments, location, *submit)
        }

        _ => return Ok(()),
    };

    let date = parse_day(date)?;
    let mut pool = open_db(cfg)?;
    let crew = CrewLogic::resolve_crew(&pool.conn, cfg, crew.as_deref())?;

    let submitter = if submit {
        Some(actor_name(&pool.conn, cfg, &None)?)
    } else {
        None
    };

    let notes = EntryNotes {
        comments: comments.as_deref(),
        location: location.as_deref(),
    };
    let report = VerifyLogic::apply(
        &mut pool,
        cfg,
        &crew,
        date,
        &decision,
        &notes,
        submitter.as_deref(),
    )?;

    header(format!("{} · {}", crew.name, long_date(&date)));
    print_report(&report, cfg);

    success(format!(
        "{} entries recorded ({} new, {} updated).",
        report.created + report.updated,
        report.created,
        report.updated
    ));
    if report.locked > 0 {
        info(format!(
            "{} approved entries already matched and were left unchanged.",
            report.locked
        ));
    }
    for name in &report.breakdown_cleared {
        warning(format!(
            "Breakdown of {} exceeded the new total and was cleared.",
            name
        ));
    }
    if let Some(by) = submitter {
        success(format!("{} entries submitted by {}.", report.submitted, by));
    }

    Ok(())
}

fn group_shift(start: &str, end: &str) -> AppResult<ShiftTimes> {
    let s = parse_time(start).ok_or_else(|| AppError::InvalidTime(start.to_string()))?;
    let e = parse_time(end).ok_or_else(|| AppError::InvalidTime(end.to_string()))?;
    ShiftTimes::new(s, e)
}

/// `ID=START-END` pairs, e.g. `3=08:30-16:00`.
fn parse_individual(values: &[String]) -> AppResult<BTreeMap<i64, ShiftTimes>> {
    let mut map = BTreeMap::new();

    for v in values {
        let (id, range) = v
            .split_once('=')
            .ok_or_else(|| AppError::Other(format!("expected ID=START-END, got '{}'", v)))?;
        let id: i64 = id
            .trim()
            .parse()
            .map_err(|_| AppError::MemberNotFound(id.trim().to_string()))?;

        if map.insert(id, ShiftTimes::parse(range)?).is_some() {
            return Err(AppError::Other(format!("member {} corrected twice", id)));
        }
    }

    Ok(map)
}

fn print_report(report: &VerifyReport, cfg: &Config) {
    let mut table = Table::new(vec![
        Column::new("MEMBER"),
        Column::new("SCHEDULED"),
        Column::new("ACTUAL"),
        Column::new("HOURS"),
        Column::new("DIFF"),
    ]);

    for s in &report.shifts {
        let diff = format!(
            "{}{}{}",
            color_for_difference(s.difference),
            mins2readable(s.difference, true, true),
            RESET
        );
        table.add_row(vec![
            s.member.label(),
            s.scheduled.display(),
            s.actual.display(),
            mins2hours(s.worked_minutes),
            diff,
        ]);
    }

    print!("{}", table.render(cfg.separator()));
}
