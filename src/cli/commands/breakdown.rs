use crate::cli::commands::{open_db, parse_day};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::breakdown::{BreakdownLogic, BreakdownTarget};
use crate::core::crew::CrewLogic;
use crate::errors::{AppError, AppResult};
use crate::models::breakdown::{BreakdownCategory, BreakdownItem};
use crate::models::shift::ShiftTimes;
use crate::ui::messages::{header, success};
use crate::utils::date::long_date;
use crate::utils::mins2hours;
use crate::utils::table::{Column, Table};
use crate::utils::time::parse_hours;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Breakdown {
        date,
        crew,
        member,
        group,
        working,
        traveling,
        standby,
        items,
        comments,
    } = cmd
    {
        let date = parse_day(date)?;

        let mut list = Vec::new();
        for (category, value) in [
            (BreakdownCategory::Working, working),
            (BreakdownCategory::Traveling, traveling),
            (BreakdownCategory::Standby, standby),
        ] {
            if let Some(v) = value {
                list.push(BreakdownItem::new(category, parse_hours(v)?));
            }
        }
        for raw in items {
            list.push(parse_item(raw)?);
        }

        if list.is_empty() {
            return Err(AppError::Other(
                "no hours given: use --working, --traveling, --standby or --item".into(),
            ));
        }

        let target = match member {
            Some(id) if !*group => BreakdownTarget::Member(*id),
            _ => BreakdownTarget::Group,
        };

        let mut pool = open_db(cfg)?;
        let crew = CrewLogic::resolve_crew(&pool.conn, cfg, crew.as_deref())?;

        let updated =
            BreakdownLogic::apply(&mut pool, &crew, date, target, &list, comments.as_deref())?;

        header(format!("{} · {}", crew.name, long_date(&date)));

        let mut table = Table::new(vec![
            Column::new("MEMBER"),
            Column::new("TOTAL"),
            Column::new("WORKING"),
            Column::new("TRAVELING"),
            Column::new("STANDBY"),
            Column::new("OTHER"),
            Column::new("UNCATEGORIZED"),
        ]);
        let categorized: i64 = list.iter().map(|i| i.minutes).sum();
        for (name, e) in &updated {
            let buckets = e.categorized_minutes();
            table.add_row(vec![
                name.clone(),
                mins2hours(e.worked_minutes()),
                mins2hours(e.working_minutes),
                mins2hours(e.traveling_minutes),
                mins2hours(e.standby_minutes),
                mins2hours(categorized - buckets),
                mins2hours(e.worked_minutes() - categorized),
            ]);
        }
        print!("{}", table.render(cfg.separator()));

        success(format!("Breakdown saved for {} entries.", updated.len()));
    }

    Ok(())
}

/// `CATEGORY=HOURS[,DESCRIPTION]` or `CATEGORY=START-END[,DESCRIPTION]`.
fn parse_item(raw: &str) -> AppResult<BreakdownItem> {
    let (code, rest) = raw
        .split_once('=')
        .ok_or_else(|| AppError::InvalidCategory(raw.to_string()))?;
    let category = BreakdownCategory::from_code(code.trim())
        .ok_or_else(|| AppError::InvalidCategory(code.trim().to_string()))?;

    let (value, description) = match rest.split_once(',') {
        Some((v, d)) => (v.trim(), Some(d.trim())),
        None => (rest.trim(), None),
    };

    let mut item = if value.contains('-') {
        let shift = ShiftTimes::parse(value)?;
        BreakdownItem::new(category, shift.duration_minutes()).with_times(shift.start, shift.end)
    } else {
        BreakdownItem::new(category, parse_hours(value)?)
    };

    if let Some(d) = description
        && !d.is_empty()
    {
        item = item.with_description(d);
    }

    Ok(item)
}
