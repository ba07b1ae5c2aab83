use crate::cli::commands::{open_db, parse_day};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::crew::CrewLogic;
use crate::db::queries::find_entry;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::colors::{RESET, color_for_status};
use crate::utils::date::long_date;
use crate::utils::mins2hours;
use crate::utils::table::{Column, Table};

/// Show every active member's scheduled shift and, when one exists,
/// the recorded entry for that date.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Schedule { date, crew } = cmd {
        let date = parse_day(date)?;
        let pool = open_db(cfg)?;
        let crew = CrewLogic::resolve_crew(&pool.conn, cfg, crew.as_deref())?;
        let members = CrewLogic::active_members(&pool.conn, &crew)?;
        let default = cfg.default_shift()?;

        header(format!("{} · {}", crew.name, long_date(&date)));

        if members.is_empty() {
            info("The crew has no active members.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("ID"),
            Column::new("MEMBER"),
            Column::new("SCHEDULED"),
            Column::new("HOURS"),
            Column::new("RECORDED"),
            Column::new("STATUS"),
        ]);

        let mut recorded = 0;
        for m in &members {
            let scheduled = CrewLogic::scheduled_shift(m, default)?;
            let (actual, status) = match find_entry(&pool.conn, &date, crew.id, m.id)? {
                Some(e) => {
                    recorded += 1;
                    let s = e.status.to_db_str();
                    (
                        e.shift.display(),
                        format!("{}{}{}", color_for_status(s), s, RESET),
                    )
                }
                None => ("--".to_string(), "--".to_string()),
            };
            table.add_row(vec![
                m.id.to_string(),
                m.label(),
                scheduled.display(),
                mins2hours(scheduled.duration_minutes()),
                actual,
                status,
            ]);
        }

        print!("{}", table.render(cfg.separator()));

        if recorded == 0 {
            info("No hours recorded yet. Use `confirm` or `correct`.");
        }
    }

    Ok(())
}
