use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::crew::CrewLogic;
use crate::core::entries::{EntriesLogic, EntryView};
use crate::errors::AppResult;
use crate::export::range::parse_range;
use crate::ui::messages::info;
use crate::utils::colors::{GREY, RESET, color_for_status, colorize_optional};
use crate::utils::date::current_month_bounds;
use crate::utils::formatting::bold;
use crate::utils::mins2hours;
use crate::utils::table::{Column, Table};
use crate::utils::time::format_time;

/// List recorded entries; the current month when no period is given.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        period,
        crew,
        member,
        details,
    } = cmd
    {
        let bounds = match period {
            Some(p) => parse_range(p)?,
            None => Some(current_month_bounds()),
        };

        let pool = open_db(cfg)?;
        let crew_id = match crew {
            Some(k) => Some(CrewLogic::find(&pool.conn, k)?.id),
            None => None,
        };

        let views = EntriesLogic::list(&pool.conn, bounds, crew_id, *member)?;
        if views.is_empty() {
            info("No entries found for the selected period.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("DATE"),
            Column::new("CREW"),
            Column::new("MEMBER"),
            Column::new("IN"),
            Column::new("OUT"),
            Column::new("TOTAL"),
            Column::new("REG"),
            Column::new("OT"),
            Column::new("WORK"),
            Column::new("TRAVEL"),
            Column::new("STANDBY"),
            Column::new("STATUS"),
        ]);

        let mut total = 0;
        for v in &views {
            let e = &v.entry;
            total += e.worked_minutes();
            let status = e.status.to_db_str();
            table.add_row(vec![
                e.date_str(),
                v.crew_name.clone(),
                v.member_name.clone(),
                format_time(e.shift.start),
                format_time(e.shift.end),
                mins2hours(e.worked_minutes()),
                mins2hours(e.regular_minutes),
                colorize_optional(&mins2hours(e.overtime_minutes)),
                colorize_optional(&mins2hours(e.working_minutes)),
                colorize_optional(&mins2hours(e.traveling_minutes)),
                colorize_optional(&mins2hours(e.standby_minutes)),
                format!("{}{}{}", color_for_status(status), status, RESET),
            ]);
        }

        print!("{}", table.render(cfg.separator()));
        println!(
            "{} entries, {} hours",
            views.len(),
            bold(&mins2hours(total))
        );

        if *details {
            for v in &views {
                print_details(v);
            }
        }
    }

    Ok(())
}

fn print_details(v: &EntryView) {
    println!(
        "\n{} · {} ({})",
        bold(&v.member_name),
        v.entry.date_str(),
        v.entry.shift.display()
    );

    if v.breakdown.is_empty() {
        println!("  {GREY}no breakdown{RESET}");
    }
    for item in &v.breakdown {
        let span = match (item.start_time, item.end_time) {
            (Some(s), Some(e)) => format!(" [{} → {}]", format_time(s), format_time(e)),
            _ => String::new(),
        };
        println!(
            "  {:<11} {:>6}h{} {}",
            item.category.to_db_str(),
            mins2hours(item.minutes),
            span,
            item.description
        );
    }

    if !v.entry.comments.is_empty() {
        println!("  💬 {}", v.entry.comments);
    }
    if let Some(by) = &v.entry.submitted_by {
        println!(
            "  submitted by {} at {}",
            by,
            v.entry.submitted_at.as_deref().unwrap_or("--")
        );
    }
    if let Some(cost) = v.labor_cost() {
        println!("  labor cost {:.2}", cost);
    }
}
