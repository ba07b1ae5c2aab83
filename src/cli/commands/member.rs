use crate::cli::commands::open_db;
use crate::cli::parser::{Commands, MemberAction};
use crate::config::Config;
use crate::core::crew::CrewLogic;
use crate::db::queries::{find_crew, list_members};
use crate::errors::AppResult;
use crate::models::shift::ShiftTimes;
use crate::ui::messages::{info, success};
use crate::utils::colors::{GREY, RESET};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Member { action } = cmd else {
        return Ok(());
    };

    let pool = open_db(cfg)?;
    let conn = &pool.conn;

    match action {
        MemberAction::Add {
            name,
            crew,
            role,
            hourly_rate,
            shift,
        } => {
            let crew = CrewLogic::find(conn, crew)?;
            let shift = shift.as_deref().map(ShiftTimes::parse).transpose()?;
            let m = CrewLogic::add_member(conn, crew.id, name, role.clone(), *hourly_rate, shift)?;
            success(format!(
                "Member '{}' added to crew '{}' (id {}).",
                m.name, crew.name, m.id
            ));
        }

        MemberAction::List { crew, all } => {
            let crew_id = match crew {
                Some(k) => Some(CrewLogic::find(conn, k)?.id),
                None => None,
            };
            let members = list_members(conn, crew_id, *all)?;
            if members.is_empty() {
                info("No members found.");
                return Ok(());
            }

            let default = cfg.default_shift()?;
            let mut table = Table::new(vec![
                Column::new("ID"),
                Column::new("NAME"),
                Column::new("ROLE"),
                Column::new("CREW"),
                Column::new("SHIFT"),
                Column::new("RATE"),
                Column::new("ACTIVE"),
            ]);

            for m in members {
                let crew_name = match m.crew_id {
                    Some(id) => find_crew(conn, id)?.map(|c| c.name).unwrap_or_default(),
                    None => String::new(),
                };
                let shift = CrewLogic::scheduled_shift(&m, default)?.display();
                let shift = if m.scheduled_start.is_none() && m.scheduled_end.is_none() {
                    format!("{GREY}{shift}{RESET}")
                } else {
                    shift
                };
                table.add_row(vec![
                    m.id.to_string(),
                    m.name.clone(),
                    m.role.clone().unwrap_or_else(|| "--".into()),
                    crew_name,
                    shift,
                    m.hourly_rate.map(|r| format!("{:.2}", r)).unwrap_or_else(|| "--".into()),
                    if m.active { "yes".into() } else { "no".into() },
                ]);
            }
            print!("{}", table.render(cfg.separator()));
        }

        MemberAction::Deactivate { id } => {
            let m = CrewLogic::deactivate_member(conn, *id)?;
            success(format!("Member '{}' deactivated.", m.name));
        }

        MemberAction::Schedule { id, shift, reset } => {
            let shift = if *reset {
                None
            } else {
                match shift {
                    Some(s) => Some(ShiftTimes::parse(s)?),
                    None => {
                        info("Nothing to do: pass --shift START-END or --reset.");
                        return Ok(());
                    }
                }
            };
            let m = CrewLogic::set_schedule(conn, *id, shift)?;
            match shift {
                Some(s) => success(format!("Schedule of '{}' set to {}.", m.name, s.display())),
                None => success(format!("Schedule of '{}' reset to the default.", m.name)),
            }
        }
    }

    Ok(())
}
