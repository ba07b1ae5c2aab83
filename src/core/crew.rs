use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::queries::{
    find_crew, find_crew_by_name, find_member, insert_crew, insert_member, list_members,
    set_member_active, set_member_schedule,
};
use crate::errors::{AppError, AppResult};
use crate::models::crew::{Crew, CrewMember};
use crate::models::shift::ShiftTimes;
use chrono::NaiveTime;
use rusqlite::Connection;

/// Crew and member management.
pub struct CrewLogic;

impl CrewLogic {
    pub fn add_crew(conn: &Connection, name: &str) -> AppResult<Crew> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Other("crew name cannot be empty".into()));
        }
        if find_crew_by_name(conn, name)?.is_some() {
            return Err(AppError::Other(format!("crew '{}' already exists", name)));
        }

        let id = insert_crew(conn, name)?;
        ttlog(conn, "crew", &id.to_string(), &format!("Created crew '{}'", name))?;

        Ok(Crew {
            id,
            name: name.to_string(),
            active: true,
        })
    }

    /// Look a crew up by numeric id or by name.
    pub fn find(conn: &Connection, key: &str) -> AppResult<Crew> {
        let found = match key.trim().parse::<i64>() {
            Ok(id) => find_crew(conn, id)?,
            Err(_) => find_crew_by_name(conn, key.trim())?,
        };
        found.ok_or_else(|| AppError::CrewNotFound(key.to_string()))
    }

    pub fn add_member(
        conn: &Connection,
        crew_id: i64,
        name: &str,
        role: Option<String>,
        hourly_rate: Option<f64>,
        shift: Option<ShiftTimes>,
    ) -> AppResult<CrewMember> {
        let crew = find_crew(conn, crew_id)?
            .ok_or_else(|| AppError::CrewNotFound(crew_id.to_string()))?;

        if name.trim().is_empty() {
            return Err(AppError::Other("member name cannot be empty".into()));
        }
        if let Some(rate) = hourly_rate
            && (!rate.is_finite() || rate < 0.0)
        {
            return Err(AppError::Other(format!("invalid hourly rate {}", rate)));
        }

        let mut member = CrewMember {
            id: 0,
            name: name.trim().to_string(),
            role,
            hourly_rate,
            crew_id: Some(crew.id),
            active: true,
            scheduled_start: shift.map(|s| s.start),
            scheduled_end: shift.map(|s| s.end),
        };

        member.id = insert_member(conn, &member)?;
        ttlog(
            conn,
            "member",
            &member.id.to_string(),
            &format!("Added '{}' to crew '{}'", member.name, crew.name),
        )?;

        Ok(member)
    }

    pub fn member(conn: &Connection, id: i64) -> AppResult<CrewMember> {
        find_member(conn, id)?.ok_or_else(|| AppError::MemberNotFound(id.to_string()))
    }

    pub fn deactivate_member(conn: &Connection, id: i64) -> AppResult<CrewMember> {
        let member = Self::member(conn, id)?;
        set_member_active(conn, id, false)?;
        ttlog(
            conn,
            "member",
            &id.to_string(),
            &format!("Deactivated '{}'", member.name),
        )?;
        Ok(CrewMember {
            active: false,
            ..member
        })
    }

    /// Set (or clear, with `None`) a member's own scheduled shift.
    pub fn set_schedule(
        conn: &Connection,
        id: i64,
        shift: Option<ShiftTimes>,
    ) -> AppResult<CrewMember> {
        let member = Self::member(conn, id)?;
        set_member_schedule(conn, id, shift)?;

        let msg = match shift {
            Some(s) => format!("Schedule of '{}' set to {}", member.name, s.display()),
            None => format!("Schedule of '{}' reset to default", member.name),
        };
        ttlog(conn, "member", &id.to_string(), &msg)?;

        Ok(CrewMember {
            scheduled_start: shift.map(|s| s.start),
            scheduled_end: shift.map(|s| s.end),
            ..member
        })
    }

    /// Working crew: explicit `--crew`, else the crew of the configured
    /// logged-in member.
    pub fn resolve_crew(conn: &Connection, cfg: &Config, key: Option<&str>) -> AppResult<Crew> {
        if let Some(k) = key {
            return Self::find(conn, k);
        }

        let member_id = cfg.logged_in_member.ok_or(AppError::NoCrewSelected)?;
        let member = Self::member(conn, member_id)?;
        let crew_id = member.crew_id.ok_or(AppError::NoCrewSelected)?;

        find_crew(conn, crew_id)?.ok_or_else(|| AppError::CrewNotFound(crew_id.to_string()))
    }

    pub fn active_members(conn: &Connection, crew: &Crew) -> AppResult<Vec<CrewMember>> {
        list_members(conn, Some(crew.id), false)
    }

    /// The member's scheduled shift, falling back to the configured default.
    pub fn scheduled_shift(
        member: &CrewMember,
        default: (NaiveTime, NaiveTime),
    ) -> AppResult<ShiftTimes> {
        let start = member.scheduled_start.unwrap_or(default.0);
        let end = member.scheduled_end.unwrap_or(default.1);
        ShiftTimes::new(start, end)
    }
}
