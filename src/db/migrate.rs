use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ordered list of schema migrations. Each one is applied once and recorded
/// in the `log` table as `migration_applied`.
const MIGRATIONS: &[(&str, &str, &str)] = &[
    (
        "20250301_0001_base_schema",
        "Created crews, crew_members, time_entries and hours_breakdown tables",
        r#"
        CREATE TABLE IF NOT EXISTS crews (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            crew_name   TEXT NOT NULL UNIQUE,
            active      INTEGER NOT NULL DEFAULT 1,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS crew_members (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            name            TEXT NOT NULL,
            role            TEXT,
            hourly_rate     REAL,
            crew_id         INTEGER REFERENCES crews(id) ON DELETE SET NULL,
            active          INTEGER NOT NULL DEFAULT 1,
            scheduled_start TEXT,
            scheduled_end   TEXT
        );

        CREATE TABLE IF NOT EXISTS time_entries (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            date              TEXT NOT NULL,
            crew_id           INTEGER NOT NULL REFERENCES crews(id),
            member_id         INTEGER NOT NULL REFERENCES crew_members(id),
            start_time        TEXT NOT NULL,
            end_time          TEXT NOT NULL,
            regular_minutes   INTEGER NOT NULL DEFAULT 0,
            overtime_minutes  INTEGER NOT NULL DEFAULT 0,
            working_minutes   INTEGER NOT NULL DEFAULT 0,
            traveling_minutes INTEGER NOT NULL DEFAULT 0,
            standby_minutes   INTEGER NOT NULL DEFAULT 0,
            location          TEXT NOT NULL DEFAULT '',
            comments          TEXT NOT NULL DEFAULT '',
            status            TEXT NOT NULL DEFAULT 'draft'
                              CHECK(status IN ('draft','submitted','approved','rejected')),
            submitted_at      TEXT,
            submitted_by      TEXT,
            created_at        TEXT NOT NULL,
            updated_at        TEXT NOT NULL,
            UNIQUE(date, crew_id, member_id)
        );

        CREATE TABLE IF NOT EXISTS hours_breakdown (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            time_entry_id   INTEGER NOT NULL REFERENCES time_entries(id) ON DELETE CASCADE,
            member_id       INTEGER NOT NULL REFERENCES crew_members(id),
            breakdown_type  TEXT NOT NULL,
            minutes         INTEGER NOT NULL CHECK(minutes >= 0),
            description     TEXT NOT NULL DEFAULT '',
            start_time      TEXT,
            end_time        TEXT
        );
        "#,
    ),
    (
        "20250412_0002_lookup_indexes",
        "Added lookup indexes on time_entries and hours_breakdown",
        r#"
        CREATE INDEX IF NOT EXISTS idx_time_entries_date_crew ON time_entries(date, crew_id);
        CREATE INDEX IF NOT EXISTS idx_time_entries_member ON time_entries(member_id);
        CREATE INDEX IF NOT EXISTS idx_breakdown_entry ON hours_breakdown(time_entry_id);
        CREATE INDEX IF NOT EXISTS idx_crew_members_crew ON crew_members(crew_id);
        "#,
    ),
];

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply_migration(conn: &Connection, version: &str, message: &str, sql: &str) -> AppResult<()> {
    conn.execute_batch(&format!("BEGIN;\n{sql}\nCOMMIT;"))
        .map_err(|e| {
            let _ = conn.execute_batch("ROLLBACK;");
            AppError::Migration(format!("{}: {}", version, e))
        })?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;

    success(format!("Migration applied: {} → {}", version, message));
    Ok(())
}

/// Versions not yet recorded in the log table.
pub fn pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut out = Vec::new();
    for (version, _, _) in MIGRATIONS {
        if !is_applied(conn, version)? {
            out.push(*version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
///
/// Called by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    for (version, message, sql) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }
        apply_migration(conn, version, message, sql)?;
    }

    Ok(())
}
