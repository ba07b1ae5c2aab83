use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Prepare a connection for use: foreign keys on (cascading breakdown
/// deletes depend on it), then every pending schema migration.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    run_pending_migrations(conn)
}
