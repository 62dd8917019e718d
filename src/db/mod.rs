pub mod migrations;
pub mod queries;

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use rusqlite::Connection;

pub fn init_db(database_url: &str) -> anyhow::Result<Connection> {
    let conn = Connection::open(database_url)
        .with_context(|| format!("failed to open database at {database_url}"))?;

    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA foreign_keys = ON;",
    )
    .context("failed to set database pragmas")?;

    // Bounded wait when another connection holds the write lock; past this
    // SQLite reports busy and the operation surfaces as a contention error.
    conn.busy_timeout(Duration::from_secs(5))
        .context("failed to set busy timeout")?;

    let applied = migrations::run_migrations(&conn, Path::new("migrations"))?;
    if applied > 0 {
        tracing::info!(count = applied, "database migrations applied");
    }

    Ok(conn)
}
