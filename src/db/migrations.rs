use std::fs;
use std::path::Path;

use anyhow::Context;
use rusqlite::Connection;

/// Apply every `.sql` file under `dir` that has not been applied yet, in
/// filename order. Applied files are recorded in `_migrations` so reruns
/// are no-ops.
pub fn run_migrations(conn: &Connection, dir: &Path) -> anyhow::Result<usize> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _migrations (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )
    .context("failed to create migrations table")?;

    if !dir.exists() {
        tracing::warn!(dir = %dir.display(), "migrations directory not found, skipping");
        return Ok(0);
    }

    let mut files: Vec<_> = fs::read_dir(dir)
        .context("failed to read migrations directory")?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|ext| ext == "sql").unwrap_or(false))
        .collect();
    files.sort_by_key(|e| e.file_name());

    let mut applied = 0;
    for file in files {
        let name = file.file_name().to_string_lossy().to_string();

        let seen: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM _migrations WHERE name = ?1)",
                [&name],
                |row| row.get(0),
            )
            .context("failed to check migration status")?;
        if seen {
            continue;
        }

        let sql = fs::read_to_string(file.path())
            .with_context(|| format!("failed to read migration: {name}"))?;
        conn.execute_batch(&sql)
            .with_context(|| format!("failed to apply migration: {name}"))?;
        conn.execute("INSERT INTO _migrations (name) VALUES (?1)", [&name])
            .with_context(|| format!("failed to record migration: {name}"))?;

        tracing::info!(migration = %name, "applied");
        applied += 1;
    }

    Ok(applied)
}
