//! Embedded database migrations
//!
//! Two layers bring a database file to the current schema no matter which
//! app version created it. Tracked CREATE TABLE migrations cover fresh
//! databases; the additive column list covers databases from before the
//! tracking table existed, where "duplicate column name" simply means the
//! column is already there.

use rusqlite::Connection;

use crate::db::DbPool;
use crate::error::Result;

/// All migrations in order, each as (filename, sql_content)
pub const MIGRATIONS: &[(&str, &str)] = &[
    (
        "001_create_exercises.sql",
        include_str!("../migrations/001_create_exercises.sql"),
    ),
    (
        "002_create_workouts.sql",
        include_str!("../migrations/002_create_workouts.sql"),
    ),
    (
        "003_create_workout_exercises.sql",
        include_str!("../migrations/003_create_workout_exercises.sql"),
    ),
    (
        "004_create_records.sql",
        include_str!("../migrations/004_create_records.sql"),
    ),
    (
        "005_create_user_profile.sql",
        include_str!("../migrations/005_create_user_profile.sql"),
    ),
];

/// Columns added after the original schema shipped, as
/// (table, column, ddl). Applied on every startup.
const ADDITIVE_COLUMNS: &[(&str, &str, &str)] = &[
    (
        "exercises",
        "is_custom",
        "ALTER TABLE exercises ADD COLUMN is_custom INTEGER NOT NULL DEFAULT 0",
    ),
    (
        "exercises",
        "is_isolation",
        "ALTER TABLE exercises ADD COLUMN is_isolation INTEGER NOT NULL DEFAULT 0",
    ),
    (
        "records",
        "left_reps",
        "ALTER TABLE records ADD COLUMN left_reps INTEGER",
    ),
    (
        "records",
        "right_reps",
        "ALTER TABLE records ADD COLUMN right_reps INTEGER",
    ),
    (
        "workout_exercises",
        "exercise_order",
        "ALTER TABLE workout_exercises ADD COLUMN exercise_order INTEGER NOT NULL DEFAULT 0",
    ),
];

/// Bring the schema fully up to date. Any failure other than an
/// already-present column is returned to the caller; startup must not
/// continue on a half-migrated database.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    tracing::info!("Running migrations...");

    let conn = pool.get()?;
    ensure_schema(&conn)?;
    apply_additive_migrations(&conn)?;

    tracing::info!("Migrations completed");
    Ok(())
}

/// Create all tables that are missing, tracking applied migrations in a
/// `_migrations` table so each CREATE script runs once.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS _migrations (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    for (filename, sql) in MIGRATIONS {
        let already_applied: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM _migrations WHERE name = ?",
                [filename],
                |row| row.get(0),
            )
            .unwrap_or(false);

        if already_applied {
            tracing::debug!("Skipping already applied migration: {}", filename);
            continue;
        }

        tracing::info!("Running migration: {}", filename);

        conn.execute_batch(sql)?;

        conn.execute("INSERT INTO _migrations (name) VALUES (?)", [filename])?;
    }

    Ok(())
}

/// Add every post-release column that is not present yet. Safe to run on
/// every startup: a column that already exists counts as success.
pub fn apply_additive_migrations(conn: &Connection) -> Result<()> {
    for (table, column, ddl) in ADDITIVE_COLUMNS {
        match conn.execute_batch(ddl) {
            Ok(()) => tracing::info!("Added column {}.{}", table, column),
            Err(err) if is_duplicate_column(&err) => {
                tracing::debug!("Column {}.{} already present", table, column);
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn is_duplicate_column(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("duplicate column name")
    )
}

/// Run all migrations for tests (without tracking).
///
/// This is a simpler version suitable for in-memory test databases that
/// are created fresh each time.
pub fn run_migrations_for_tests(pool: &DbPool) -> Result<()> {
    let conn = pool.get()?;

    for (_filename, sql) in MIGRATIONS {
        conn.execute_batch(sql)?;
    }

    apply_additive_migrations(&conn)
}
