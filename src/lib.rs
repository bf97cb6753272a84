//! Local data core for a personal workout tracker: schema and
//! migrations, preset catalog import, session and plan queries, and
//! transactional writes. Screens call the repositories directly; there is
//! no server and no background worker.

pub mod config;
pub mod db;
pub mod draft;
pub mod editor;
pub mod error;
pub mod grouping;
pub mod migrations;
pub mod models;
pub mod repositories;
pub mod seed;

use db::DbPool;
use error::Result;

/// Bring a database to the current schema and make sure the preset
/// catalog is present. Runs on every startup and is safe to repeat; a
/// migration failure is returned, not swallowed.
pub async fn initialize_store(pool: &DbPool) -> Result<()> {
    migrations::run_migrations(pool)?;
    seed::import_preset_exercises(pool).await?;
    Ok(())
}
