//! Embedded schema for the CRM tables.
//!
//! The SQL lives in `migrations/` at the crate root and is compiled into the
//! binary by `sqlx::migrate!`; applying it is idempotent.

use sqlx::migrate::Migrator;
use sqlx::SqlitePool;

use crate::error::{SqlxErrorExt, SqlxResult};

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Apply any pending migrations to the pool's database.
pub async fn run_migrations(pool: &SqlitePool) -> SqlxResult<()> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| sqlx::Error::from(e).into_data_error())?;
    tracing::info!(migrations = MIGRATOR.iter().count(), "schema up to date");
    Ok(())
}
