use crate::error::Error;
use anyhow::Result;
use sqlx::{Executor, PgPool};
use tracing::info;

/// Migration files embedded at compile time, applied in this order.
/// Table creation first, index additions last.
const MIGRATIONS: &[(&str, &str)] = &[
    (
        "0001_create_cameras.sql",
        include_str!("sql/0001_create_cameras.sql"),
    ),
    (
        "0002_create_incidents.sql",
        include_str!("sql/0002_create_incidents.sql"),
    ),
    ("add_indexes.sql", include_str!("sql/add_indexes.sql")),
];

/// Run all migrations against the given pool
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    for (name, sql) in MIGRATIONS {
        pool.execute(*sql)
            .await
            .map_err(|e| Error::Database(format!("Failed to apply migration {}: {}", name, e)))?;
        info!("Applied migration: {}", name);
    }

    Ok(())
}
