//! CLI command implementations.

pub mod drill;
pub mod session;

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::adapters::sqlite::{initialize_database, PoolConfig};
use crate::domain::models::Config;

/// Open and migrate the configured database.
pub async fn open_database(config: &Config) -> Result<SqlitePool> {
    let url = config.database.url();
    initialize_database(&url, Some(PoolConfig::from(&config.database)))
        .await
        .with_context(|| format!("Failed to open database at {}", config.database.path))
}
