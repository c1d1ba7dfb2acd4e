//! SQLite database adapters for the drill trainer core.

pub mod connection;
pub mod drill_store;
pub mod migrations;
pub mod session_repository;

pub use connection::{create_pool, create_test_pool, verify_connection, ConnectionError, PoolConfig};
pub use drill_store::SqliteDrillStore;
pub use migrations::{all_embedded_migrations, Migration, MigrationError, Migrator};
pub use session_repository::SqliteSessionRepository;

use sqlx::SqlitePool;

use crate::domain::errors::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),
    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),
}

impl From<DatabaseError> for StorageError {
    fn from(err: DatabaseError) -> Self {
        Self::Unavailable(err.to_string())
    }
}

/// Open (creating if needed) and migrate the database at `database_url`.
pub async fn initialize_database(
    database_url: &str,
    config: Option<PoolConfig>,
) -> Result<SqlitePool, DatabaseError> {
    let pool = create_pool(database_url, config).await?;
    let migrator = Migrator::new(pool.clone());
    migrator.run_embedded_migrations(all_embedded_migrations()).await?;
    Ok(pool)
}

/// Create an in-memory test pool with all migrations applied.
pub async fn create_migrated_test_pool() -> Result<SqlitePool, DatabaseError> {
    let pool = create_test_pool().await?;
    let migrator = Migrator::new(pool.clone());
    migrator.run_embedded_migrations(all_embedded_migrations()).await?;
    Ok(pool)
}
