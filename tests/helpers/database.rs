use std::sync::Arc;

use noteprompter::adapters::sqlite::{
    create_migrated_test_pool, SqliteDrillStore, SqliteSessionRepository,
};
use noteprompter::{DrillRepository, SessionStore};
use sqlx::SqlitePool;

/// Create an in-memory SQLite database for testing
///
/// Each call creates a completely isolated database instance with
/// migrations applied.
pub async fn setup_test_db() -> SqlitePool {
    create_migrated_test_pool()
        .await
        .expect("failed to create test database")
}

pub async fn setup_drill_repository() -> (DrillRepository<SqliteDrillStore>, SqlitePool) {
    let pool = setup_test_db().await;
    let repo = DrillRepository::new(Arc::new(SqliteDrillStore::new(pool.clone())));
    (repo, pool)
}

pub async fn setup_session_store() -> SessionStore<SqliteSessionRepository> {
    let pool = setup_test_db().await;
    SessionStore::new(Arc::new(SqliteSessionRepository::new(pool)))
}

/// Write a row directly, bypassing the repository's encoding.
pub async fn insert_raw_drill(pool: &SqlitePool, name: &str, configuration: &str) -> i64 {
    sqlx::query("INSERT INTO drills (name, configuration) VALUES (?, ?)")
        .bind(name)
        .bind(configuration)
        .execute(pool)
        .await
        .expect("failed to insert raw drill")
        .last_insert_rowid()
}

/// Closes the connection pool.
pub async fn teardown_test_db(pool: SqlitePool) {
    pool.close().await;
}
