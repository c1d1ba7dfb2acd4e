//! SQLite implementation of the DrillStore.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::StorageResult;
use crate::domain::models::DrillId;
use crate::domain::ports::{DrillRow, DrillStore};

#[derive(Clone)]
pub struct SqliteDrillStore {
    pool: SqlitePool,
}

impl SqliteDrillStore {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DrillTableRow {
    id: i64,
    name: String,
    configuration: String,
}

impl From<DrillTableRow> for DrillRow {
    fn from(row: DrillTableRow) -> Self {
        Self {
            id: DrillId(row.id),
            name: row.name,
            configuration: row.configuration,
        }
    }
}

#[async_trait]
impl DrillStore for SqliteDrillStore {
    async fn insert(&self, name: &str, configuration: &str) -> StorageResult<DrillId> {
        let result = sqlx::query("INSERT INTO drills (name, configuration) VALUES (?, ?)")
            .bind(name)
            .bind(configuration)
            .execute(&self.pool)
            .await?;

        Ok(DrillId(result.last_insert_rowid()))
    }

    async fn upsert(&self, id: DrillId, name: &str, configuration: &str) -> StorageResult<()> {
        sqlx::query(
            r#"INSERT INTO drills (id, name, configuration) VALUES (?, ?, ?)
               ON CONFLICT(id) DO UPDATE SET
                   name = excluded.name,
                   configuration = excluded.configuration"#,
        )
        .bind(id.0)
        .bind(name)
        .bind(configuration)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn fetch(&self, id: DrillId) -> StorageResult<Option<DrillRow>> {
        let row: Option<DrillTableRow> =
            sqlx::query_as("SELECT id, name, configuration FROM drills WHERE id = ?")
                .bind(id.0)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(DrillRow::from))
    }

    async fn fetch_all(&self) -> StorageResult<Vec<DrillRow>> {
        let rows: Vec<DrillTableRow> =
            sqlx::query_as("SELECT id, name, configuration FROM drills ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(DrillRow::from).collect())
    }

    async fn exists(&self, id: DrillId) -> StorageResult<bool> {
        let found: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM drills WHERE id = ?")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    async fn delete(&self, id: DrillId) -> StorageResult<u64> {
        let result = sqlx::query("DELETE FROM drills WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
