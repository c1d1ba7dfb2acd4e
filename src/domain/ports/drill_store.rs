//! Drill store port.

use async_trait::async_trait;

use crate::domain::errors::StorageResult;
use crate::domain::models::DrillId;

/// A `Drills` row as stored: the configuration is still serialized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillRow {
    pub id: DrillId,
    pub name: String,
    pub configuration: String,
}

/// Key-indexed table of drills.
///
/// Rows are opaque here; turning `configuration` text into a typed value is
/// the repository service's job.
#[async_trait]
pub trait DrillStore: Send + Sync {
    /// Insert a new row and return the identifier the store assigned.
    async fn insert(&self, name: &str, configuration: &str) -> StorageResult<DrillId>;

    /// Write the row at `id`, replacing name and configuration if it exists.
    async fn upsert(&self, id: DrillId, name: &str, configuration: &str) -> StorageResult<()>;

    /// Get a row by identifier.
    async fn fetch(&self, id: DrillId) -> StorageResult<Option<DrillRow>>;

    /// All rows in identifier order.
    async fn fetch_all(&self) -> StorageResult<Vec<DrillRow>>;

    /// Check whether a row exists.
    async fn exists(&self, id: DrillId) -> StorageResult<bool>;

    /// Delete a row, returning how many rows were removed.
    async fn delete(&self, id: DrillId) -> StorageResult<u64>;
}
