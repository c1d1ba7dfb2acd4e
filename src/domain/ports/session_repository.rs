//! Session repository port (trait) for dependency injection.
//!
//! Session rows are append-only: there is no update or delete here.

use crate::domain::errors::StorageResult;
use crate::domain::models::{Session, SessionId, SessionInput, StatsQuery};
use async_trait::async_trait;

/// Repository trait for practice session persistence
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Appends one session row
    ///
    /// # Returns
    /// The auto-assigned identifier of the new row
    async fn append(&self, session: &SessionInput) -> StorageResult<SessionId>;

    /// Lists sessions matching `query`, in insertion order
    async fn list(&self, query: &StatsQuery) -> StorageResult<Vec<Session>>;
}
