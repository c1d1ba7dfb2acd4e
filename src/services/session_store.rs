//! Session store: record practice sessions and report time spent per drill.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::errors::StorageError;
use crate::domain::models::{
    aggregate_sessions, DrillId, DrillStatsReport, EpochMillis, Session, SessionId, SessionInput,
    StatsQuery,
};
use crate::domain::ports::SessionRepository;

pub struct SessionStore<R: SessionRepository> {
    repository: Arc<R>,
}

impl<R: SessionRepository> SessionStore<R> {
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Append a session. Identical inputs are stored as separate rows.
    pub async fn record_session(&self, session: &SessionInput) -> Result<SessionId, StorageError> {
        let id = self.repository.append(session).await?;
        info!(
            session_id = %id,
            drill_id = %session.drill_id,
            total_ms = session.total_session_time_millis,
            "Recorded session"
        );
        Ok(id)
    }

    /// Time spent per drill name between `start` and `end`, both inclusive.
    ///
    /// `drill_id` narrows the window to one drill's sessions; `end` of `None`
    /// leaves it open.
    pub async fn query_range(
        &self,
        drill_id: Option<DrillId>,
        start: EpochMillis,
        end: Option<EpochMillis>,
    ) -> Result<DrillStatsReport, StorageError> {
        self.query(&StatsQuery {
            drill_id,
            start,
            end,
        })
        .await
    }

    pub async fn query(&self, query: &StatsQuery) -> Result<DrillStatsReport, StorageError> {
        let sessions = self.repository.list(query).await?;
        let report = aggregate_sessions(sessions.iter().map(|s| &s.record), query);
        debug!(
            sessions = sessions.len(),
            drills = report.per_drill.len(),
            total_ms = report.total_all_drills,
            "Aggregated sessions"
        );
        Ok(report)
    }

    /// Raw sessions matching `query`, oldest row first.
    pub async fn history(&self, query: &StatsQuery) -> Result<Vec<Session>, StorageError> {
        self.repository.list(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{create_migrated_test_pool, SqliteSessionRepository};
    use crate::domain::models::DrillStat;

    async fn setup_test_store() -> SessionStore<SqliteSessionRepository> {
        let pool = create_migrated_test_pool().await.unwrap();
        SessionStore::new(Arc::new(SqliteSessionRepository::new(pool)))
    }

    fn input(drill_id: i64, name: &str, total: i64, start: i64) -> SessionInput {
        SessionInput {
            drill_id: DrillId(drill_id),
            drill_name: name.to_string(),
            time_started: start,
            total_session_time_millis: total,
            prompt_count: 12,
            milliseconds_per_prompt: 1500,
            beats_per_prompt: 3,
            tempo: 120,
        }
    }

    #[tokio::test]
    async fn test_query_range_totals_by_name() {
        let store = setup_test_store().await;
        store.record_session(&input(1, "A", 100, 10)).await.unwrap();
        store.record_session(&input(1, "A", 50, 20)).await.unwrap();
        store.record_session(&input(2, "B", 200, 15)).await.unwrap();

        let report = store.query_range(None, 0, Some(30)).await.unwrap();
        assert_eq!(report.total_all_drills, 350);
        assert_eq!(
            report.per_drill,
            vec![
                DrillStat {
                    drill_name: "B".to_string(),
                    total_time_millis: 200
                },
                DrillStat {
                    drill_name: "A".to_string(),
                    total_time_millis: 150
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_query_range_with_no_sessions() {
        let store = setup_test_store().await;
        let report = store.query_range(None, 0, None).await.unwrap();
        assert_eq!(report, DrillStatsReport::default());
    }

    #[tokio::test]
    async fn test_query_range_for_one_drill() {
        let store = setup_test_store().await;
        store.record_session(&input(1, "A", 100, 10)).await.unwrap();
        store.record_session(&input(2, "B", 200, 15)).await.unwrap();

        let report = store.query_range(Some(DrillId(2)), 0, None).await.unwrap();
        assert_eq!(report.total_all_drills, 200);
        assert_eq!(report.per_drill.len(), 1);
    }

    #[tokio::test]
    async fn test_history_returns_each_recorded_session() {
        let store = setup_test_store().await;
        let first = store.record_session(&input(1, "A", 100, 10)).await.unwrap();
        let second = store.record_session(&input(1, "A", 100, 10)).await.unwrap();

        let history = store.history(&StatsQuery::since(0)).await.unwrap();
        let ids: Vec<_> = history.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![first, second]);
    }
}
