//! SQLite implementation of the SessionRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::{StorageError, StorageResult};
use crate::domain::models::{DrillId, Session, SessionId, SessionInput, StatsQuery};
use crate::domain::ports::SessionRepository;

#[derive(Clone)]
pub struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SessionRow {
    id: i64,
    drill_id: i64,
    drill_name: String,
    time_started: i64,
    total_session_time_millis: i64,
    prompt_count: i64,
    milliseconds_per_prompt: i64,
    beats_per_prompt: i64,
    tempo: i64,
}

fn column<T: TryFrom<i64>>(row_id: i64, name: &str, value: i64) -> StorageResult<T> {
    T::try_from(value).map_err(|_| {
        StorageError::Corrupt(format!("session {row_id}: {name} out of range: {value}"))
    })
}

impl TryFrom<SessionRow> for Session {
    type Error = StorageError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: SessionId(row.id),
            record: SessionInput {
                drill_id: DrillId(row.drill_id),
                drill_name: row.drill_name,
                time_started: row.time_started,
                total_session_time_millis: row.total_session_time_millis,
                prompt_count: column(row.id, "prompt_count", row.prompt_count)?,
                milliseconds_per_prompt: column(
                    row.id,
                    "milliseconds_per_prompt",
                    row.milliseconds_per_prompt,
                )?,
                beats_per_prompt: column(row.id, "beats_per_prompt", row.beats_per_prompt)?,
                tempo: column(row.id, "tempo", row.tempo)?,
            },
        })
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn append(&self, session: &SessionInput) -> StorageResult<SessionId> {
        let millis_per_prompt = i64::try_from(session.milliseconds_per_prompt).map_err(|_| {
            StorageError::Query(format!(
                "milliseconds_per_prompt out of range: {}",
                session.milliseconds_per_prompt
            ))
        })?;

        let result = sqlx::query(
            r#"INSERT INTO sessions
               (drill_id, drill_name, time_started, total_session_time_millis,
                prompt_count, milliseconds_per_prompt, beats_per_prompt, tempo)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(session.drill_id.0)
        .bind(&session.drill_name)
        .bind(session.time_started)
        .bind(session.total_session_time_millis)
        .bind(i64::from(session.prompt_count))
        .bind(millis_per_prompt)
        .bind(i64::from(session.beats_per_prompt))
        .bind(i64::from(session.tempo))
        .execute(&self.pool)
        .await?;

        Ok(SessionId(result.last_insert_rowid()))
    }

    async fn list(&self, query: &StatsQuery) -> StorageResult<Vec<Session>> {
        let drill_id = query.drill_id.map(|id| id.0);
        let rows: Vec<SessionRow> = sqlx::query_as(
            r#"SELECT id, drill_id, drill_name, time_started, total_session_time_millis,
                      prompt_count, milliseconds_per_prompt, beats_per_prompt, tempo
               FROM sessions
               WHERE (? IS NULL OR drill_id = ?)
                 AND time_started >= ?
                 AND (? IS NULL OR time_started <= ?)
               ORDER BY id"#,
        )
        .bind(drill_id)
        .bind(drill_id)
        .bind(query.start)
        .bind(query.end)
        .bind(query.end)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Session::try_from).collect()
    }
}
