use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};

use crate::models::session::{RawAnswer, SessionState};
use crate::store::{SessionStore, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS interview_sessions (
    token                  TEXT PRIMARY KEY,
    answers                JSONB NOT NULL,
    asked_questions        JSONB NOT NULL,
    question_order         JSONB NOT NULL,
    answer_log             JSONB NOT NULL,
    current_question_index INTEGER NOT NULL,
    created_at             TIMESTAMPTZ NOT NULL,
    last_activity          TIMESTAMPTZ NOT NULL,
    completed              BOOLEAN NOT NULL
)
"#;

/// Postgres-backed session store. One row per token; collection fields are
/// JSONB so the full state round-trips losslessly.
pub struct PgSessionStore {
    pool: PgPool,
}

#[derive(FromRow)]
struct SessionRow {
    answers: Value,
    asked_questions: Value,
    question_order: Value,
    answer_log: Value,
    current_question_index: i32,
    created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
    completed: bool,
}

impl SessionRow {
    fn into_state(self) -> Result<SessionState, StoreError> {
        Ok(SessionState {
            created_at: self.created_at,
            last_activity: self.last_activity,
            completed: self.completed,
            asked_question_ids: serde_json::from_value(self.asked_questions)?,
            question_order: serde_json::from_value(self.question_order)?,
            answers: serde_json::from_value(self.answers)?,
            raw_answer_log: serde_json::from_value::<Vec<RawAnswer>>(self.answer_log)?,
            current_question_index: self.current_question_index as usize,
        })
    }
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the sessions table at startup if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn load(&self, token: &str) -> Result<Option<SessionState>, StoreError> {
        let row: Option<SessionRow> = sqlx::query_as(
            "SELECT answers, asked_questions, question_order, answer_log, \
             current_question_index, created_at, last_activity, completed \
             FROM interview_sessions WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        row.map(SessionRow::into_state).transpose()
    }

    async fn save(&self, token: &str, state: &SessionState) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO interview_sessions
                (token, answers, asked_questions, question_order, answer_log,
                 current_question_index, created_at, last_activity, completed)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (token) DO UPDATE SET
                answers = EXCLUDED.answers,
                asked_questions = EXCLUDED.asked_questions,
                question_order = EXCLUDED.question_order,
                answer_log = EXCLUDED.answer_log,
                current_question_index = EXCLUDED.current_question_index,
                last_activity = EXCLUDED.last_activity,
                completed = EXCLUDED.completed
            "#,
        )
        .bind(token)
        .bind(serde_json::to_value(&state.answers)?)
        .bind(serde_json::to_value(&state.asked_question_ids)?)
        .bind(serde_json::to_value(&state.question_order)?)
        .bind(serde_json::to_value(&state.raw_answer_log)?)
        .bind(state.current_question_index as i32)
        .bind(state.created_at)
        .bind(state.last_activity)
        .bind(state.completed)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, token: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM interview_sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
