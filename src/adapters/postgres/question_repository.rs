//! PostgreSQL implementation of QuestionRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, LevelId, QuestionId};
use crate::domain::question::{Question, QuestionKind};
use crate::ports::QuestionRepository;

use super::common::{db_error, parse_column, ts, violates};

const LEVEL_FK: &str = "questions_level_id_fkey";

const SELECT_QUESTION: &str = r#"
    SELECT id, level_id, kind, prompt, passage, options, answer, explanation,
           daily_challenge, created_at
    FROM questions
"#;

pub struct PostgresQuestionRepository {
    pool: PgPool,
}

impl PostgresQuestionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct QuestionRow {
    id: Uuid,
    level_id: Uuid,
    kind: String,
    prompt: String,
    passage: Option<String>,
    options: Vec<String>,
    answer: String,
    explanation: Option<String>,
    daily_challenge: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<QuestionRow> for Question {
    type Error = DomainError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        Ok(Question {
            id: QuestionId::from_uuid(row.id),
            level_id: LevelId::from_uuid(row.level_id),
            kind: parse_column::<QuestionKind>("kind", &row.kind)?,
            prompt: row.prompt,
            passage: row.passage,
            options: row.options,
            answer: row.answer,
            explanation: row.explanation,
            daily_challenge: row.daily_challenge,
            created_at: ts(row.created_at),
        })
    }
}

fn collect(rows: Vec<QuestionRow>) -> Result<Vec<Question>, DomainError> {
    rows.into_iter().map(Question::try_from).collect()
}

#[async_trait]
impl QuestionRepository for PostgresQuestionRepository {
    async fn create(&self, question: &Question) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO questions (
                id, level_id, kind, prompt, passage, options, answer, explanation,
                daily_challenge, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(question.id.as_uuid())
        .bind(question.level_id.as_uuid())
        .bind(question.kind.as_str())
        .bind(&question.prompt)
        .bind(&question.passage)
        .bind(&question.options)
        .bind(&question.answer)
        .bind(&question.explanation)
        .bind(question.daily_challenge)
        .bind(question.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, LEVEL_FK) {
                DomainError::not_found(ErrorCode::LevelNotFound, "Level not found")
            } else {
                db_error("Failed to create question", e)
            }
        })?;
        Ok(())
    }

    async fn find_by_id(&self, id: &QuestionId) -> Result<Option<Question>, DomainError> {
        let row: Option<QuestionRow> =
            sqlx::query_as(&format!("{} WHERE id = $1", SELECT_QUESTION))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to load question", e))?;
        row.map(Question::try_from).transpose()
    }

    async fn list_by_level(&self, level_id: &LevelId) -> Result<Vec<Question>, DomainError> {
        let rows: Vec<QuestionRow> = sqlx::query_as(&format!(
            "{} WHERE level_id = $1 ORDER BY created_at, id",
            SELECT_QUESTION
        ))
        .bind(level_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list questions", e))?;
        collect(rows)
    }

    async fn daily_pool(&self) -> Result<Vec<Question>, DomainError> {
        let rows: Vec<QuestionRow> = sqlx::query_as(&format!(
            "{} WHERE daily_challenge ORDER BY created_at, id",
            SELECT_QUESTION
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load daily question pool", e))?;
        collect(rows)
    }

    async fn delete(&self, id: &QuestionId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete question", e))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::QuestionNotFound,
                "Question not found",
            ));
        }
        Ok(())
    }
}
