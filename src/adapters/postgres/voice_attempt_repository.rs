//! PostgreSQL implementation of VoiceAttemptRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, Page, PageRequest, UserId, VoiceAttemptId};
use crate::domain::voice_ai::VoiceAttempt;
use crate::ports::VoiceAttemptRepository;

use super::common::{count, db_error, limit_offset, ts};

pub struct PostgresVoiceAttemptRepository {
    pool: PgPool,
}

impl PostgresVoiceAttemptRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AttemptRow {
    id: Uuid,
    user_id: Uuid,
    language: String,
    expected_text: String,
    transcript: String,
    accuracy: i16,
    missing_words: Vec<String>,
    created_at: DateTime<Utc>,
}

impl From<AttemptRow> for VoiceAttempt {
    fn from(row: AttemptRow) -> Self {
        VoiceAttempt {
            id: VoiceAttemptId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            language: row.language,
            expected_text: row.expected_text,
            transcript: row.transcript,
            accuracy: u8::try_from(row.accuracy).unwrap_or(0),
            missing_words: row.missing_words,
            created_at: ts(row.created_at),
        }
    }
}

#[async_trait]
impl VoiceAttemptRepository for PostgresVoiceAttemptRepository {
    async fn create(&self, attempt: &VoiceAttempt) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO voice_attempts (
                id, user_id, language, expected_text, transcript, accuracy, missing_words, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(attempt.id.as_uuid())
        .bind(attempt.user_id.as_uuid())
        .bind(&attempt.language)
        .bind(&attempt.expected_text)
        .bind(&attempt.transcript)
        .bind(i16::from(attempt.accuracy))
        .bind(&attempt.missing_words)
        .bind(attempt.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to record voice attempt", e))?;
        Ok(())
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Page<VoiceAttempt>, DomainError> {
        let (limit, offset) = limit_offset(page);
        let rows: Vec<AttemptRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, language, expected_text, transcript, accuracy, missing_words, created_at
            FROM voice_attempts WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list voice attempts", e))?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM voice_attempts WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to count voice attempts", e))?;

        Ok(Page::new(
            rows.into_iter().map(VoiceAttempt::from).collect(),
            count(total),
            page,
        ))
    }
}
