//! PostgreSQL implementation of FeedbackRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::feedback::{Feedback, FeedbackKind, FeedbackStatus};
use crate::domain::foundation::{DomainError, ErrorCode, FeedbackId, Page, PageRequest, UserId};
use crate::ports::FeedbackRepository;

use super::common::{count, db_error, limit_offset, opt_dt, parse_column, ts};

pub struct PostgresFeedbackRepository {
    pool: PgPool,
}

impl PostgresFeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FeedbackRow {
    id: Uuid,
    user_id: Uuid,
    kind: String,
    message: String,
    target_id: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
}

impl TryFrom<FeedbackRow> for Feedback {
    type Error = DomainError;

    fn try_from(row: FeedbackRow) -> Result<Self, Self::Error> {
        Ok(Feedback {
            id: FeedbackId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            kind: parse_column::<FeedbackKind>("kind", &row.kind)?,
            message: row.message,
            target_id: row.target_id,
            status: parse_column::<FeedbackStatus>("status", &row.status)?,
            created_at: ts(row.created_at),
            resolved_at: row.resolved_at.map(ts),
        })
    }
}

#[async_trait]
impl FeedbackRepository for PostgresFeedbackRepository {
    async fn create(&self, feedback: &Feedback) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO feedback (id, user_id, kind, message, target_id, status, created_at, resolved_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(feedback.id.as_uuid())
        .bind(feedback.user_id.as_uuid())
        .bind(feedback.kind.as_str())
        .bind(&feedback.message)
        .bind(&feedback.target_id)
        .bind(feedback.status.as_str())
        .bind(feedback.created_at.as_datetime())
        .bind(opt_dt(feedback.resolved_at))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create feedback", e))?;
        Ok(())
    }

    async fn update(&self, feedback: &Feedback) -> Result<(), DomainError> {
        let result =
            sqlx::query("UPDATE feedback SET status = $2, resolved_at = $3 WHERE id = $1")
                .bind(feedback.id.as_uuid())
                .bind(feedback.status.as_str())
                .bind(opt_dt(feedback.resolved_at))
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("Failed to update feedback", e))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::FeedbackNotFound,
                "Feedback not found",
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &FeedbackId) -> Result<Option<Feedback>, DomainError> {
        let row: Option<FeedbackRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, kind, message, target_id, status, created_at, resolved_at
            FROM feedback WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load feedback", e))?;
        row.map(Feedback::try_from).transpose()
    }

    async fn list(
        &self,
        status: Option<FeedbackStatus>,
        page: PageRequest,
    ) -> Result<Page<Feedback>, DomainError> {
        let (limit, offset) = limit_offset(page);
        let status = status.map(|s| s.as_str());

        let rows: Vec<FeedbackRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, kind, message, target_id, status, created_at, resolved_at
            FROM feedback
            WHERE ($1::TEXT IS NULL OR status = $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list feedback", e))?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM feedback WHERE ($1::TEXT IS NULL OR status = $1)")
                .bind(status)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("Failed to count feedback", e))?;

        let items = rows
            .into_iter()
            .map(Feedback::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, count(total), page))
    }
}
