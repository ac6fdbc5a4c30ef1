//! PostgreSQL implementations of LevelRepository and LevelSessionRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, LevelId, LevelSessionId, UserId};
use crate::domain::level::{Level, LevelSession, SessionStatus};
use crate::ports::{LevelRepository, LevelSessionRepository};

use super::common::{db_error, opt_dt, parse_column, ts};

pub struct PostgresLevelRepository {
    pool: PgPool,
}

impl PostgresLevelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LevelRow {
    id: Uuid,
    language: String,
    title: String,
    description: String,
    position: i32,
    created_at: DateTime<Utc>,
}

impl From<LevelRow> for Level {
    fn from(row: LevelRow) -> Self {
        Level {
            id: LevelId::from_uuid(row.id),
            language: row.language,
            title: row.title,
            description: row.description,
            position: row.position,
            created_at: ts(row.created_at),
        }
    }
}

#[async_trait]
impl LevelRepository for PostgresLevelRepository {
    async fn create(&self, level: &Level) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO levels (id, language, title, description, position, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(level.id.as_uuid())
        .bind(&level.language)
        .bind(&level.title)
        .bind(&level.description)
        .bind(level.position)
        .bind(level.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create level", e))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &LevelId) -> Result<Option<Level>, DomainError> {
        let row: Option<LevelRow> = sqlx::query_as(
            r#"
            SELECT id, language, title, description, position, created_at
            FROM levels WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load level", e))?;
        Ok(row.map(Level::from))
    }

    async fn list(&self, language: Option<&str>) -> Result<Vec<Level>, DomainError> {
        let rows: Vec<LevelRow> = sqlx::query_as(
            r#"
            SELECT id, language, title, description, position, created_at
            FROM levels
            WHERE ($1::TEXT IS NULL OR language = $1)
            ORDER BY language, position, created_at
            "#,
        )
        .bind(language)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list levels", e))?;
        Ok(rows.into_iter().map(Level::from).collect())
    }

    async fn delete(&self, id: &LevelId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM levels WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete level", e))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(ErrorCode::LevelNotFound, "Level not found"));
        }
        Ok(())
    }
}

pub struct PostgresLevelSessionRepository {
    pool: PgPool,
}

impl PostgresLevelSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    user_id: Uuid,
    level_id: Uuid,
    status: String,
    score: Option<i32>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl TryFrom<SessionRow> for LevelSession {
    type Error = DomainError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        Ok(LevelSession {
            id: LevelSessionId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            level_id: LevelId::from_uuid(row.level_id),
            status: parse_column::<SessionStatus>("status", &row.status)?,
            score: row.score,
            started_at: ts(row.started_at),
            completed_at: row.completed_at.map(ts),
        })
    }
}

#[async_trait]
impl LevelSessionRepository for PostgresLevelSessionRepository {
    async fn create(&self, session: &LevelSession) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO level_sessions (id, user_id, level_id, status, score, started_at, completed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(session.id.as_uuid())
        .bind(session.user_id.as_uuid())
        .bind(session.level_id.as_uuid())
        .bind(session.status.as_str())
        .bind(session.score)
        .bind(session.started_at.as_datetime())
        .bind(opt_dt(session.completed_at))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create level session", e))?;
        Ok(())
    }

    async fn update(&self, session: &LevelSession) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE level_sessions SET status = $2, score = $3, completed_at = $4
            WHERE id = $1
            "#,
        )
        .bind(session.id.as_uuid())
        .bind(session.status.as_str())
        .bind(session.score)
        .bind(opt_dt(session.completed_at))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update level session", e))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::SessionNotFound,
                "Level session not found",
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &LevelSessionId) -> Result<Option<LevelSession>, DomainError> {
        let row: Option<SessionRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, level_id, status, score, started_at, completed_at
            FROM level_sessions WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load level session", e))?;
        row.map(LevelSession::try_from).transpose()
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<LevelSession>, DomainError> {
        let rows: Vec<SessionRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, level_id, status, score, started_at, completed_at
            FROM level_sessions WHERE user_id = $1
            ORDER BY started_at DESC, id DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list level sessions", e))?;
        rows.into_iter().map(LevelSession::try_from).collect()
    }
}
