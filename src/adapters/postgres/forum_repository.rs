//! PostgreSQL implementation of ForumRepository.
//!
//! `reply_count` is maintained in the same transaction as the reply insert or
//! delete so listings never need a join.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::forum::{ForumReply, ForumThread};
use crate::domain::foundation::{DomainError, ErrorCode, Page, PageRequest, ReplyId, ThreadId, UserId};
use crate::ports::ForumRepository;

use super::common::{count, db_error, limit_offset, ts};

pub struct PostgresForumRepository {
    pool: PgPool,
}

impl PostgresForumRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ThreadRow {
    id: Uuid,
    author_id: Uuid,
    title: String,
    body: String,
    reply_count: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ThreadRow> for ForumThread {
    fn from(row: ThreadRow) -> Self {
        ForumThread {
            id: ThreadId::from_uuid(row.id),
            author_id: UserId::from_uuid(row.author_id),
            title: row.title,
            body: row.body,
            reply_count: u32::try_from(row.reply_count).unwrap_or(0),
            created_at: ts(row.created_at),
            updated_at: ts(row.updated_at),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReplyRow {
    id: Uuid,
    thread_id: Uuid,
    author_id: Uuid,
    body: String,
    created_at: DateTime<Utc>,
}

impl From<ReplyRow> for ForumReply {
    fn from(row: ReplyRow) -> Self {
        ForumReply {
            id: ReplyId::from_uuid(row.id),
            thread_id: ThreadId::from_uuid(row.thread_id),
            author_id: UserId::from_uuid(row.author_id),
            body: row.body,
            created_at: ts(row.created_at),
        }
    }
}

fn thread_not_found() -> DomainError {
    DomainError::not_found(ErrorCode::ThreadNotFound, "Thread not found")
}

#[async_trait]
impl ForumRepository for PostgresForumRepository {
    async fn create_thread(&self, thread: &ForumThread) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO forum_threads (id, author_id, title, body, reply_count, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(thread.id.as_uuid())
        .bind(thread.author_id.as_uuid())
        .bind(&thread.title)
        .bind(&thread.body)
        .bind(i32::try_from(thread.reply_count).unwrap_or(i32::MAX))
        .bind(thread.created_at.as_datetime())
        .bind(thread.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create thread", e))?;
        Ok(())
    }

    async fn find_thread(&self, id: &ThreadId) -> Result<Option<ForumThread>, DomainError> {
        let row: Option<ThreadRow> = sqlx::query_as(
            r#"
            SELECT id, author_id, title, body, reply_count, created_at, updated_at
            FROM forum_threads WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load thread", e))?;
        Ok(row.map(ForumThread::from))
    }

    async fn list_threads(&self, page: PageRequest) -> Result<Page<ForumThread>, DomainError> {
        let (limit, offset) = limit_offset(page);
        let rows: Vec<ThreadRow> = sqlx::query_as(
            r#"
            SELECT id, author_id, title, body, reply_count, created_at, updated_at
            FROM forum_threads
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list threads", e))?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM forum_threads")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to count threads", e))?;

        Ok(Page::new(
            rows.into_iter().map(ForumThread::from).collect(),
            count(total),
            page,
        ))
    }

    async fn delete_thread(&self, id: &ThreadId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM forum_threads WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete thread", e))?;
        if result.rows_affected() == 0 {
            return Err(thread_not_found());
        }
        Ok(())
    }

    async fn add_reply(&self, reply: &ForumReply) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        let bumped = sqlx::query(
            r#"
            UPDATE forum_threads SET reply_count = reply_count + 1, updated_at = $2
            WHERE id = $1
            "#,
        )
        .bind(reply.thread_id.as_uuid())
        .bind(reply.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to update thread", e))?;
        if bumped.rows_affected() == 0 {
            return Err(thread_not_found());
        }

        sqlx::query(
            r#"
            INSERT INTO forum_replies (id, thread_id, author_id, body, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(reply.id.as_uuid())
        .bind(reply.thread_id.as_uuid())
        .bind(reply.author_id.as_uuid())
        .bind(&reply.body)
        .bind(reply.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to create reply", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit reply", e))
    }

    async fn find_reply(&self, id: &ReplyId) -> Result<Option<ForumReply>, DomainError> {
        let row: Option<ReplyRow> = sqlx::query_as(
            "SELECT id, thread_id, author_id, body, created_at FROM forum_replies WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load reply", e))?;
        Ok(row.map(ForumReply::from))
    }

    async fn list_replies(&self, thread_id: &ThreadId) -> Result<Vec<ForumReply>, DomainError> {
        let rows: Vec<ReplyRow> = sqlx::query_as(
            r#"
            SELECT id, thread_id, author_id, body, created_at
            FROM forum_replies WHERE thread_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(thread_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list replies", e))?;
        Ok(rows.into_iter().map(ForumReply::from).collect())
    }

    async fn delete_reply(&self, id: &ReplyId) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        let thread_id: Option<Uuid> =
            sqlx::query_scalar("DELETE FROM forum_replies WHERE id = $1 RETURNING thread_id")
                .bind(id.as_uuid())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| db_error("Failed to delete reply", e))?;
        let Some(thread_id) = thread_id else {
            return Err(DomainError::not_found(ErrorCode::ReplyNotFound, "Reply not found"));
        };

        sqlx::query(
            "UPDATE forum_threads SET reply_count = GREATEST(reply_count - 1, 0) WHERE id = $1",
        )
        .bind(thread_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to update thread", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit reply deletion", e))
    }
}
