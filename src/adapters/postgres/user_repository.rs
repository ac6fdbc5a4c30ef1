//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, Page, PageRequest, Role, UserId};
use crate::domain::user::{Email, ResetToken, Streak, User};
use crate::ports::UserRepository;

use super::common::{count, db_error, limit_offset, parse_column, ts, violates};

const EMAIL_CONSTRAINT: &str = "users_email_key";

const SELECT_USER: &str = r#"
    SELECT id, email, first_name, last_name, password_hash, role, profile_image_url,
           native_language, learning_language, current_streak, longest_streak,
           last_activity_on, reset_token_hash, reset_token_expires_at, created_at, updated_at,
           profile_image_id
    FROM users
"#;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    first_name: String,
    last_name: String,
    password_hash: String,
    role: String,
    profile_image_url: Option<String>,
    profile_image_id: Option<String>,
    native_language: Option<String>,
    learning_language: Option<String>,
    current_streak: i32,
    longest_streak: i32,
    last_activity_on: Option<NaiveDate>,
    reset_token_hash: Option<String>,
    reset_token_expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid stored email: {}", e))
        })?;
        let reset_token = match (row.reset_token_hash, row.reset_token_expires_at) {
            (Some(token_hash), Some(expires_at)) => Some(ResetToken {
                token_hash,
                expires_at: ts(expires_at),
            }),
            _ => None,
        };

        Ok(User {
            id: UserId::from_uuid(row.id),
            email,
            first_name: row.first_name,
            last_name: row.last_name,
            password_hash: row.password_hash,
            role: parse_column::<Role>("role", &row.role)?,
            profile_image_url: row.profile_image_url,
            profile_image_id: row.profile_image_id,
            native_language: row.native_language,
            learning_language: row.learning_language,
            streak: Streak {
                current: u32::try_from(row.current_streak).unwrap_or(0),
                longest: u32::try_from(row.longest_streak).unwrap_or(0),
                last_activity_on: row.last_activity_on,
            },
            reset_token,
            created_at: ts(row.created_at),
            updated_at: ts(row.updated_at),
        })
    }
}

fn streak_column(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn map_write_error(context: &str, e: sqlx::Error) -> DomainError {
    if violates(&e, EMAIL_CONSTRAINT) {
        return DomainError::new(ErrorCode::EmailTaken, "Email is already registered");
    }
    db_error(context, e)
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, email, first_name, last_name, password_hash, role, profile_image_url,
                native_language, learning_language, current_streak, longest_streak,
                last_activity_on, reset_token_hash, reset_token_expires_at, created_at, updated_at,
                profile_image_id
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.email.as_str())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(&user.profile_image_url)
        .bind(&user.native_language)
        .bind(&user.learning_language)
        .bind(streak_column(user.streak.current))
        .bind(streak_column(user.streak.longest))
        .bind(user.streak.last_activity_on)
        .bind(user.reset_token.as_ref().map(|t| t.token_hash.clone()))
        .bind(user.reset_token.as_ref().map(|t| *t.expires_at.as_datetime()))
        .bind(user.created_at.as_datetime())
        .bind(user.updated_at.as_datetime())
        .bind(&user.profile_image_id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("Failed to create user", e))?;

        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                email = $2,
                first_name = $3,
                last_name = $4,
                password_hash = $5,
                role = $6,
                profile_image_url = $7,
                native_language = $8,
                learning_language = $9,
                current_streak = $10,
                longest_streak = $11,
                last_activity_on = $12,
                reset_token_hash = $13,
                reset_token_expires_at = $14,
                updated_at = $15,
                profile_image_id = $16
            WHERE id = $1
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.email.as_str())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(&user.profile_image_url)
        .bind(&user.native_language)
        .bind(&user.learning_language)
        .bind(streak_column(user.streak.current))
        .bind(streak_column(user.streak.longest))
        .bind(user.streak.last_activity_on)
        .bind(user.reset_token.as_ref().map(|t| t.token_hash.clone()))
        .bind(user.reset_token.as_ref().map(|t| *t.expires_at.as_datetime()))
        .bind(user.updated_at.as_datetime())
        .bind(&user.profile_image_id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("Failed to update user", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(ErrorCode::UserNotFound, "User not found"));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_USER))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to load user", e))?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{} WHERE email = $1", SELECT_USER))
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to load user", e))?;
        row.map(User::try_from).transpose()
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, DomainError> {
        let (limit, offset) = limit_offset(page);
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "{} ORDER BY created_at, id LIMIT $1 OFFSET $2",
            SELECT_USER
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list users", e))?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to count users", e))?;

        let users = rows
            .into_iter()
            .map(User::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(users, count(total), page))
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        // Replies on other users' threads disappear with the account; keep counters right.
        sqlx::query(
            r#"
            UPDATE forum_threads t SET reply_count = t.reply_count - r.n
            FROM (
                SELECT thread_id, COUNT(*)::INTEGER AS n
                FROM forum_replies WHERE author_id = $1
                GROUP BY thread_id
            ) r
            WHERE t.id = r.thread_id
            "#,
        )
        .bind(id.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to adjust reply counts", e))?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to delete user", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(ErrorCode::UserNotFound, "User not found"));
        }

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit user deletion", e))
    }
}
