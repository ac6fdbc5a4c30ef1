//! Row conversion helpers shared by the PostgreSQL repositories.

use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::foundation::{DomainError, ErrorCode, PageRequest, Timestamp};

pub(super) fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::database(format!("{}: {}", context, e))
}

/// True when `e` violates the named unique constraint.
pub(super) fn violates(e: &sqlx::Error, constraint: &str) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.constraint() == Some(constraint))
}

/// Parses a text column into a domain enum.
pub(super) fn parse_column<T>(column: &str, value: &str) -> Result<T, DomainError>
where
    T: FromStr<Err = String>,
{
    value.parse().map_err(|e: String| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid {} value: {}", column, e),
        )
    })
}

pub(super) fn ts(dt: DateTime<Utc>) -> Timestamp {
    Timestamp::from_datetime(dt)
}

pub(super) fn opt_dt(t: Option<Timestamp>) -> Option<DateTime<Utc>> {
    t.map(|t| *t.as_datetime())
}

pub(super) fn limit_offset(page: PageRequest) -> (i64, i64) {
    (
        i64::from(page.limit()),
        i64::try_from(page.offset()).unwrap_or(i64::MAX),
    )
}

pub(super) fn count(total: i64) -> u64 {
    u64::try_from(total).unwrap_or(0)
}
