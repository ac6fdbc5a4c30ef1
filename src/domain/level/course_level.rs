//! Course level entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    bounded_text, DomainError, LevelId, Timestamp, ValidationError, Violations,
};

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Normalises a language name or code ("Spanish", "es") for storage and lookup.
pub fn language(raw: &str) -> Result<String, ValidationError> {
    bounded_text("language", raw, 2, 30).map(|l| l.to_lowercase())
}

/// One step of a language course, ordered by `position`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub id: LevelId,
    pub language: String,
    pub title: String,
    pub description: String,
    pub position: i32,
    pub created_at: Timestamp,
}

impl Level {
    pub fn new(
        language_name: &str,
        title: &str,
        description: &str,
        position: i32,
    ) -> Result<Self, DomainError> {
        let mut violations = Violations::new();
        let language_name = violations.check(language(language_name));
        let title = violations.check(bounded_text("title", title, 1, MAX_TITLE_LEN));
        let description =
            violations.check(bounded_text("description", description, 0, MAX_DESCRIPTION_LEN));
        if position < 1 {
            violations.push(ValidationError::out_of_range("position", 1, i32::MAX, position));
        }
        violations.finish()?;

        match (language_name, title, description) {
            (Some(language), Some(title), Some(description)) => Ok(Self {
                id: LevelId::new(),
                language,
                title,
                description,
                position,
                created_at: Timestamp::now(),
            }),
            _ => Err(DomainError::internal("level validation inconsistent")),
        }
    }
}
