//! Level catalogue handlers.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, LevelId};
use crate::domain::level::{language, Level};
use crate::ports::LevelRepository;

use super::load_level;

#[derive(Debug, Clone)]
pub struct CreateLevelCommand {
    pub language: String,
    pub title: String,
    pub description: String,
    pub position: i32,
}

pub struct CreateLevelHandler {
    levels: Arc<dyn LevelRepository>,
}

impl CreateLevelHandler {
    pub fn new(levels: Arc<dyn LevelRepository>) -> Self {
        Self { levels }
    }

    pub async fn handle(&self, cmd: CreateLevelCommand) -> Result<Level, DomainError> {
        let level = Level::new(&cmd.language, &cmd.title, &cmd.description, cmd.position)?;
        self.levels.create(&level).await?;
        tracing::info!(level_id = %level.id, language = %level.language, "level created");
        Ok(level)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListLevelsQuery {
    pub language: Option<String>,
}

pub struct ListLevelsHandler {
    levels: Arc<dyn LevelRepository>,
}

impl ListLevelsHandler {
    pub fn new(levels: Arc<dyn LevelRepository>) -> Self {
        Self { levels }
    }

    pub async fn handle(&self, query: ListLevelsQuery) -> Result<Vec<Level>, DomainError> {
        let filter = match query.language.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(language(raw)?),
        };
        self.levels.list(filter.as_deref()).await
    }
}

pub struct GetLevelHandler {
    levels: Arc<dyn LevelRepository>,
}

impl GetLevelHandler {
    pub fn new(levels: Arc<dyn LevelRepository>) -> Self {
        Self { levels }
    }

    pub async fn handle(&self, id: LevelId) -> Result<Level, DomainError> {
        load_level(self.levels.as_ref(), &id).await
    }
}

/// Deletes a level together with its questions and sessions.
pub struct DeleteLevelHandler {
    levels: Arc<dyn LevelRepository>,
}

impl DeleteLevelHandler {
    pub fn new(levels: Arc<dyn LevelRepository>) -> Self {
        Self { levels }
    }

    pub async fn handle(&self, id: LevelId) -> Result<(), DomainError> {
        self.levels.delete(&id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::foundation::ErrorCode;

    fn create(language: &str, title: &str, position: i32) -> CreateLevelCommand {
        CreateLevelCommand {
            language: language.to_string(),
            title: title.to_string(),
            description: String::new(),
            position,
        }
    }

    #[tokio::test]
    async fn lists_by_language_in_position_order() {
        let f = Fixture::new();
        let handler = CreateLevelHandler::new(f.store.clone());
        handler.handle(create("es", "Travel", 2)).await.unwrap();
        handler.handle(create("ES", "Greetings", 1)).await.unwrap();
        handler.handle(create("fr", "Bonjour", 1)).await.unwrap();

        let spanish = ListLevelsHandler::new(f.store.clone())
            .handle(ListLevelsQuery {
                language: Some(" Es ".to_string()),
            })
            .await
            .unwrap();
        let titles: Vec<_> = spanish.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["Greetings", "Travel"]);

        let all = ListLevelsHandler::new(f.store.clone())
            .handle(ListLevelsQuery::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn invalid_level_is_rejected() {
        let f = Fixture::new();
        let err = CreateLevelHandler::new(f.store.clone())
            .handle(create("es", "", 0))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.reasons.len(), 2);
    }

    #[tokio::test]
    async fn get_and_delete_missing_level() {
        let f = Fixture::new();
        let missing = LevelId::new();
        assert_eq!(
            GetLevelHandler::new(f.store.clone())
                .handle(missing)
                .await
                .unwrap_err()
                .code,
            ErrorCode::LevelNotFound
        );
        assert_eq!(
            DeleteLevelHandler::new(f.store.clone())
                .handle(missing)
                .await
                .unwrap_err()
                .code,
            ErrorCode::LevelNotFound
        );
    }
}
