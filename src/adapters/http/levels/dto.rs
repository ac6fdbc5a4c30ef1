//! HTTP DTOs for level and session endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::level::CompletedSession;
use crate::domain::level::LevelSession;
use crate::domain::user::Streak;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateLevelRequest {
    pub language: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub position: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListLevelsParams {
    pub language: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompleteSessionRequest {
    pub score: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletedSessionResponse {
    pub session: LevelSession,
    pub streak: Streak,
}

impl From<CompletedSession> for CompletedSessionResponse {
    fn from(completed: CompletedSession) -> Self {
        Self {
            session: completed.session,
            streak: completed.streak,
        }
    }
}
