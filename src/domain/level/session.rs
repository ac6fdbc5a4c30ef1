//! A user's attempt at a level.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    DomainError, ErrorCode, LevelId, LevelSessionId, Timestamp, UserId, ValidationError,
};

pub const MAX_SCORE: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Completed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(SessionStatus::InProgress),
            "completed" => Ok(SessionStatus::Completed),
            other => Err(format!("Invalid session status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSession {
    pub id: LevelSessionId,
    pub user_id: UserId,
    pub level_id: LevelId,
    pub status: SessionStatus,
    pub score: Option<i32>,
    pub started_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

impl LevelSession {
    pub fn start(user_id: UserId, level_id: LevelId) -> Self {
        Self {
            id: LevelSessionId::new(),
            user_id,
            level_id,
            status: SessionStatus::InProgress,
            score: None,
            started_at: Timestamp::now(),
            completed_at: None,
        }
    }

    /// Finishes the session with a score in `0..=100`.
    pub fn complete(&mut self, score: i32, at: Timestamp) -> Result<(), DomainError> {
        if self.status == SessionStatus::Completed {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Session is already completed",
            ));
        }
        if !(0..=MAX_SCORE).contains(&score) {
            return Err(ValidationError::out_of_range("score", 0, MAX_SCORE, score).into());
        }
        self.status = SessionStatus::Completed;
        self.score = Some(score);
        self.completed_at = Some(at);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_progress() {
        let session = LevelSession::start(UserId::new(), LevelId::new());
        assert_eq!(session.status, SessionStatus::InProgress);
        assert_eq!(session.score, None);
    }

    #[test]
    fn complete_records_score() {
        let mut session = LevelSession::start(UserId::new(), LevelId::new());
        session.complete(85, Timestamp::now()).unwrap();
        assert_eq!(session.status, SessionStatus::Completed);
        assert_eq!(session.score, Some(85));
        assert!(session.completed_at.is_some());
    }

    #[test]
    fn cannot_complete_twice() {
        let mut session = LevelSession::start(UserId::new(), LevelId::new());
        session.complete(50, Timestamp::now()).unwrap();
        let err = session.complete(60, Timestamp::now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert_eq!(session.score, Some(50));
    }

    #[test]
    fn score_must_be_in_range() {
        let mut session = LevelSession::start(UserId::new(), LevelId::new());
        assert_eq!(
            session.complete(101, Timestamp::now()).unwrap_err().code,
            ErrorCode::ValidationFailed
        );
        assert!(session.complete(-1, Timestamp::now()).is_err());
        assert_eq!(session.status, SessionStatus::InProgress);
    }

    #[test]
    fn status_parses_from_storage_value() {
        assert_eq!("completed".parse::<SessionStatus>().unwrap(), SessionStatus::Completed);
        assert!("done".parse::<SessionStatus>().is_err());
    }
}
