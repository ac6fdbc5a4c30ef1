//! User feedback, bug reports and content reports.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    bounded_text, DomainError, ErrorCode, FeedbackId, Timestamp, UserId,
};

pub const MIN_MESSAGE_LEN: usize = 5;
pub const MAX_MESSAGE_LEN: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Feedback,
    Bug,
    /// Flags a piece of content (thread, reply, question) for moderation.
    Report,
}

impl FeedbackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackKind::Feedback => "feedback",
            FeedbackKind::Bug => "bug",
            FeedbackKind::Report => "report",
        }
    }
}

impl FromStr for FeedbackKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "feedback" => Ok(FeedbackKind::Feedback),
            "bug" => Ok(FeedbackKind::Bug),
            "report" => Ok(FeedbackKind::Report),
            other => Err(format!("Invalid feedback kind: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackStatus {
    Open,
    Resolved,
}

impl FeedbackStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackStatus::Open => "open",
            FeedbackStatus::Resolved => "resolved",
        }
    }
}

impl fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(FeedbackStatus::Open),
            "resolved" => Ok(FeedbackStatus::Resolved),
            other => Err(format!("Invalid feedback status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: FeedbackId,
    pub user_id: UserId,
    pub kind: FeedbackKind,
    pub message: String,
    pub target_id: Option<String>,
    pub status: FeedbackStatus,
    pub created_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
}

impl Feedback {
    pub fn submit(
        user_id: UserId,
        kind: FeedbackKind,
        message: &str,
        target_id: Option<String>,
    ) -> Result<Self, DomainError> {
        let message = bounded_text("message", message, MIN_MESSAGE_LEN, MAX_MESSAGE_LEN)?;
        let target_id = target_id
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        if kind == FeedbackKind::Report && target_id.is_none() {
            return Err(DomainError::validation(
                "target_id",
                "target_id is required for reports",
            ));
        }

        Ok(Self {
            id: FeedbackId::new(),
            user_id,
            kind,
            message,
            target_id,
            status: FeedbackStatus::Open,
            created_at: Timestamp::now(),
            resolved_at: None,
        })
    }

    pub fn resolve(&mut self, now: Timestamp) -> Result<(), DomainError> {
        if self.status == FeedbackStatus::Resolved {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Feedback is already resolved",
            ));
        }
        self.status = FeedbackStatus::Resolved;
        self.resolved_at = Some(now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_needs_target() {
        let err = Feedback::submit(UserId::new(), FeedbackKind::Report, "Spam thread", None)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn feedback_opens() {
        let feedback = Feedback::submit(
            UserId::new(),
            FeedbackKind::Feedback,
            "Love the daily challenge",
            Some("  ".to_string()),
        )
        .unwrap();
        assert_eq!(feedback.status, FeedbackStatus::Open);
        assert_eq!(feedback.target_id, None);
    }

    #[test]
    fn short_message_rejected() {
        assert!(Feedback::submit(UserId::new(), FeedbackKind::Bug, "bad", None).is_err());
    }

    #[test]
    fn resolve_once() {
        let mut feedback =
            Feedback::submit(UserId::new(), FeedbackKind::Bug, "Audio does not play", None)
                .unwrap();
        feedback.resolve(Timestamp::now()).unwrap();
        assert_eq!(feedback.status, FeedbackStatus::Resolved);
        assert!(feedback.resolve(Timestamp::now()).is_err());
    }
}
