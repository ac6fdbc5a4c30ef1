//! Level session handlers. Completing a session counts as the day's activity.

use std::sync::Arc;

use crate::application::handlers::user::load_user;
use crate::domain::foundation::{
    AuthenticatedUser, DomainError, ErrorCode, LevelId, LevelSessionId, Timestamp, UserId,
};
use crate::domain::level::LevelSession;
use crate::domain::user::Streak;
use crate::ports::{LevelRepository, LevelSessionRepository, UserRepository};

use super::load_level;

#[derive(Debug, Clone)]
pub struct StartSessionCommand {
    pub user_id: UserId,
    pub level_id: LevelId,
}

pub struct StartSessionHandler {
    levels: Arc<dyn LevelRepository>,
    sessions: Arc<dyn LevelSessionRepository>,
}

impl StartSessionHandler {
    pub fn new(
        levels: Arc<dyn LevelRepository>,
        sessions: Arc<dyn LevelSessionRepository>,
    ) -> Self {
        Self { levels, sessions }
    }

    pub async fn handle(&self, cmd: StartSessionCommand) -> Result<LevelSession, DomainError> {
        let level = load_level(self.levels.as_ref(), &cmd.level_id).await?;
        let session = LevelSession::start(cmd.user_id, level.id);
        self.sessions.create(&session).await?;
        Ok(session)
    }
}

#[derive(Debug, Clone)]
pub struct CompleteSessionCommand {
    pub actor: AuthenticatedUser,
    pub session_id: LevelSessionId,
    pub score: i32,
}

#[derive(Debug, Clone)]
pub struct CompletedSession {
    pub session: LevelSession,
    pub streak: Streak,
}

pub struct CompleteSessionHandler {
    sessions: Arc<dyn LevelSessionRepository>,
    users: Arc<dyn UserRepository>,
}

impl CompleteSessionHandler {
    pub fn new(sessions: Arc<dyn LevelSessionRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { sessions, users }
    }

    pub async fn handle(&self, cmd: CompleteSessionCommand) -> Result<CompletedSession, DomainError> {
        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(ErrorCode::SessionNotFound, "Level session not found")
            })?;
        if session.user_id != cmd.actor.id {
            return Err(DomainError::forbidden("You can only complete your own sessions"));
        }

        let now = Timestamp::now();
        session.complete(cmd.score, now)?;
        self.sessions.update(&session).await?;

        let mut user = load_user(self.users.as_ref(), &session.user_id).await?;
        user.record_activity(now.date());
        self.users.update(&user).await?;

        Ok(CompletedSession {
            session,
            streak: user.streak,
        })
    }
}

/// The caller's sessions, newest first.
pub struct ListSessionsHandler {
    sessions: Arc<dyn LevelSessionRepository>,
}

impl ListSessionsHandler {
    pub fn new(sessions: Arc<dyn LevelSessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, user_id: UserId) -> Result<Vec<LevelSession>, DomainError> {
        self.sessions.list_by_user(&user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::foundation::Role;
    use crate::domain::level::{Level, SessionStatus};

    async fn level(f: &Fixture) -> Level {
        let level = Level::new("es", "Greetings", "", 1).unwrap();
        LevelRepository::create(f.store.as_ref(), &level).await.unwrap();
        level
    }

    async fn started(f: &Fixture, user_id: UserId) -> LevelSession {
        let level = level(f).await;
        StartSessionHandler::new(f.store.clone(), f.store.clone())
            .handle(StartSessionCommand {
                user_id,
                level_id: level.id,
            })
            .await
            .unwrap()
    }

    fn complete(f: &Fixture) -> CompleteSessionHandler {
        CompleteSessionHandler::new(f.store.clone(), f.store.clone())
    }

    #[tokio::test]
    async fn start_requires_existing_level() {
        let f = Fixture::new();
        let err = StartSessionHandler::new(f.store.clone(), f.store.clone())
            .handle(StartSessionCommand {
                user_id: UserId::new(),
                level_id: LevelId::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::LevelNotFound);
    }

    #[tokio::test]
    async fn completing_records_score_and_streak() {
        let f = Fixture::new();
        let caller = f.caller("ana@example.com", Role::User).await;
        let session = started(&f, caller.id).await;

        let done = complete(&f)
            .handle(CompleteSessionCommand {
                actor: caller.clone(),
                session_id: session.id,
                score: 85,
            })
            .await
            .unwrap();

        assert_eq!(done.session.status, SessionStatus::Completed);
        assert_eq!(done.session.score, Some(85));
        assert_eq!(done.streak.current, 1);

        let listed = ListSessionsHandler::new(f.store.clone())
            .handle(caller.id)
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].status, SessionStatus::Completed);
    }

    #[tokio::test]
    async fn other_users_cannot_complete() {
        let f = Fixture::new();
        let owner = f.caller("ana@example.com", Role::User).await;
        let intruder = f.caller("eve@example.com", Role::User).await;
        let session = started(&f, owner.id).await;

        let err = complete(&f)
            .handle(CompleteSessionCommand {
                actor: intruder,
                session_id: session.id,
                score: 100,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn completing_twice_conflicts() {
        let f = Fixture::new();
        let caller = f.caller("ana@example.com", Role::User).await;
        let session = started(&f, caller.id).await;
        let cmd = CompleteSessionCommand {
            actor: caller,
            session_id: session.id,
            score: 70,
        };

        complete(&f).handle(cmd.clone()).await.unwrap();
        let err = complete(&f).handle(cmd).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }
}
