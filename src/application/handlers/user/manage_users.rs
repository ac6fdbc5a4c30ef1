//! Admin listing and deletion of accounts.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, Page, PageRequest, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

#[derive(Debug, Clone, Copy, Default)]
pub struct ListUsersQuery {
    pub page: PageRequest,
}

pub struct ListUsersHandler {
    users: Arc<dyn UserRepository>,
}

impl ListUsersHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: ListUsersQuery) -> Result<Page<User>, DomainError> {
        self.users.list(query.page).await
    }
}

#[derive(Debug, Clone)]
pub struct DeleteUserCommand {
    pub actor: AuthenticatedUser,
    pub user_id: UserId,
}

/// Deletes an account and everything it owns.
pub struct DeleteUserHandler {
    users: Arc<dyn UserRepository>,
}

impl DeleteUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: DeleteUserCommand) -> Result<(), DomainError> {
        self.users.delete(&cmd.user_id).await?;
        tracing::info!(user_id = %cmd.user_id, deleted_by = %cmd.actor.id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::foundation::{ErrorCode, Role};

    #[tokio::test]
    async fn lists_users_page_by_page() {
        let f = Fixture::new();
        for i in 0..3 {
            f.user(&format!("user{}@example.com", i), Role::User).await;
        }

        let page = ListUsersHandler::new(f.store.clone())
            .handle(ListUsersQuery {
                page: PageRequest::new(Some(2), Some(2)).unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn delete_removes_user_and_reports_missing() {
        let f = Fixture::new();
        let admin = f.caller("admin@example.com", Role::Admin).await;
        let victim = f.user("ana@example.com", Role::User).await;
        let handler = DeleteUserHandler::new(f.store.clone());

        handler
            .handle(DeleteUserCommand {
                actor: admin.clone(),
                user_id: victim.id,
            })
            .await
            .unwrap();
        assert_eq!(f.store.user_count().await, 1);

        let err = handler
            .handle(DeleteUserCommand {
                actor: admin,
                user_id: victim.id,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
    }
}
