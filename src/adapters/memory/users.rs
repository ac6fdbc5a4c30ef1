use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, Page, PageRequest, UserId};
use crate::domain::user::{Email, User};
use crate::ports::UserRepository;

use super::InMemoryStore;

fn email_taken() -> DomainError {
    DomainError::new(ErrorCode::EmailTaken, "Email is already registered")
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        let mut tables = self.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(email_taken());
        }
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut tables = self.write().await;
        if !tables.users.contains_key(&user.id) {
            return Err(DomainError::not_found(ErrorCode::UserNotFound, "User not found"));
        }
        if tables
            .users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(email_taken());
        }
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.read().await.users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        Ok(self
            .read()
            .await
            .users
            .values()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, DomainError> {
        let mut users: Vec<User> = self.read().await.users.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(Page::from_vec(users, page))
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let mut tables = self.write().await;
        if !tables.users.contains_key(id) {
            return Err(DomainError::not_found(ErrorCode::UserNotFound, "User not found"));
        }
        tables.delete_user_cascade(id);
        Ok(())
    }
}
