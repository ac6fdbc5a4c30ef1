//! Subscription repository port.
//!
//! Each user has at most one subscription row, so the user id is the
//! primary lookup key.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::subscription::Subscription;

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Insert or replace the user's subscription.
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError>;

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Subscription>, DomainError>;
}
