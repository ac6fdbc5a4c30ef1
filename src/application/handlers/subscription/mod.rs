//! Subscription plans and the per-user subscription lifecycle.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::subscription::{Plan, Subscription};
use crate::ports::SubscriptionRepository;

/// The plan catalogue, cheapest first.
pub fn list_plans() -> &'static [Plan] {
    &Plan::ALL
}

/// Current subscription, with a lapsed paid period reported as expired.
pub struct GetSubscriptionHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl GetSubscriptionHandler {
    pub fn new(subscriptions: Arc<dyn SubscriptionRepository>) -> Self {
        Self { subscriptions }
    }

    pub async fn handle(&self, user_id: UserId) -> Result<Option<Subscription>, DomainError> {
        let Some(mut subscription) = self.subscriptions.find_by_user(&user_id).await? else {
            return Ok(None);
        };
        let before = subscription.status;
        subscription.refresh(Timestamp::now());
        if subscription.status != before {
            self.subscriptions.save(&subscription).await?;
        }
        Ok(Some(subscription))
    }
}

#[derive(Debug, Clone)]
pub struct SubscribeCommand {
    pub user_id: UserId,
    pub plan: Plan,
}

pub struct SubscribeHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl SubscribeHandler {
    pub fn new(subscriptions: Arc<dyn SubscriptionRepository>) -> Self {
        Self { subscriptions }
    }

    pub async fn handle(&self, cmd: SubscribeCommand) -> Result<Subscription, DomainError> {
        let now = Timestamp::now();
        let subscription = match self.subscriptions.find_by_user(&cmd.user_id).await? {
            Some(mut existing) => {
                existing.renew(cmd.plan, now)?;
                existing
            }
            None => Subscription::start(cmd.user_id, cmd.plan, now),
        };
        self.subscriptions.save(&subscription).await?;
        tracing::info!(user_id = %cmd.user_id, plan = %cmd.plan.as_str(), "subscription started");
        Ok(subscription)
    }
}

pub struct CancelSubscriptionHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl CancelSubscriptionHandler {
    pub fn new(subscriptions: Arc<dyn SubscriptionRepository>) -> Self {
        Self { subscriptions }
    }

    pub async fn handle(&self, user_id: UserId) -> Result<Subscription, DomainError> {
        let mut subscription = self
            .subscriptions
            .find_by_user(&user_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(ErrorCode::SubscriptionNotFound, "No subscription found")
            })?;
        subscription.cancel(Timestamp::now())?;
        self.subscriptions.save(&subscription).await?;
        Ok(subscription)
    }
}
