//! Subscription aggregate.
//!
//! Each user has at most one subscription row; resubscribing renews it in
//! place.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{DomainError, ErrorCode, SubscriptionId, Timestamp, UserId};

use super::Plan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    /// Cancelled by the user; paid access continues until `ends_at`.
    Cancelled,
    Expired,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Cancelled => "cancelled",
            SubscriptionStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(SubscriptionStatus::Active),
            "cancelled" => Ok(SubscriptionStatus::Cancelled),
            "expired" => Ok(SubscriptionStatus::Expired),
            other => Err(format!("Invalid subscription status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub user_id: UserId,
    pub plan: Plan,
    pub status: SubscriptionStatus,
    pub started_at: Timestamp,
    pub ends_at: Option<Timestamp>,
    pub cancelled_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Subscription {
    /// Starts a new subscription period beginning at `now`.
    pub fn start(user_id: UserId, plan: Plan, now: Timestamp) -> Self {
        Self {
            id: SubscriptionId::new(),
            user_id,
            plan,
            status: SubscriptionStatus::Active,
            started_at: now,
            ends_at: plan.duration_days().map(|days| now.add_days(days)),
            cancelled_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Status after accounting for a lapsed period.
    pub fn effective_status(&self, now: Timestamp) -> SubscriptionStatus {
        match self.ends_at {
            Some(ends_at) if now.is_after(&ends_at) => SubscriptionStatus::Expired,
            _ => self.status,
        }
    }

    /// Brings the stored status up to date with the clock.
    pub fn refresh(&mut self, now: Timestamp) {
        let effective = self.effective_status(now);
        if effective != self.status {
            self.status = effective;
            self.updated_at = now;
        }
    }

    /// True while a paid plan is active or cancelled-but-unexpired.
    pub fn has_premium_access(&self, now: Timestamp) -> bool {
        self.plan.is_paid()
            && matches!(
                self.effective_status(now),
                SubscriptionStatus::Active | SubscriptionStatus::Cancelled
            )
    }

    /// Starts a fresh period on `plan`.
    ///
    /// # Errors
    ///
    /// `Conflict` while a paid plan is still active; cancel it first.
    pub fn renew(&mut self, plan: Plan, now: Timestamp) -> Result<(), DomainError> {
        if self.plan.is_paid() && self.effective_status(now) == SubscriptionStatus::Active {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "You already have an active subscription",
            ));
        }
        self.plan = plan;
        self.status = SubscriptionStatus::Active;
        self.started_at = now;
        self.ends_at = plan.duration_days().map(|days| now.add_days(days));
        self.cancelled_at = None;
        self.updated_at = now;
        Ok(())
    }

    /// Cancels at period end.
    pub fn cancel(&mut self, now: Timestamp) -> Result<(), DomainError> {
        if self.effective_status(now) != SubscriptionStatus::Active {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Only an active subscription can be cancelled",
            ));
        }
        self.status = SubscriptionStatus::Cancelled;
        self.cancelled_at = Some(now);
        self.updated_at = now;
        Ok(())
    }
}
