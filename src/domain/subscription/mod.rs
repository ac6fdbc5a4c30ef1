//! Subscriptions: plan catalogue and the per-user subscription lifecycle.

mod aggregate;
mod plan;

pub use aggregate::{Subscription, SubscriptionStatus};
pub use plan::Plan;
