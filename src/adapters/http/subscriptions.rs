//! HTTP adapter for the plan catalogue and the caller's subscription.

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::response::{ApiResponse, ApiResult};
use crate::adapters::http::state::AppState;
use crate::application::handlers::subscription::{list_plans, SubscribeCommand};
use crate::domain::foundation::Timestamp;
use crate::domain::subscription::{Plan, Subscription, SubscriptionStatus};

#[derive(Debug, Clone, Serialize)]
pub struct PlanResponse {
    pub plan: Plan,
    pub name: &'static str,
    pub price_cents: i64,
    pub duration_days: Option<i64>,
}

impl From<Plan> for PlanResponse {
    fn from(plan: Plan) -> Self {
        Self {
            plan,
            name: plan.display_name(),
            price_cents: plan.price_cents(),
            duration_days: plan.duration_days(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubscribeRequest {
    pub plan: Plan,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionResponse {
    pub id: String,
    pub plan: Plan,
    pub status: SubscriptionStatus,
    pub has_premium_access: bool,
    pub started_at: String,
    pub ends_at: Option<String>,
    pub cancelled_at: Option<String>,
}

impl SubscriptionResponse {
    fn at(subscription: Subscription, now: Timestamp) -> Self {
        Self {
            id: subscription.id.to_string(),
            plan: subscription.plan,
            status: subscription.effective_status(now),
            has_premium_access: subscription.has_premium_access(now),
            started_at: subscription.started_at.to_rfc3339(),
            ends_at: subscription.ends_at.map(|t| t.to_rfc3339()),
            cancelled_at: subscription.cancelled_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// GET /api/subscriptions/plans
pub async fn plans() -> ApiResult<Vec<PlanResponse>> {
    let plans: Vec<PlanResponse> = list_plans()
        .iter()
        .copied()
        .map(PlanResponse::from)
        .collect();
    Ok(ApiResponse::ok("Plans retrieved", plans))
}

/// GET /api/subscriptions/me
pub async fn my_subscription(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> ApiResult<Option<SubscriptionResponse>> {
    let subscription = state.get_subscription_handler().handle(user.id).await?;
    let now = Timestamp::now();
    Ok(ApiResponse::ok(
        "Subscription retrieved",
        subscription.map(|s| SubscriptionResponse::at(s, now)),
    ))
}

/// POST /api/subscriptions
pub async fn subscribe(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(req): ApiJson<SubscribeRequest>,
) -> ApiResult<SubscriptionResponse> {
    let subscription = state
        .subscribe_handler()
        .handle(SubscribeCommand {
            user_id: user.id,
            plan: req.plan,
        })
        .await?;
    Ok(ApiResponse::created(
        "Subscribed",
        SubscriptionResponse::at(subscription, Timestamp::now()),
    ))
}

/// POST /api/subscriptions/cancel
pub async fn cancel(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> ApiResult<SubscriptionResponse> {
    let subscription = state.cancel_subscription_handler().handle(user.id).await?;
    Ok(ApiResponse::ok(
        "Subscription cancelled",
        SubscriptionResponse::at(subscription, Timestamp::now()),
    ))
}

pub fn subscription_routes() -> Router<AppState> {
    Router::new()
        .route("/subscriptions", post(subscribe))
        .route("/subscriptions/plans", get(plans))
        .route("/subscriptions/me", get(my_subscription))
        .route("/subscriptions/cancel", post(cancel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    #[test]
    fn cancelled_subscription_still_reports_access() {
        let now = Timestamp::now();
        let mut subscription = Subscription::start(UserId::new(), Plan::Monthly, now);
        subscription.cancel(now).unwrap();

        let response = SubscriptionResponse::at(subscription, now.add_days(1));
        assert_eq!(response.status, SubscriptionStatus::Cancelled);
        assert!(response.has_premium_access);
        assert!(response.cancelled_at.is_some());
    }

    #[test]
    fn plan_catalogue_prices() {
        let monthly = PlanResponse::from(Plan::Monthly);
        assert_eq!(monthly.price_cents, 999);
        assert_eq!(monthly.duration_days, Some(30));
        assert_eq!(PlanResponse::from(Plan::Free).duration_days, None);
    }
}
