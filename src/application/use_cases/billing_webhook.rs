use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{debug, info, instrument};

use crate::{
    app_error::{AppError, AppResult},
    application::ports::{
        billing_event::{BillingEvent, CheckoutCompleted},
        subscription_source::SubscriptionSource,
    },
    domain::entities::{plan::PlanCatalog, subscription::SubscriptionRecord},
};

#[async_trait]
pub trait SubscriptionRepo: Send + Sync {
    /// Insert the user's subscription, or replace the existing one.
    async fn create_or_update_subscription(&self, record: &SubscriptionRecord) -> AppResult<()>;
    /// Set the user's point balance to `points`.
    async fn update_user_points(&self, user_id: &str, points: i64) -> AppResult<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    SubscriptionActivated {
        user_id: String,
        plan: String,
        points: i64,
    },
    Ignored {
        event_type: String,
    },
}

/// Convert a Unix timestamp to NaiveDateTime
fn timestamp_to_naive(secs: i64) -> Option<NaiveDateTime> {
    DateTime::<Utc>::from_timestamp(secs, 0).map(|dt| dt.naive_utc())
}

#[derive(Clone)]
pub struct BillingWebhookUseCases {
    subscription_repo: Arc<dyn SubscriptionRepo>,
    subscription_source: Arc<dyn SubscriptionSource>,
    catalog: PlanCatalog,
}

impl BillingWebhookUseCases {
    pub fn new(
        subscription_repo: Arc<dyn SubscriptionRepo>,
        subscription_source: Arc<dyn SubscriptionSource>,
        catalog: PlanCatalog,
    ) -> Self {
        Self {
            subscription_repo,
            subscription_source,
            catalog,
        }
    }

    /// Dispatch a verified event. Anything but a completed checkout is
    /// acknowledged without side effects.
    pub async fn handle_event(&self, event: &BillingEvent) -> AppResult<WebhookOutcome> {
        match event {
            BillingEvent::CheckoutCompleted(checkout) => {
                self.handle_checkout_completed(checkout).await
            }
            BillingEvent::Unhandled { event_type } => {
                debug!("Unhandled webhook event type: {}", event_type);
                Ok(WebhookOutcome::Ignored {
                    event_type: event_type.clone(),
                })
            }
        }
    }

    #[instrument(skip(self, checkout), fields(session_id = %checkout.session_id))]
    pub async fn handle_checkout_completed(
        &self,
        checkout: &CheckoutCompleted,
    ) -> AppResult<WebhookOutcome> {
        let user_id = checkout.user_id.as_deref().ok_or_else(|| {
            AppError::Validation("Missing user reference (client_reference_id)".into())
        })?;
        let subscription_id = checkout
            .subscription_id
            .as_deref()
            .ok_or_else(|| AppError::Validation("Missing subscription reference".into()))?;

        let subscription = self
            .subscription_source
            .get_subscription(subscription_id)
            .await?;

        let item = subscription.primary_item().ok_or_else(|| {
            AppError::Validation(format!("Subscription {} has no line items", subscription.id))
        })?;

        let plan = *self
            .catalog
            .lookup(&item.price_id)
            .ok_or_else(|| AppError::UnknownPlan(item.price_id.clone()))?;

        let record = SubscriptionRecord {
            user_id: user_id.to_string(),
            stripe_subscription_id: subscription_id.to_string(),
            plan: plan.name.to_string(),
            current_period_start: item.current_period_start.and_then(timestamp_to_naive),
            current_period_end: item.current_period_end.and_then(timestamp_to_naive),
        };

        self.subscription_repo
            .create_or_update_subscription(&record)
            .await
            .map_err(AppError::into_persistence)?;

        self.subscription_repo
            .update_user_points(user_id, plan.points)
            .await
            .map_err(AppError::into_persistence)?;

        info!(
            user_id,
            subscription_id,
            status = %subscription.status,
            plan = plan.name,
            points = plan.points,
            "Subscription activated"
        );

        Ok(WebhookOutcome::SubscriptionActivated {
            user_id: user_id.to_string(),
            plan: plan.name.to_string(),
            points: plan.points,
        })
    }
}
