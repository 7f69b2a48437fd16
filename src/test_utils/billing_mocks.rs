//! In-memory mock implementations for the billing ports.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::{
    app_error::{AppError, AppResult},
    application::{
        ports::subscription_source::{ProviderSubscription, SubscriptionSource},
        use_cases::billing_webhook::SubscriptionRepo,
    },
    domain::entities::subscription::SubscriptionRecord,
};

// ============================================================================
// InMemorySubscriptionRepo
// ============================================================================

/// A persistence call as observed by the repo, in invocation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoCall {
    CreateOrUpdateSubscription(SubscriptionRecord),
    UpdateUserPoints { user_id: String, points: i64 },
}

#[derive(Default)]
pub struct InMemorySubscriptionRepo {
    pub calls: Mutex<Vec<RepoCall>>,
    pub subscriptions: Mutex<HashMap<String, SubscriptionRecord>>,
    pub points: Mutex<HashMap<String, i64>>,
    fail_subscription: bool,
    fail_points: bool,
}

impl InMemorySubscriptionRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `create_or_update_subscription` call fails.
    pub fn failing_subscription() -> Self {
        Self {
            fail_subscription: true,
            ..Self::default()
        }
    }

    /// Every `update_user_points` call fails.
    pub fn failing_points() -> Self {
        Self {
            fail_points: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<RepoCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn points_for(&self, user_id: &str) -> Option<i64> {
        self.points.lock().unwrap().get(user_id).copied()
    }
}

#[async_trait]
impl SubscriptionRepo for InMemorySubscriptionRepo {
    async fn create_or_update_subscription(&self, record: &SubscriptionRecord) -> AppResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push(RepoCall::CreateOrUpdateSubscription(record.clone()));
        if self.fail_subscription {
            return Err(AppError::Persistence("subscriptions table unavailable".into()));
        }
        self.subscriptions
            .lock()
            .unwrap()
            .insert(record.user_id.clone(), record.clone());
        Ok(())
    }

    async fn update_user_points(&self, user_id: &str, points: i64) -> AppResult<()> {
        self.calls.lock().unwrap().push(RepoCall::UpdateUserPoints {
            user_id: user_id.to_string(),
            points,
        });
        if self.fail_points {
            return Err(AppError::Internal("user_points table unavailable".into()));
        }
        self.points
            .lock()
            .unwrap()
            .insert(user_id.to_string(), points);
        Ok(())
    }
}

// ============================================================================
// InMemorySubscriptionSource
// ============================================================================

#[derive(Default)]
pub struct InMemorySubscriptionSource {
    pub subscriptions: Mutex<HashMap<String, ProviderSubscription>>,
}

impl InMemorySubscriptionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subscriptions(subscriptions: Vec<ProviderSubscription>) -> Self {
        let map = subscriptions
            .into_iter()
            .map(|s| (s.id.clone(), s))
            .collect();
        Self {
            subscriptions: Mutex::new(map),
        }
    }
}

#[async_trait]
impl SubscriptionSource for InMemorySubscriptionSource {
    async fn get_subscription(&self, subscription_id: &str) -> AppResult<ProviderSubscription> {
        self.subscriptions
            .lock()
            .unwrap()
            .get(subscription_id)
            .cloned()
            .ok_or_else(|| {
                AppError::Provider(format!("Stripe error: No such subscription: '{subscription_id}'"))
            })
    }
}
