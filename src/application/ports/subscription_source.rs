//! Port for reading subscriptions back from the payment provider.
//!
//! A checkout session only references its subscription by id; the price and
//! billing period live on the subscription's line items.

use async_trait::async_trait;

use crate::app_error::AppResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionLineItem {
    pub price_id: String,
    /// Unix seconds.
    pub current_period_start: Option<i64>,
    /// Unix seconds.
    pub current_period_end: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSubscription {
    pub id: String,
    pub status: String,
    pub items: Vec<SubscriptionLineItem>,
}

impl ProviderSubscription {
    /// The first line item decides the plan.
    pub fn primary_item(&self) -> Option<&SubscriptionLineItem> {
        self.items.first()
    }
}

#[async_trait]
pub trait SubscriptionSource: Send + Sync {
    async fn get_subscription(&self, subscription_id: &str) -> AppResult<ProviderSubscription>;
}
