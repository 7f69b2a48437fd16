use chrono::NaiveDateTime;

/// Row written by `create_or_update_subscription`, one per user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRecord {
    pub user_id: String,
    pub stripe_subscription_id: String,
    pub plan: String,
    pub current_period_start: Option<NaiveDateTime>,
    pub current_period_end: Option<NaiveDateTime>,
}
