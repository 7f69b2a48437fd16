use std::sync::Arc;

use crate::{infra::config::AppConfig, use_cases::billing_webhook::BillingWebhookUseCases};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub billing_webhook_use_cases: Arc<BillingWebhookUseCases>,
}
