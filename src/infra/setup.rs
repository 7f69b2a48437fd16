use crate::{
    adapters::http::app_state::AppState,
    application::use_cases::billing_webhook::{BillingWebhookUseCases, SubscriptionRepo},
    domain::entities::plan::PlanCatalog,
    infra::{config::AppConfig, postgres_persistence, stripe_client::StripeClient},
};
use std::fs::File;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env();

    let postgres_arc = Arc::new(postgres_persistence(&config.database_url).await?);

    let stripe = Arc::new(StripeClient::new(config.stripe_secret_key.clone()));

    let catalog = PlanCatalog::new(
        config.stripe_price_basic.clone(),
        config.stripe_price_pro.clone(),
    );

    let billing_webhook_use_cases = BillingWebhookUseCases::new(
        postgres_arc as Arc<dyn SubscriptionRepo>,
        stripe,
        catalog,
    );

    Ok(AppState {
        config: Arc::new(config),
        billing_webhook_use_cases: Arc::new(billing_webhook_use_cases),
    })
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "plan_points=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs), skipped when the working directory is read-only
    let json_layer = File::create("app.log").ok().map(|file| {
        fmt::layer()
            .json()
            .with_writer(file)
            .with_current_span(true)
            .with_span_list(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
