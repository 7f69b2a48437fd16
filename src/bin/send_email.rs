//! Sends one "plan activated" email through Resend.
//!
//! Reads `RESEND_API_KEY`, `EMAIL_FROM`, `EMAIL_TO`, `APP_ORIGIN` and
//! optionally `APP_NAME` / `EMAIL_PLAN` from the environment (or `.env`).

use std::sync::Arc;

use dotenvy::dotenv;
use tracing::info;

use plan_points::{
    adapters::email::resend::ResendEmailSender,
    infra::{config::EmailConfig, setup::init_tracing},
    use_cases::notification::NotificationUseCases,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let config = EmailConfig::from_env();

    let sender = Arc::new(ResendEmailSender::new(
        config.resend_api_key.clone(),
        config.email_from.clone(),
    ));
    let notifications =
        NotificationUseCases::new(sender, config.app_name.clone(), config.app_origin.to_string());

    notifications
        .send_plan_activated(&config.email_to, &config.plan)
        .await?;

    info!(to = %config.email_to, "Email sent");
    Ok(())
}
