use std::net::SocketAddr;

use env_helpers::{get_env, get_env_default};
use secrecy::SecretString;
use url::Url;

use crate::infra::stripe_client::DEFAULT_WEBHOOK_TOLERANCE_SECS;

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    /// Secret API key used to read subscriptions back from Stripe.
    pub stripe_secret_key: SecretString,
    /// Endpoint signing secret (`whsec_...`) for the `Stripe-Signature` header.
    pub stripe_webhook_secret: SecretString,
    pub stripe_price_basic: String,
    pub stripe_price_pro: String,
    /// Maximum age of a signed webhook timestamp, in seconds.
    pub webhook_tolerance_secs: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr: SocketAddr =
            get_env_default("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3001)));
        let database_url: String = get_env("DATABASE_URL");
        let stripe_secret_key = SecretString::new(get_env::<String>("STRIPE_SECRET_KEY").into());
        let stripe_webhook_secret =
            SecretString::new(get_env::<String>("STRIPE_WEBHOOK_SECRET").into());
        let stripe_price_basic: String = get_env("STRIPE_PRICE_BASIC");
        let stripe_price_pro: String = get_env("STRIPE_PRICE_PRO");
        let webhook_tolerance_secs: i64 =
            get_env_default("WEBHOOK_TOLERANCE_SECS", DEFAULT_WEBHOOK_TOLERANCE_SECS);

        Self {
            bind_addr,
            database_url,
            stripe_secret_key,
            stripe_webhook_secret,
            stripe_price_basic,
            stripe_price_pro,
            webhook_tolerance_secs,
        }
    }
}

/// Settings for the one-shot `send_email` binary.
pub struct EmailConfig {
    pub resend_api_key: SecretString,
    pub email_from: String,
    pub email_to: String,
    pub app_name: String,
    pub app_origin: Url,
    /// Plan named in the email (`basic` or `pro`).
    pub plan: String,
}

impl EmailConfig {
    pub fn from_env() -> Self {
        let resend_api_key = SecretString::new(get_env::<String>("RESEND_API_KEY").into());
        let email_from: String = get_env("EMAIL_FROM");
        let email_to: String = get_env("EMAIL_TO");
        let app_name: String = get_env_default("APP_NAME", "Plan Points".to_string());
        let app_origin: Url = get_env("APP_ORIGIN");
        let plan: String = get_env_default("EMAIL_PLAN", "pro".to_string());

        Self {
            resend_api_key,
            email_from,
            email_to,
            app_name,
            app_origin,
            plan,
        }
    }
}
