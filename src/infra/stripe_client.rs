use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha2::Sha256;

use crate::{
    app_error::{AppError, AppResult},
    application::ports::{
        billing_event::{BillingEvent, CheckoutCompleted},
        subscription_source::{ProviderSubscription, SubscriptionLineItem, SubscriptionSource},
    },
    infra::http_client,
};

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

pub const CHECKOUT_SESSION_COMPLETED: &str = "checkout.session.completed";

/// Default tolerance between the signed timestamp and now, in seconds.
pub const DEFAULT_WEBHOOK_TOLERANCE_SECS: i64 = 300;

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    secret_key: SecretString,
}

impl StripeClient {
    pub fn new(secret_key: SecretString) -> Self {
        Self {
            client: http_client::build_client(),
            secret_key,
        }
    }

    fn auth_header(&self) -> String {
        use base64::Engine;
        let encoded = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:", self.secret_key.expose_secret()));
        format!("Basic {}", encoded)
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    pub async fn get_subscription(&self, subscription_id: &str) -> AppResult<StripeSubscription> {
        let response = self
            .client
            .get(format!("{}/subscriptions/{}", STRIPE_API_BASE, subscription_id))
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("Stripe request failed: {}", e)))?;

        self.handle_response(response).await
    }

    // ========================================================================
    // Webhooks
    // ========================================================================

    /// Verify a `Stripe-Signature` header against the raw request body.
    ///
    /// Header format: `t=<unix seconds>,v1=<hex hmac>[,v1=...]`. Any `v1` entry
    /// may match (Stripe sends several while a secret is being rolled).
    pub fn verify_webhook_signature(
        payload: &str,
        signature_header: &str,
        webhook_secret: &str,
        tolerance_secs: i64,
    ) -> AppResult<()> {
        let mut timestamp: Option<&str> = None;
        let mut signatures: Vec<&str> = Vec::new();

        for part in signature_header.split(',') {
            let Some((key, value)) = part.trim().split_once('=') else {
                continue;
            };
            match key {
                "t" => timestamp = Some(value),
                "v1" => signatures.push(value),
                _ => {}
            }
        }

        let timestamp = timestamp
            .ok_or_else(|| AppError::Signature("Missing timestamp in signature".into()))?;

        if signatures.is_empty() {
            return Err(AppError::Signature("Missing v1 signature".into()));
        }

        let ts: i64 = timestamp
            .parse()
            .map_err(|_| AppError::Signature("Invalid timestamp".into()))?;

        let mac = signing_mac(ts, payload, webhook_secret)?;
        let matched = signatures.iter().any(|sig| {
            hex::decode(sig)
                .map(|bytes| mac.clone().verify_slice(&bytes).is_ok())
                .unwrap_or(false)
        });

        if !matched {
            return Err(AppError::Signature("Invalid signature".into()));
        }

        let now = chrono::Utc::now().timestamp();
        if now.abs_diff(ts) > tolerance_secs.unsigned_abs() {
            return Err(AppError::Signature("Timestamp outside tolerance".into()));
        }

        Ok(())
    }

    /// Compute the hex `v1` signature Stripe would send for `payload` at `timestamp`.
    pub fn compute_signature(timestamp: i64, payload: &str, webhook_secret: &str) -> AppResult<String> {
        let mac = signing_mac(timestamp, payload, webhook_secret)?;
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> AppResult<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Provider(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            tracing::error!(status = %status, body = %body, "Stripe API error");

            if let Ok(error) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(AppError::Provider(format!(
                    "Stripe error: {}",
                    error.error.message.unwrap_or(error.error.error_type)
                )));
            }

            return Err(AppError::Provider(format!(
                "Stripe API error: {} - {}",
                status, body
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(body = %body, error = %e, "Failed to parse Stripe response");
            AppError::Provider(format!("Failed to parse Stripe response: {}", e))
        })
    }
}

fn signing_mac(timestamp: i64, payload: &str, webhook_secret: &str) -> AppResult<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(webhook_secret.as_bytes())
        .map_err(|_| AppError::Internal("HMAC error".into()))?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload.as_bytes());
    Ok(mac)
}

#[async_trait]
impl SubscriptionSource for StripeClient {
    async fn get_subscription(&self, subscription_id: &str) -> AppResult<ProviderSubscription> {
        let sub = StripeClient::get_subscription(self, subscription_id).await?;
        Ok(sub.into())
    }
}

// ============================================================================
// Stripe Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StripePrice {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct StripeCheckoutSession {
    pub id: String,
    pub subscription: Option<String>,
    pub client_reference_id: Option<String>,
    #[serde(default)]
    pub metadata: std::collections::HashMap<String, String>,
}

impl StripeCheckoutSession {
    /// The user this checkout was started for: `client_reference_id`, else
    /// `metadata.user_id`. Blank values count as missing.
    pub fn user_reference(&self) -> Option<&str> {
        non_blank(self.client_reference_id.as_deref())
            .or_else(|| non_blank(self.metadata.get("user_id").map(String::as_str)))
    }

    pub fn subscription_reference(&self) -> Option<&str> {
        non_blank(self.subscription.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Debug, Deserialize)]
pub struct StripeSubscription {
    pub id: String,
    pub status: String,
    // Older API versions carry the period on the subscription, newer ones on each item.
    pub current_period_start: Option<i64>,
    pub current_period_end: Option<i64>,
    pub items: StripeSubscriptionItems,
}

#[derive(Debug, Deserialize)]
pub struct StripeSubscriptionItems {
    pub data: Vec<StripeSubscriptionItem>,
}

#[derive(Debug, Deserialize)]
pub struct StripeSubscriptionItem {
    pub price: StripePrice,
    pub current_period_start: Option<i64>,
    pub current_period_end: Option<i64>,
}

impl From<StripeSubscription> for ProviderSubscription {
    fn from(sub: StripeSubscription) -> Self {
        let items = sub
            .items
            .data
            .into_iter()
            .map(|item| SubscriptionLineItem {
                price_id: item.price.id,
                current_period_start: item.current_period_start.or(sub.current_period_start),
                current_period_end: item.current_period_end.or(sub.current_period_end),
            })
            .collect();

        ProviderSubscription {
            id: sub.id,
            status: sub.status,
            items,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StripeErrorResponse {
    pub error: StripeError,
}

#[derive(Debug, Deserialize)]
pub struct StripeError {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: Option<String>,
}

// ============================================================================
// Webhook Event Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StripeWebhookEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: StripeWebhookEventData,
}

#[derive(Debug, Deserialize)]
pub struct StripeWebhookEventData {
    pub object: serde_json::Value,
}

impl StripeWebhookEvent {
    pub fn get_checkout_session(&self) -> Option<StripeCheckoutSession> {
        serde_json::from_value(self.data.object.clone()).ok()
    }

    /// Reduce the event to what the billing use cases act on.
    pub fn to_billing_event(&self) -> AppResult<BillingEvent> {
        if self.event_type != CHECKOUT_SESSION_COMPLETED {
            return Ok(BillingEvent::Unhandled {
                event_type: self.event_type.clone(),
            });
        }

        let session = self
            .get_checkout_session()
            .ok_or_else(|| AppError::Validation("Malformed checkout session object".into()))?;

        Ok(BillingEvent::CheckoutCompleted(CheckoutCompleted {
            user_id: session.user_reference().map(str::to_string),
            subscription_id: session.subscription_reference().map(str::to_string),
            session_id: session.id,
        }))
    }
}
