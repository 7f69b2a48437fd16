//! Stripe webhook endpoint.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use secrecy::ExposeSecret;
use serde::Serialize;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    infra::stripe_client::{StripeClient, StripeWebhookEvent},
};

const STRIPE_SIGNATURE_HEADER: &str = "stripe-signature";

#[derive(Serialize)]
struct Ack {
    received: bool,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/stripe", post(handle_stripe_webhook))
}

/// POST /api/webhooks/stripe
///
/// The body is taken as a raw string so the signature is checked against the
/// exact bytes Stripe signed.
async fn handle_stripe_webhook(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> AppResult<impl IntoResponse> {
    let signature = headers
        .get(STRIPE_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Signature("Missing Stripe-Signature header".into()))?;

    StripeClient::verify_webhook_signature(
        &body,
        signature,
        app_state.config.stripe_webhook_secret.expose_secret(),
        app_state.config.webhook_tolerance_secs,
    )?;

    let event: StripeWebhookEvent = serde_json::from_str(&body)
        .map_err(|e| AppError::Validation(format!("Invalid webhook payload: {}", e)))?;

    tracing::info!(event_id = %event.id, event_type = %event.event_type, "Received Stripe webhook");

    let billing_event = event.to_billing_event()?;

    app_state
        .billing_webhook_use_cases
        .handle_event(&billing_event)
        .await?;

    Ok((StatusCode::OK, Json(Ack { received: true })))
}
