//! Test data factories.
//!
//! Each factory creates a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed.

use chrono::{DateTime, NaiveDateTime};

use crate::{
    application::ports::subscription_source::{ProviderSubscription, SubscriptionLineItem},
    infra::stripe_client::StripeClient,
};

pub const TEST_PERIOD_START: i64 = 1_700_000_000;
pub const TEST_PERIOD_END: i64 = 1_702_592_000;

/// Create a provider subscription with one line item for `price_id`.
pub fn create_test_subscription(
    id: &str,
    price_id: &str,
    overrides: impl FnOnce(&mut ProviderSubscription),
) -> ProviderSubscription {
    let mut subscription = ProviderSubscription {
        id: id.to_string(),
        status: "active".to_string(),
        items: vec![SubscriptionLineItem {
            price_id: price_id.to_string(),
            current_period_start: Some(TEST_PERIOD_START),
            current_period_end: Some(TEST_PERIOD_END),
        }],
    };
    overrides(&mut subscription);
    subscription
}

/// A Stripe event envelope of `event_type` wrapping `object`.
pub fn test_event(event_type: &str, object: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "id": "evt_test_1",
        "object": "event",
        "type": event_type,
        "livemode": false,
        "data": { "object": object }
    })
}

pub fn checkout_completed_event(user_id: &str, subscription_id: &str) -> serde_json::Value {
    test_event(
        "checkout.session.completed",
        serde_json::json!({
            "id": "cs_test_1",
            "object": "checkout.session",
            "mode": "subscription",
            "customer": "cus_test_1",
            "client_reference_id": user_id,
            "subscription": subscription_id
        }),
    )
}

/// A `Stripe-Signature` header for `payload`, signed now with `secret`.
pub fn signature_header(payload: &str, secret: &str) -> String {
    let ts = chrono::Utc::now().timestamp();
    let sig = StripeClient::compute_signature(ts, payload, secret).unwrap();
    format!("t={},v1={}", ts, sig)
}

pub fn test_datetime_from(secs: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(secs, 0).map(|dt| dt.naive_utc())
}
