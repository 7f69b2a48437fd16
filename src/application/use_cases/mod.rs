pub mod billing_webhook;
pub mod notification;
