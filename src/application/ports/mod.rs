pub mod billing_event;
pub mod subscription_source;
