use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or mismatching `Stripe-Signature` header.
    #[error("Signature error: {0}")]
    Signature(String),

    /// The event body or the checkout session lacks a required field.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The subscription's price identifier is not in the plan catalog.
    #[error("Unknown price identifier: {0}")]
    UnknownPlan(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    /// The payment provider's API could not be reached or refused the request.
    #[error("Payment provider error: {0}")]
    Provider(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Human-readable summary placed in the `error` field of a JSON response.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::Signature(_) => "Webhook signature verification failed",
            AppError::Validation(_) => "Invalid webhook payload",
            AppError::UnknownPlan(_) => "Unknown price identifier",
            AppError::Persistence(_) => "Failed to persist subscription",
            AppError::Provider(_) => "Payment provider request failed",
            AppError::Internal(_) => "Internal error",
        }
    }

    /// Client errors are safe to echo back as `details`; server errors are not.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Signature(_) | AppError::Validation(_) | AppError::UnknownPlan(_)
        )
    }

    /// Re-tags any failure as a persistence failure, keeping its message.
    pub fn into_persistence(self) -> Self {
        match self {
            AppError::Persistence(msg) => AppError::Persistence(msg),
            other => AppError::Persistence(other.to_string()),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
