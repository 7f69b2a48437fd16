use crate::app_error::AppError;
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error before it gets converted into a status response.
        if self.is_client_error() {
            tracing::warn!(error = %self, "Webhook rejected");
        } else {
            tracing::error!(error = ?self, "Webhook processing failed");
        }

        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let details = match &self {
            AppError::Signature(msg) | AppError::Validation(msg) => Some(msg.clone()),
            AppError::UnknownPlan(price_id) => Some(format!("No plan for price {price_id}")),
            AppError::Persistence(_) | AppError::Provider(_) | AppError::Internal(_) => None,
        };

        error_resp(status, self.public_message(), details)
    }
}

fn error_resp(status: StatusCode, error: &str, details: Option<String>) -> Response {
    let body = match details {
        Some(details) => serde_json::json!({ "error": error, "details": details }),
        None => serde_json::json!({ "error": error }),
    };
    (status, Json(body)).into_response()
}
