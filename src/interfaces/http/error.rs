//! Maps backend errors to the `{success, message, ...}` envelopes the wizard
//! expects. Internal details are logged, never returned.

use super::payment::ApiResponse;
use crate::domain::transaction::TransactionId;
use crate::domain::validation::ValidationErrors;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub const VALIDATION_MESSAGE: &str = "Validation error";
pub const PROCESSING_FAILED_MESSAGE: &str = "Payment processing failed";
pub const NOT_FOUND_MESSAGE: &str = "Transaction not found";
pub const RETRIEVAL_FAILED_MESSAGE: &str = "Failed to retrieve transaction";

#[derive(Error, Debug)]
pub enum ApiError {
    /// The submission failed schema validation (400).
    #[error("validation error: {0}")]
    Validation(ValidationErrors),

    /// No transaction with that id (404).
    #[error("transaction not found: {0}")]
    NotFound(TransactionId),

    /// Creating the transaction failed for any other reason (500).
    #[error("payment processing failed: {0}")]
    ProcessingFailed(String),

    /// Reading the transaction failed for any other reason (500).
    #[error("failed to retrieve transaction: {0}")]
    RetrievalFailed(String),
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation(_) => (StatusCode::BAD_REQUEST, VALIDATION_MESSAGE),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
            Self::ProcessingFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, PROCESSING_FAILED_MESSAGE),
            Self::RetrievalFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, RETRIEVAL_FAILED_MESSAGE),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        match &self {
            Self::ProcessingFailed(_) | Self::RetrievalFailed(_) => {
                tracing::error!(error = %self, "request failed")
            }
            Self::Validation(errors) => {
                tracing::info!(violations = errors.len(), "submission failed validation")
            }
            Self::NotFound(id) => tracing::debug!(transaction_id = %id, "transaction not found"),
        }

        let errors = match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        };
        let body = ApiResponse {
            success: false,
            message: Some(message.to_string()),
            transaction: None,
            errors,
        };

        (status, Json(body)).into_response()
    }
}
