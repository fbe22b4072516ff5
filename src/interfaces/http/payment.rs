//! Payment routes:
//!
//! - `POST /api/payment/process`: validate and record a submission
//! - `GET  /api/payment/transaction/:transactionId`: fetch a recorded transaction

use super::AppState;
use super::error::ApiError;
use crate::domain::transaction::{PaymentTransaction, TransactionId};
use crate::domain::validation::{FieldViolation, PaymentForm, ValidationErrors, ViolationCode};
use crate::error::PaymentError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

pub const PROCESSED_MESSAGE: &str = "Payment processed successfully";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/payment/process", post(process_payment))
        .route("/api/payment/transaction/:transaction_id", get(get_transaction))
}

/// The envelope every payment endpoint answers with.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction: Option<PaymentTransaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

impl ApiResponse {
    fn ok(transaction: PaymentTransaction, message: Option<&str>) -> Self {
        Self {
            success: true,
            message: message.map(str::to_string),
            transaction: Some(transaction),
            errors: None,
        }
    }
}

async fn process_payment(
    State(state): State<AppState>,
    body: Result<Json<PaymentForm>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let Json(form) = body.map_err(|rejection| {
        ApiError::Validation(ValidationErrors::single(FieldViolation::new(
            "body",
            ViolationCode::MalformedBody,
            rejection.body_text(),
        )))
    })?;

    let tx = state.payments.process(&form).await.map_err(|err| match err {
        PaymentError::Validation(errors) => ApiError::Validation(errors),
        other => ApiError::ProcessingFailed(other.to_string()),
    })?;

    Ok(Json(ApiResponse::ok(tx, Some(PROCESSED_MESSAGE))))
}

async fn get_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    let id = TransactionId::new(transaction_id);
    let tx = state.payments.transaction(&id).await.map_err(|err| match err {
        PaymentError::NotFound(id) => ApiError::NotFound(id),
        other => ApiError::RetrievalFailed(other.to_string()),
    })?;

    Ok(Json(ApiResponse::ok(tx, None)))
}
