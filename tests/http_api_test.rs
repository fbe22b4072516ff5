mod common;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{body_json, payment_json, test_app};
use http_body_util::BodyExt;
use policy_pay::application::payments::PaymentService;
use policy_pay::domain::charges::FeeSchedule;
use policy_pay::domain::ports::TransactionStore;
use policy_pay::domain::transaction::{PaymentTransaction, TransactionId};
use policy_pay::error::{PaymentError, Result};
use policy_pay::infrastructure::id::SequentialIdGenerator;
use policy_pay::interfaces::http::{AppState, app};
use serde_json::{Value, json};
use tower::ServiceExt;

/// A store whose backend is unreachable.
struct OfflineStore;

#[async_trait]
impl TransactionStore for OfflineStore {
    async fn insert(&self, _tx: PaymentTransaction) -> Result<()> {
        Err(PaymentError::Internal("store offline".to_string()))
    }

    async fn get(&self, _id: &TransactionId) -> Result<Option<PaymentTransaction>> {
        Err(PaymentError::Internal("store offline".to_string()))
    }

    async fn len(&self) -> Result<usize> {
        Err(PaymentError::Internal("store offline".to_string()))
    }
}

fn offline_app() -> axum::Router {
    let service = PaymentService::new(
        Box::new(OfflineStore),
        Box::new(SequentialIdGenerator::new("TXN")),
        FeeSchedule::default(),
    );
    app(AppState::new(service))
}

fn post_json(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/payment/process")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn error_codes(body: &Value, field: &str) -> Vec<String> {
    body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|v| v["path"][0] == field)
        .map(|v| v["code"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health() {
    let response = test_app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn test_process_payment_records_transaction() {
    let response = test_app()
        .oneshot(post_json(payment_json().to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Payment processed successfully");

    let tx = &body["transaction"];
    assert_eq!(tx["transactionId"], "TXN-000001");
    assert_eq!(tx["policyNumber"], "POL-2024-001");
    assert_eq!(tx["premiumAmount"], "100.00");
    assert_eq!(tx["processingFee"], "3.50");
    assert_eq!(tx["tax"], "1.00");
    assert_eq!(tx["totalAmount"], "104.50");
    assert_eq!(tx["status"], "completed");
    assert_eq!(tx["state"], "TX");
    assert!(tx["createdAt"].is_string());
}

#[tokio::test]
async fn test_premium_given_as_string() {
    let mut payload = payment_json();
    payload["premiumAmount"] = "1234.5".into();
    let body = body_json(
        test_app()
            .oneshot(post_json(payload.to_string()))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["transaction"]["premiumAmount"], "1234.50");
    assert_eq!(body["transaction"]["tax"], "12.35");
    assert_eq!(body["transaction"]["totalAmount"], "1250.35");
}

#[tokio::test]
async fn test_validation_failure_lists_violations() {
    let mut payload = payment_json();
    payload["premiumAmount"] = (-5).into();
    payload["email"] = "not-an-email".into();
    payload["coverageType"] = "platinum".into();
    payload.as_object_mut().unwrap().remove("city");

    let response = test_app()
        .oneshot(post_json(payload.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validation error");
    assert!(body.get("transaction").is_none());
    assert_eq!(error_codes(&body, "premiumAmount"), ["not_positive"]);
    assert_eq!(error_codes(&body, "email"), ["invalid_format"]);
    assert_eq!(error_codes(&body, "coverageType"), ["invalid_option"]);
    assert_eq!(error_codes(&body, "city"), ["required"]);
    assert!(error_codes(&body, "policyNumber").is_empty());
}

#[tokio::test]
async fn test_rejected_submission_is_not_stored() {
    let app = test_app();
    let mut payload = payment_json();
    payload["zipCode"] = "1234".into();
    let response = app
        .clone()
        .oneshot(post_json(payload.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.clone().oneshot(post_json(payment_json().to_string())).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["transaction"]["transactionId"], "TXN-000001");
}

#[tokio::test]
async fn test_malformed_body_is_a_validation_error() {
    let response = test_app()
        .oneshot(post_json("{ not json".to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validation error");
    assert_eq!(error_codes(&body, "body"), ["malformed_body"]);
}

#[tokio::test]
async fn test_get_transaction_returns_recorded_data() {
    let app = test_app();
    let created = body_json(
        app.clone()
            .oneshot(post_json(payment_json().to_string()))
            .await
            .unwrap(),
    )
    .await;
    let id = created["transaction"]["transactionId"].as_str().unwrap();

    let response = app
        .oneshot(get(&format!("/api/payment/transaction/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert!(body.get("message").is_none());
    assert_eq!(body["transaction"], created["transaction"]);
}

#[tokio::test]
async fn test_get_unknown_transaction_is_not_found() {
    let response = test_app()
        .oneshot(get("/api/payment/transaction/TXN-missing"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Transaction not found");
}

#[tokio::test]
async fn test_oversized_premium_is_a_validation_error() {
    let mut payload = payment_json();
    payload["premiumAmount"] = "79228162514264337593543950335".into();

    let response = test_app()
        .oneshot(post_json(payload.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Validation error");
    assert_eq!(error_codes(&body, "premiumAmount"), ["too_large"]);
}

#[tokio::test]
async fn test_largest_premium_is_accepted() {
    let mut payload = payment_json();
    payload["premiumAmount"] = "99999999.99".into();

    let response = test_app()
        .oneshot(post_json(payload.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["transaction"]["premiumAmount"], "99999999.99");
    assert_eq!(body["transaction"]["totalAmount"], "101000003.49");
}

#[tokio::test]
async fn test_sub_cent_premium_rejected() {
    let mut payload = payment_json();
    payload["premiumAmount"] = "0.001".into();

    let response = test_app()
        .oneshot(post_json(payload.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(error_codes(&body, "premiumAmount"), ["not_positive"]);
}

#[tokio::test]
async fn test_store_failure_on_process_is_a_500_envelope() {
    let response = offline_app()
        .oneshot(post_json(payment_json().to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body, json!({ "success": false, "message": "Payment processing failed" }));
}

#[tokio::test]
async fn test_store_failure_on_lookup_is_a_500_envelope() {
    let response = offline_app()
        .oneshot(get("/api/payment/transaction/TXN-000001"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body, json!({ "success": false, "message": "Failed to retrieve transaction" }));
}

#[tokio::test]
async fn test_validation_runs_before_the_store() {
    let mut payload = payment_json();
    payload["phone"] = "555-1234".into();

    let response = offline_app()
        .oneshot(post_json(payload.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
