#![allow(dead_code)]

use axum::body::Body;
use axum::http::Response;
use http_body_util::BodyExt;
use policy_pay::application::payments::PaymentService;
use policy_pay::domain::charges::FeeSchedule;
use policy_pay::domain::ports::{IdGeneratorBox, TransactionStoreBox};
use policy_pay::domain::validation::{PersonalForm, PolicyForm};
use policy_pay::infrastructure::id::SequentialIdGenerator;
use policy_pay::infrastructure::in_memory::InMemoryTransactionStore;
use policy_pay::interfaces::http::{AppState, app};
use serde_json::{Value, json};

pub fn payment_service() -> PaymentService {
    let store: TransactionStoreBox = Box::new(InMemoryTransactionStore::new());
    let ids: IdGeneratorBox = Box::new(SequentialIdGenerator::new("TXN"));
    PaymentService::new(store, ids, FeeSchedule::default())
}

pub fn test_app() -> axum::Router {
    app(AppState::new(payment_service()))
}

pub fn payment_json() -> Value {
    json!({
        "policyNumber": "POL-2024-001",
        "coverageType": "comprehensive",
        "paymentFrequency": "monthly",
        "premiumAmount": 100,
        "coverageDetails": null,
        "firstName": "Jordan",
        "lastName": "Lee",
        "email": "jordan.lee@example.com",
        "phone": "(555) 123-4567",
        "streetAddress": "42 Elm Street",
        "city": "Austin",
        "state": "TX",
        "zipCode": "73301"
    })
}

pub fn policy_form() -> PolicyForm {
    PolicyForm {
        policy_number: "POL-2024-001".to_string(),
        coverage_type: "full".to_string(),
        payment_frequency: "quarterly".to_string(),
        premium_amount: Some("250.00".into()),
        coverage_details: Some("Includes roadside assistance".to_string()),
    }
}

pub fn personal_form() -> PersonalForm {
    PersonalForm {
        first_name: "Jordan".to_string(),
        last_name: "Lee".to_string(),
        email: "jordan.lee@example.com".to_string(),
        phone: "(555) 123-4567".to_string(),
        street_address: "42 Elm Street".to_string(),
        city: "Austin".to_string(),
        state: "TX".to_string(),
        zip_code: "73301-1234".to_string(),
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
