//! HTTP client for the payment backend, usable as a wizard's gateway.

use crate::domain::ports::PaymentGateway;
use crate::domain::transaction::{PaymentData, PaymentTransaction, TransactionId};
use crate::error::{PaymentError, Result};
use crate::interfaces::http::payment::ApiResponse;
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend, e.g. `http://127.0.0.1:5000`.
    pub base_url: String,
    /// Per-request timeout in seconds (default: 30).
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpPaymentClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpPaymentClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|err| {
            PaymentError::Internal(format!("invalid base url {:?}: {err}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(PaymentError::Internal(format!(
                "base url {:?} cannot carry a path",
                config.base_url
            )));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Appends `segments` to the base path, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Fetches a recorded transaction; `Ok(None)` when the backend has no such id.
    pub async fn transaction(&self, id: &TransactionId) -> Result<Option<PaymentTransaction>> {
        let url = self.endpoint(&["api", "payment", "transaction", id.as_str()]);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body: ApiResponse = response.json().await?;

        match status {
            StatusCode::OK => body
                .transaction
                .map(Some)
                .ok_or_else(|| PaymentError::Processing("response carried no transaction".into())),
            StatusCode::NOT_FOUND => Ok(None),
            _ => Err(PaymentError::Processing(
                body.message.unwrap_or_else(|| status.to_string()),
            )),
        }
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentClient {
    async fn submit(&self, data: &PaymentData) -> Result<PaymentTransaction> {
        let url = self.endpoint(&["api", "payment", "process"]);
        let response = self.client.post(url).json(data).send().await?;
        let status = response.status();
        let body: ApiResponse = response.json().await?;

        match (status, body) {
            (StatusCode::OK, ApiResponse { transaction: Some(tx), .. }) => Ok(tx),
            (StatusCode::BAD_REQUEST, ApiResponse { errors: Some(errors), .. }) => {
                Err(PaymentError::Validation(errors))
            }
            (status, body) => Err(PaymentError::Processing(
                body.message.unwrap_or_else(|| status.to_string()),
            )),
        }
    }
}
