use super::transaction::{PaymentData, PaymentTransaction, TransactionId};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Append-only storage for completed transactions.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Inserts `tx`, failing with `PaymentError::Conflict` if its id is taken.
    async fn insert(&self, tx: PaymentTransaction) -> Result<()>;
    async fn get(&self, id: &TransactionId) -> Result<Option<PaymentTransaction>>;
    async fn len(&self) -> Result<usize>;
}

/// Source of transaction identifiers.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> TransactionId;
}

/// The boundary the wizard submits payments through.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn submit(&self, data: &PaymentData) -> Result<PaymentTransaction>;
}

pub type TransactionStoreBox = Box<dyn TransactionStore>;
pub type IdGeneratorBox = Box<dyn IdGenerator>;
pub type SharedPaymentGateway = Arc<dyn PaymentGateway>;
