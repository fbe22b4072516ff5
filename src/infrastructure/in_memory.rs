use crate::domain::ports::TransactionStore;
use crate::domain::transaction::{PaymentTransaction, TransactionId};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for completed transactions.
///
/// Uses `Arc<RwLock<HashMap<TransactionId, PaymentTransaction>>>` so clones
/// share one map. Records are inserted whole under the write lock, so readers
/// never observe a partial record. Nothing survives a restart.
#[derive(Default, Clone)]
pub struct InMemoryTransactionStore {
    transactions: Arc<RwLock<HashMap<TransactionId, PaymentTransaction>>>,
}

impl InMemoryTransactionStore {
    /// Creates a new, empty in-memory transaction store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn insert(&self, tx: PaymentTransaction) -> Result<()> {
        let mut transactions = self.transactions.write().await;
        match transactions.entry(tx.transaction_id.clone()) {
            Entry::Occupied(entry) => Err(PaymentError::Conflict(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(tx);
                Ok(())
            }
        }
    }

    async fn get(&self, id: &TransactionId) -> Result<Option<PaymentTransaction>> {
        let transactions = self.transactions.read().await;
        Ok(transactions.get(id).cloned())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.transactions.read().await.len())
    }
}
