use crate::domain::charges::FeeSchedule;
use crate::domain::ports::{IdGeneratorBox, PaymentGateway, TransactionStoreBox};
use crate::domain::transaction::{PaymentData, PaymentTransaction, TransactionId};
use crate::domain::validation::PaymentForm;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

/// The authoritative payment backend.
///
/// `PaymentService` owns the transaction store and id generator. It never
/// trusts upstream validation: every submission is re-checked against the
/// merged payment schema before charges are computed and the transaction is
/// recorded.
pub struct PaymentService {
    store: TransactionStoreBox,
    ids: IdGeneratorBox,
    fees: FeeSchedule,
}

impl PaymentService {
    /// Creates a new `PaymentService`.
    ///
    /// # Arguments
    ///
    /// * `store` - Where completed transactions are recorded.
    /// * `ids` - Source of transaction identifiers.
    /// * `fees` - The fee and tax rule applied to every submission.
    pub fn new(store: TransactionStoreBox, ids: IdGeneratorBox, fees: FeeSchedule) -> Self {
        Self { store, ids, fees }
    }

    /// Validates a raw submission and records it.
    pub async fn process(&self, form: &PaymentForm) -> Result<PaymentTransaction> {
        let data = form.validate().map_err(|errors| {
            debug!(violations = errors.len(), "payment submission rejected");
            PaymentError::Validation(errors)
        })?;
        self.create(data).await
    }

    /// Records an already-validated submission as a completed transaction.
    pub async fn create(&self, data: PaymentData) -> Result<PaymentTransaction> {
        let charges = self.fees.compute(data.policy.premium_amount).ok_or_else(|| {
            PaymentError::Internal(format!(
                "charges for premium {} overflow",
                data.policy.premium_amount.value()
            ))
        })?;
        let tx = PaymentTransaction::new(self.ids.next_id(), data, charges, Utc::now());

        self.store.insert(tx.clone()).await?;
        info!(
            transaction_id = %tx.transaction_id,
            policy_number = %tx.policy().policy_number,
            total = %tx.total_amount,
            "payment recorded"
        );
        Ok(tx)
    }

    /// Looks up a recorded transaction.
    pub async fn transaction(&self, id: &TransactionId) -> Result<PaymentTransaction> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| PaymentError::NotFound(id.clone()))
    }
}

/// Lets a wizard submit straight to the backend in-process.
#[async_trait]
impl PaymentGateway for PaymentService {
    async fn submit(&self, data: &PaymentData) -> Result<PaymentTransaction> {
        self.process(&PaymentForm::from(data)).await
    }
}
