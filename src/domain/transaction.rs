use crate::domain::charges::Charges;
use crate::domain::money::Money;
use crate::domain::personal::PersonalInformation;
use crate::domain::policy::PolicyInformation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Only completed transactions are ever recorded.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Completed,
}

/// Validated policy and personal information, submitted together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentData {
    #[serde(flatten)]
    pub policy: PolicyInformation,
    #[serde(flatten)]
    pub personal: PersonalInformation,
}

/// The immutable record of a completed payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTransaction {
    pub transaction_id: TransactionId,
    #[serde(flatten)]
    pub data: PaymentData,
    pub processing_fee: Money,
    pub tax: Money,
    pub total_amount: Money,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}

impl PaymentTransaction {
    pub fn new(
        transaction_id: TransactionId,
        data: PaymentData,
        charges: Charges,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            transaction_id,
            data,
            processing_fee: charges.processing_fee,
            tax: charges.tax,
            total_amount: charges.total_amount,
            status: TransactionStatus::Completed,
            created_at,
        }
    }

    pub fn premium_amount(&self) -> Money {
        self.data.policy.premium_amount.to_money()
    }

    pub fn policy(&self) -> &PolicyInformation {
        &self.data.policy
    }

    pub fn personal(&self) -> &PersonalInformation {
        &self.data.personal
    }
}
