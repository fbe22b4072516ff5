use crate::domain::money::{Money, Premium};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The single fee and tax rule applied both to the review preview and to the
/// persisted transaction.
///
/// `processing_fee = max(minimum_fee, premium * fee_rate)` and
/// `tax = premium * tax_rate`. The default schedule charges a flat $3.50 fee
/// and 1% tax.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub minimum_fee: Decimal,
    pub fee_rate: Decimal,
    pub tax_rate: Decimal,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            minimum_fee: dec!(3.50),
            fee_rate: Decimal::ZERO,
            tax_rate: dec!(0.01),
        }
    }
}

/// The charges owed for one premium, each rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charges {
    pub premium_amount: Money,
    pub processing_fee: Money,
    pub tax: Money,
    pub total_amount: Money,
}

impl FeeSchedule {
    /// Computes fee and tax at full precision and rounds each once.
    ///
    /// The total is the sum of the rounded components, so
    /// `premium + fee + tax == total` holds exactly at two decimal places.
    /// Returns `None` if a rate is so large that an amount overflows.
    pub fn compute(&self, premium: Premium) -> Option<Charges> {
        let raw = premium.value();
        let percentage_fee = raw.checked_mul(self.fee_rate)?;
        let fee = percentage_fee.max(self.minimum_fee);

        let premium_amount = premium.to_money();
        let processing_fee = Money::new(fee);
        let tax = Money::new(raw.checked_mul(self.tax_rate)?);
        let total_amount = premium_amount.checked_add(processing_fee)?.checked_add(tax)?;

        Some(Charges {
            premium_amount,
            processing_fee,
            tax,
            total_amount,
        })
    }
}
