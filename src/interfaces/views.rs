//! View models for the wizard's steps.
//!
//! Each view is a pure function of the data it is built from. `Display`
//! renders a plain-text version; richer front ends read the fields.

use crate::application::wizard::{Step, Wizard};
use crate::domain::charges::Charges;
use crate::domain::personal::PersonalInformation;
use crate::domain::policy::PolicyInformation;
use crate::domain::transaction::PaymentTransaction;
use chrono::{DateTime, Months, NaiveDate, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Completed,
    Active,
    Upcoming,
}

/// The "Step n of 4" indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub current: Step,
    pub steps: Vec<(Step, StepState)>,
}

impl Progress {
    pub fn new(current: Step) -> Self {
        let steps = Step::ALL
            .into_iter()
            .map(|step| {
                let state = match step.cmp(&current) {
                    std::cmp::Ordering::Less => StepState::Completed,
                    std::cmp::Ordering::Equal => StepState::Active,
                    std::cmp::Ordering::Greater => StepState::Upcoming,
                };
                (step, state)
            })
            .collect();
        Self { current, steps }
    }

    pub fn from_wizard(wizard: &Wizard) -> Self {
        Self::new(wizard.step())
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of {}:", self.current.number(), Step::ALL.len())?;
        for (step, state) in &self.steps {
            let marker = match state {
                StepState::Completed => "x",
                StepState::Active => ">",
                StepState::Upcoming => " ",
            };
            write!(f, " [{marker}] {}", step.label())?;
        }
        Ok(())
    }
}

/// Everything shown on the review step, including the charges preview.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSummary {
    pub policy: PolicyInformation,
    pub personal: PersonalInformation,
    pub charges: Charges,
    pub terms_accepted: bool,
    pub processing: bool,
}

impl ReviewSummary {
    /// Returns `None` unless the wizard is at `Review` with both records captured.
    pub fn from_wizard(wizard: &Wizard) -> Option<Self> {
        if wizard.step() != Step::Review {
            return None;
        }
        Some(Self {
            policy: wizard.policy()?.clone(),
            personal: wizard.personal()?.clone(),
            charges: wizard.charges_preview()?,
            terms_accepted: wizard.terms_accepted(),
            processing: wizard.is_processing(),
        })
    }

    /// Whether the pay control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.terms_accepted && !self.processing
    }
}

impl fmt::Display for ReviewSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.policy;
        let c = &self.charges;
        writeln!(f, "Policy Information")?;
        writeln!(f, "  Policy number:     {}", p.policy_number)?;
        writeln!(f, "  Coverage type:     {}", p.coverage_type.label())?;
        writeln!(f, "  Payment frequency: {}", p.payment_frequency.label())?;
        if let Some(details) = &p.coverage_details {
            writeln!(f, "  Coverage details:  {details}")?;
        }
        writeln!(f, "Personal Information")?;
        write_personal(f, &self.personal)?;
        writeln!(f, "Payment Summary")?;
        writeln!(f, "  Premium amount:    {}", c.premium_amount.to_usd())?;
        writeln!(f, "  Processing fee:    {}", c.processing_fee.to_usd())?;
        writeln!(f, "  Tax:               {}", c.tax.to_usd())?;
        write!(f, "  Total amount:      {}", c.total_amount.to_usd())
    }
}

/// The confirmation receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub transaction: PaymentTransaction,
    pub next_payment: Option<NaiveDate>,
}

impl Receipt {
    pub fn new(transaction: PaymentTransaction) -> Self {
        let months = transaction.policy().payment_frequency.months();
        let next_payment = next_payment_date(transaction.created_at, months);
        Self {
            transaction,
            next_payment,
        }
    }

    pub fn from_wizard(wizard: &Wizard) -> Option<Self> {
        wizard.transaction().cloned().map(Self::new)
    }
}

fn next_payment_date(paid_at: DateTime<Utc>, months: u32) -> Option<NaiveDate> {
    paid_at
        .date_naive()
        .checked_add_months(Months::new(months))
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tx = &self.transaction;
        writeln!(f, "Payment Successful")?;
        writeln!(f, "  Transaction ID:    {}", tx.transaction_id)?;
        writeln!(f, "  Date:              {}", tx.created_at.format("%B %-d, %Y at %-I:%M %p UTC"))?;
        writeln!(f, "  Policy number:     {}", tx.policy().policy_number)?;
        writeln!(f, "  Coverage:          {}", tx.policy().coverage_type.label())?;
        writeln!(f, "  Billed:            {}", tx.policy().payment_frequency.label())?;
        writeln!(f, "  Premium amount:    {}", tx.premium_amount().to_usd())?;
        writeln!(f, "  Processing fee:    {}", tx.processing_fee.to_usd())?;
        writeln!(f, "  Tax:               {}", tx.tax.to_usd())?;
        writeln!(f, "  Amount paid:       {}", tx.total_amount.to_usd())?;
        if let Some(next) = self.next_payment {
            writeln!(f, "  Next payment due:  {}", next.format("%B %-d, %Y"))?;
        }
        write!(f, "A receipt has been sent to {}", tx.personal().email)
    }
}

fn write_personal(f: &mut fmt::Formatter<'_>, p: &PersonalInformation) -> fmt::Result {
    writeln!(f, "  Name:              {}", p.full_name())?;
    writeln!(f, "  Email:             {}", p.email)?;
    writeln!(f, "  Phone:             {}", p.phone)?;
    writeln!(
        f,
        "  Billing address:   {}, {}, {} {}",
        p.street_address, p.city, p.state, p.zip_code
    )
}
