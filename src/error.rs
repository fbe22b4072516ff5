use crate::application::wizard::Step;
use crate::domain::transaction::TransactionId;
use crate::domain::validation::ValidationErrors;
use thiserror::Error;

/// Errors raised by the payment backend and by anything that talks to it.
#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("transaction not found: {0}")]
    NotFound(TransactionId),
    #[error("transaction id already issued: {0}")]
    Conflict(TransactionId),
    #[error("payment processing failed: {0}")]
    Processing(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ValidationErrors> for PaymentError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<reqwest::Error> for PaymentError {
    fn from(err: reqwest::Error) -> Self {
        Self::Processing(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PaymentError>;

/// Errors raised by wizard navigation. None of them changes the wizard's step.
#[derive(Error, Debug)]
pub enum WizardError {
    #[error("{0}")]
    Validation(ValidationErrors),
    #[error("cannot {action} from step {from}")]
    InvalidTransition { from: Step, action: &'static str },
    #[error("please accept the terms and conditions to proceed")]
    TermsNotAccepted,
    #[error("policy and personal information must both be captured")]
    MissingData,
    #[error("a payment submission is already in progress")]
    AlreadyProcessing,
    #[error("payment processing failed, please try again: {0}")]
    Payment(#[from] PaymentError),
}

impl From<ValidationErrors> for WizardError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}
