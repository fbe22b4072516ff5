//! Validation schemas for the policy, personal and merged payment records.
//!
//! Forms carry exactly what the user (or an HTTP client) sent. `validate`
//! narrows a form to its typed record or reports every field-level violation
//! at once, in field order. The same schemas run in the wizard and again at
//! the backend boundary.

use crate::domain::money::{Premium, PremiumError};
use crate::domain::personal::{PersonalInformation, UsState};
use crate::domain::policy::{CoverageType, PaymentFrequency, PolicyInformation};
use crate::domain::transaction::PaymentData;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\d{3}\) \d{3}-\d{4}$").expect("phone pattern"));
static ZIP_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("zip pattern"));
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$")
        .expect("email pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    Required,
    InvalidOption,
    InvalidType,
    NotPositive,
    TooLarge,
    InvalidFormat,
    MalformedBody,
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub path: Vec<String>,
    pub code: ViolationCode,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &str, code: ViolationCode, message: impl Into<String>) -> Self {
        Self {
            path: vec![field.to_string()],
            code,
            message: message.into(),
        }
    }

    pub fn field(&self) -> &str {
        self.path.first().map(String::as_str).unwrap_or_default()
    }
}

/// A non-empty list of violations for one record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    pub fn single(violation: FieldViolation) -> Self {
        Self(vec![violation])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.0.iter()
    }

    /// The first violation reported for `field`, if any.
    pub fn field(&self, field: &str) -> Option<&FieldViolation> {
        self.0.iter().find(|v| v.field() == field)
    }

    fn push(&mut self, violation: FieldViolation) {
        self.0.push(violation);
    }

    fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }
}

impl From<Vec<FieldViolation>> for ValidationErrors {
    fn from(violations: Vec<FieldViolation>) -> Self {
        Self(violations)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<_> = self.0.iter().map(|v| v.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}

/// A premium as it arrives from a form: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(serde_json::Number),
    Text(String),
}

impl NumericInput {
    /// Coerces to a decimal. Blank text coerces to zero.
    fn coerce(&self) -> Option<Decimal> {
        let text = match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) if s.trim().is_empty() => return Some(Decimal::ZERO),
            Self::Text(s) => s.trim().to_string(),
        };
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .ok()
    }
}

impl From<Decimal> for NumericInput {
    fn from(value: Decimal) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Raw step-1 input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolicyForm {
    #[serde(deserialize_with = "lenient_string")]
    pub policy_number: String,
    #[serde(deserialize_with = "lenient_string")]
    pub coverage_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub payment_frequency: String,
    pub premium_amount: Option<NumericInput>,
    pub coverage_details: Option<String>,
}

/// Raw step-2 input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalForm {
    #[serde(deserialize_with = "lenient_string")]
    pub first_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub last_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub street_address: String,
    #[serde(deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(deserialize_with = "lenient_string")]
    pub state: String,
    #[serde(deserialize_with = "lenient_string")]
    pub zip_code: String,
}

/// The body of a payment submission: both forms, flattened.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PaymentForm {
    #[serde(flatten)]
    pub policy: PolicyForm,
    #[serde(flatten)]
    pub personal: PersonalForm,
}

#[derive(Default)]
struct Checker {
    errors: ValidationErrors,
}

impl Checker {
    fn required(&mut self, field: &str, label: &str, value: &str) -> Option<String> {
        let value = value.trim();
        if value.is_empty() {
            self.errors.push(FieldViolation::new(
                field,
                ViolationCode::Required,
                format!("{label} is required"),
            ));
            return None;
        }
        Some(value.to_string())
    }

    fn option<T: FromStr>(&mut self, field: &str, label: &str, value: &str) -> Option<T> {
        let value = self.required(field, label, value)?;
        match value.parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                self.errors.push(FieldViolation::new(
                    field,
                    ViolationCode::InvalidOption,
                    format!("Please select a valid {}", label.to_lowercase()),
                ));
                None
            }
        }
    }

    fn pattern(&mut self, field: &str, pattern: &Regex, value: &str, message: &str) -> Option<String> {
        let value = value.trim();
        if !pattern.is_match(value) {
            self.errors
                .push(FieldViolation::new(field, ViolationCode::InvalidFormat, message));
            return None;
        }
        Some(value.to_string())
    }

    fn email(&mut self, field: &str, value: &str) -> Option<String> {
        let value = value.trim();
        if value.starts_with('.') || value.contains("..") || !EMAIL.is_match(value) {
            self.errors.push(FieldViolation::new(
                field,
                ViolationCode::InvalidFormat,
                "Please enter a valid email address",
            ));
            return None;
        }
        Some(value.to_string())
    }

    fn premium(&mut self, field: &str, value: Option<&NumericInput>) -> Option<Premium> {
        let Some(amount) = value.and_then(NumericInput::coerce) else {
            self.errors.push(FieldViolation::new(
                field,
                ViolationCode::InvalidType,
                "Premium amount must be a number",
            ));
            return None;
        };
        match Premium::new(amount) {
            Ok(premium) => Some(premium),
            Err(err) => {
                let code = match err {
                    PremiumError::NotPositive => ViolationCode::NotPositive,
                    PremiumError::TooLarge => ViolationCode::TooLarge,
                };
                self.errors.push(FieldViolation::new(field, code, err.to_string()));
                None
            }
        }
    }

    fn finish<T>(self, value: Option<T>) -> Result<T, ValidationErrors> {
        match value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(self.errors),
        }
    }
}

impl PolicyForm {
    pub fn validate(&self) -> Result<PolicyInformation, ValidationErrors> {
        let mut check = Checker::default();
        let policy_number = check.required("policyNumber", "Policy number", &self.policy_number);
        let coverage_type: Option<CoverageType> =
            check.option("coverageType", "Coverage type", &self.coverage_type);
        let payment_frequency: Option<PaymentFrequency> =
            check.option("paymentFrequency", "Payment frequency", &self.payment_frequency);
        let premium_amount = check.premium("premiumAmount", self.premium_amount.as_ref());
        let coverage_details = self
            .coverage_details
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        let value = match (policy_number, coverage_type, payment_frequency, premium_amount) {
            (Some(policy_number), Some(coverage_type), Some(payment_frequency), Some(premium_amount)) => {
                Some(PolicyInformation {
                    policy_number,
                    coverage_type,
                    payment_frequency,
                    premium_amount,
                    coverage_details,
                })
            }
            _ => None,
        };
        check.finish(value)
    }
}

impl PersonalForm {
    pub fn validate(&self) -> Result<PersonalInformation, ValidationErrors> {
        let mut check = Checker::default();
        let first_name = check.required("firstName", "First name", &self.first_name);
        let last_name = check.required("lastName", "Last name", &self.last_name);
        let email = check.email("email", &self.email);
        let phone = check.pattern("phone", &PHONE, &self.phone, "Please enter a valid phone number");
        let street_address = check.required("streetAddress", "Street address", &self.street_address);
        let city = check.required("city", "City", &self.city);
        let state: Option<UsState> = check.option("state", "State", &self.state);
        let zip_code = check.pattern("zipCode", &ZIP_CODE, &self.zip_code, "Please enter a valid ZIP code");

        let value = match (first_name, last_name, email, phone, street_address, city, state, zip_code) {
            (
                Some(first_name),
                Some(last_name),
                Some(email),
                Some(phone),
                Some(street_address),
                Some(city),
                Some(state),
                Some(zip_code),
            ) => Some(PersonalInformation {
                first_name,
                last_name,
                email,
                phone,
                street_address,
                city,
                state,
                zip_code,
            }),
            _ => None,
        };
        check.finish(value)
    }
}

impl PaymentForm {
    /// Runs both schemas and reports the union of their violations.
    pub fn validate(&self) -> Result<PaymentData, ValidationErrors> {
        match (self.policy.validate(), self.personal.validate()) {
            (Ok(policy), Ok(personal)) => Ok(PaymentData { policy, personal }),
            (policy, personal) => {
                let mut errors = ValidationErrors::default();
                if let Err(e) = policy {
                    errors.extend(e);
                }
                if let Err(e) = personal {
                    errors.extend(e);
                }
                Err(errors)
            }
        }
    }
}

impl From<&PolicyInformation> for PolicyForm {
    fn from(policy: &PolicyInformation) -> Self {
        Self {
            policy_number: policy.policy_number.clone(),
            coverage_type: policy.coverage_type.to_string(),
            payment_frequency: policy.payment_frequency.to_string(),
            premium_amount: Some(policy.premium_amount.value().into()),
            coverage_details: policy.coverage_details.clone(),
        }
    }
}

impl From<&PersonalInformation> for PersonalForm {
    fn from(personal: &PersonalInformation) -> Self {
        Self {
            first_name: personal.first_name.clone(),
            last_name: personal.last_name.clone(),
            email: personal.email.clone(),
            phone: personal.phone.clone(),
            street_address: personal.street_address.clone(),
            city: personal.city.clone(),
            state: personal.state.to_string(),
            zip_code: personal.zip_code.clone(),
        }
    }
}

impl From<&PaymentData> for PaymentForm {
    fn from(data: &PaymentData) -> Self {
        Self {
            policy: PolicyForm::from(&data.policy),
            personal: PersonalForm::from(&data.personal),
        }
    }
}
