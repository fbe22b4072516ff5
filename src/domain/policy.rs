use crate::domain::money::Premium;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum CoverageType {
    Comprehensive,
    Liability,
    Collision,
    Full,
}

impl CoverageType {
    pub const ALL: [Self; 4] = [
        Self::Comprehensive,
        Self::Liability,
        Self::Collision,
        Self::Full,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Comprehensive => "comprehensive",
            Self::Liability => "liability",
            Self::Collision => "collision",
            Self::Full => "full",
        }
    }

    /// Human-readable label used on the review and receipt views.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Comprehensive => "Comprehensive Coverage",
            Self::Liability => "Liability Only",
            Self::Collision => "Collision Coverage",
            Self::Full => "Full Coverage",
        }
    }
}

impl FromStr for CoverageType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|c| c.as_str() == s).ok_or(())
    }
}

impl fmt::Display for CoverageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentFrequency {
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl PaymentFrequency {
    pub const ALL: [Self; 4] = [
        Self::Monthly,
        Self::Quarterly,
        Self::SemiAnnual,
        Self::Annual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::SemiAnnual => "semi-annual",
            Self::Annual => "annual",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::SemiAnnual => "Semi-Annual",
            Self::Annual => "Annual",
        }
    }

    /// Number of months between two consecutive payments.
    pub fn months(&self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::Quarterly => 3,
            Self::SemiAnnual => 6,
            Self::Annual => 12,
        }
    }
}

impl FromStr for PaymentFrequency {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|f| f.as_str() == s).ok_or(())
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Step 1 of the wizard, after validation.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PolicyInformation {
    pub policy_number: String,
    pub coverage_type: CoverageType,
    pub payment_frequency: PaymentFrequency,
    pub premium_amount: Premium,
    #[serde(default)]
    pub coverage_details: Option<String>,
}
