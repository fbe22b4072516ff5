use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use thiserror::Error;

/// Largest premium a policy record can hold (ten digits, two of them cents).
pub const MAX_PREMIUM: Decimal = dec!(99999999.99);

/// A monetary value in dollars, always held at exactly two decimal places.
///
/// Every constructor rounds half-up (away from zero) to cents, so amounts that
/// are persisted or displayed never carry sub-cent noise. Computations that
/// need full precision work on `Decimal` and convert at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        let mut cents = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        cents.rescale(2);
        Self(cents)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// `None` when the sum does not fit in a `Decimal`.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self::new)
    }

    /// Formats as US currency, e.g. `$1,234.50`.
    pub fn to_usd(&self) -> String {
        let text = self.0.abs().to_string();
        let (whole, cents) = text.split_once('.').unwrap_or((&text, "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if self.0.is_sign_negative() && !self.0.is_zero() { "-" } else { "" };
        format!("{sign}${grouped}.{cents}")
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.0 + rhs.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PremiumError {
    #[error("Premium amount must be positive")]
    NotPositive,
    #[error("Premium amount must not exceed $99,999,999.99")]
    TooLarge,
}

/// A premium in cents, within `(0, MAX_PREMIUM]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Premium(Decimal);

impl Premium {
    /// Rounds `value` half-up to cents, then checks the bounds, so an amount
    /// such as `0.001` that rounds to zero is not a valid premium.
    pub fn new(value: Decimal) -> Result<Self, PremiumError> {
        if value > MAX_PREMIUM {
            return Err(PremiumError::TooLarge);
        }
        let cents = Money::new(value).value();
        if cents <= Decimal::ZERO {
            Err(PremiumError::NotPositive)
        } else if cents > MAX_PREMIUM {
            Err(PremiumError::TooLarge)
        } else {
            Ok(Self(cents))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn to_money(&self) -> Money {
        Money::new(self.0)
    }
}

impl TryFrom<Decimal> for Premium {
    type Error = PremiumError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Premium> for Decimal {
    fn from(premium: Premium) -> Self {
        premium.0
    }
}
