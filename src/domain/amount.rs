//! Amount type
//!
//! Domain primitive for monetary amounts. Validated at construction time,
//! so a non-positive amount cannot exist anywhere in the system.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValidationError;

/// Amount represents a validated monetary value.
///
/// # Invariants
/// - Value is always strictly positive (> 0)
///
/// The serde representation is a plain `Decimal`, so the wire format
/// accepts either a JSON number or a decimal string; deserialization of a
/// non-positive value fails with the validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Create a new Amount with validation.
    ///
    /// # Errors
    /// `ValidationError::NonPositiveAmount` if value <= 0.
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(value));
        }
        Ok(Self(value))
    }

    /// Get the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_positive_amount_is_accepted() {
        let amount = Amount::new(dec!(12.50)).unwrap();
        assert_eq!(amount.value(), dec!(12.50));
    }

    #[test]
    fn test_zero_amount_is_rejected() {
        let err = Amount::new(Decimal::ZERO).unwrap_err();
        assert_eq!(err, ValidationError::NonPositiveAmount(Decimal::ZERO));
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        assert!(Amount::new(dec!(-0.01)).is_err());
    }

    #[test]
    fn test_deserializes_from_number_and_string() {
        let from_number: Amount = serde_json::from_str("12.5").unwrap();
        let from_string: Amount = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(from_number, from_string);
    }

    #[test]
    fn test_deserializing_non_positive_fails() {
        assert!(serde_json::from_str::<Amount>("0").is_err());
        assert!(serde_json::from_str::<Amount>("-3").is_err());
    }
}
