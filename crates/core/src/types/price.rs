//! Type-safe unit price using decimal arithmetic.
//!
//! The catalog resource encodes prices as bare JSON numbers (`"precio":
//! 1500`), so [`Price`] serializes as a number rather than a string. Amounts
//! are held as [`Decimal`] so that totals are exact sums of
//! `price × quantity`.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
    /// The amount is above [`Price::MAX`].
    #[error("price cannot exceed 1000000000000 (got {0})")]
    TooLarge(Decimal),
}

/// A non-negative unit price, at most [`Price::MAX`].
///
/// The cap keeps `price × quantity` and cart sums well inside the range of
/// [`Decimal`]; arithmetic on prices still saturates rather than panicking.
///
/// Display is the amount prefixed with `$`, without rounding or grouping.
///
/// # Example
///
/// ```rust
/// use rust_decimal::Decimal;
/// use vitrina_core::Price;
///
/// let price = Price::new(Decimal::new(1999, 2)).unwrap();
/// assert_eq!(price.to_string(), "$19.99");
/// assert!(Price::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// The largest accepted price: 1,000,000,000,000.
    pub const MAX: Self = Self(Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0));

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero and
    /// [`PriceError::TooLarge`] if it is above [`Price::MAX`].
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        if amount > Self::MAX.0 {
            return Err(PriceError::TooLarge(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// Returns the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns `self × quantity`, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn times(&self, quantity: u32) -> Decimal {
        self.0.saturating_mul(Decimal::from(quantity))
    }
}

/// Format a decimal amount the way prices are shown: `$` followed by the
/// amount with trailing zeros dropped.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("${}", amount.normalize())
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_amount(self.0))
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_valid() {
        assert_eq!(Price::new(Decimal::ZERO).unwrap(), Price::ZERO);
    }

    #[test]
    fn test_negative_rejected() {
        assert!(matches!(
            Price::new(Decimal::new(-5, 1)),
            Err(PriceError::Negative(_))
        ));
    }

    #[test]
    fn test_display_prefixes_dollar() {
        assert_eq!(Price::from_units(1500).to_string(), "$1500");
        assert_eq!(Price::new(Decimal::new(1250, 2)).unwrap().to_string(), "$12.5");
    }

    #[test]
    fn test_deserialize_integer_and_float() {
        let whole: Price = serde_json::from_str("1500").unwrap();
        assert_eq!(whole.amount(), Decimal::from(1500));

        let cents: Price = serde_json::from_str("19.99").unwrap();
        assert_eq!(cents.amount(), Decimal::new(1999, 2));
    }

    #[test]
    fn test_deserialize_negative_fails() {
        assert!(serde_json::from_str::<Price>("-3").is_err());
    }

    #[test]
    fn test_max_is_accepted_and_above_rejected() {
        assert_eq!(
            Price::new(Decimal::from(1_000_000_000_000_u64)).unwrap(),
            Price::MAX
        );
        assert!(matches!(
            Price::new(Price::MAX.amount() + Decimal::new(1, 2)),
            Err(PriceError::TooLarge(_))
        ));
    }

    #[test]
    fn test_deserialize_huge_fails() {
        assert!(serde_json::from_str::<Price>("50000000000000000000000000000").is_err());
    }

    #[test]
    fn test_times_at_max_quantity() {
        let line = Price::MAX.times(u32::MAX);
        assert_eq!(line, Decimal::from(1_000_000_000_000_u64) * Decimal::from(u32::MAX));
    }

    #[test]
    fn test_deserialize_string_fails() {
        assert!(serde_json::from_str::<Price>("\"abc\"").is_err());
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_value(Price::new(Decimal::new(1999, 2)).unwrap()).unwrap();
        assert!(json.is_number());
    }

    #[test]
    fn test_times() {
        let price = Price::new(Decimal::new(250, 2)).unwrap();
        assert_eq!(price.times(3), Decimal::new(750, 2));
    }
}
