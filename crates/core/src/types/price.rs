//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are held as [`Decimal`] so that sums such as cart totals never
//! pick up binary floating point drift. Rounding happens only when a price is
//! formatted for display.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when building or combining a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
    /// Two prices in different currencies were combined.
    #[error("currency mismatch: {left:?} and {right:?}")]
    CurrencyMismatch {
        /// Currency of the left-hand price.
        left: CurrencyCode,
        /// Currency of the right-hand price.
        right: CurrencyCode,
    },
    /// The result does not fit in a [`Decimal`].
    #[error("price arithmetic overflowed")]
    Overflow,
}

/// A non-negative price with currency information.
///
/// ## Examples
///
/// ```
/// use shopeasy_core::{CurrencyCode, Price};
///
/// let price = Price::from_cents(9999, CurrencyCode::USD).unwrap();
/// assert_eq!(price.to_string(), "$99.99");
/// assert_eq!(price.times(3).unwrap().to_string(), "$299.97");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    amount: Decimal,
    /// ISO 4217 currency code.
    currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal, currency_code: CurrencyCode) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self {
            amount,
            currency_code,
        })
    }

    /// Create a price from an amount in the smallest currency unit.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `cents` is below zero.
    pub fn from_cents(cents: i64, currency_code: CurrencyCode) -> Result<Self, PriceError> {
        Self::new(Decimal::new(cents, 2), currency_code)
    }

    /// Create a price from a whole number of minor units. Cannot fail.
    #[must_use]
    pub fn from_minor_units(cents: u64, currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::from_i128_with_scale(i128::from(cents), 2),
            currency_code,
        }
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency_code,
        }
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// The currency of this price.
    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }

    /// This price multiplied by a whole quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the product is out of range.
    pub fn times(&self, quantity: u32) -> Result<Self, PriceError> {
        let amount = self
            .amount
            .checked_mul(Decimal::from(quantity))
            .ok_or(PriceError::Overflow)?;
        Ok(Self {
            amount,
            currency_code: self.currency_code,
        })
    }

    /// Add two prices of the same currency.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::CurrencyMismatch`] if the currencies differ, or
    /// [`PriceError::Overflow`] if the sum is out of range.
    pub fn plus(&self, other: &Self) -> Result<Self, PriceError> {
        if self.currency_code != other.currency_code {
            return Err(PriceError::CurrencyMismatch {
                left: self.currency_code,
                right: other.currency_code,
            });
        }
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(PriceError::Overflow)?;
        Ok(Self {
            amount,
            currency_code: self.currency_code,
        })
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:.2}",
            self.currency_code.symbol(),
            self.amount.round_dp(2)
        )
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }
}
