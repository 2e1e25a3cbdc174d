//! Money type for product prices.
//!
//! The product API sends prices as decimal numbers. They are converted to
//! integer minor units once, at the boundary, so comparisons and discount
//! math never touch floating point again.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Currency of a price. The product API only quotes US dollars today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
        }
    }
}

/// A price in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    pub amount_cents: i64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Convert an API decimal, rounding to the nearest cent.
    ///
    /// ```
    /// use salon_commerce::money::{Currency, Money};
    /// let price = Money::from_decimal(24.99, Currency::USD);
    /// assert_eq!(price.amount_cents, 2499);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        Self::new((amount * 100.0).round() as i64, currency)
    }

    /// `None` when the currencies differ.
    pub fn try_cmp(&self, other: &Money) -> Option<Ordering> {
        (self.currency == other.currency).then(|| self.amount_cents.cmp(&other.amount_cents))
    }

    /// Percentage saved going from `original` down to `self`, rounded to a
    /// whole percent. None unless `self` is strictly cheaper.
    pub fn savings_percent(&self, original: &Money) -> Option<u8> {
        if self.try_cmp(original) != Some(Ordering::Less) || original.amount_cents <= 0 {
            return None;
        }
        let saved = original.amount_cents - self.amount_cents;
        let percent = (saved as f64 / original.amount_cents as f64 * 100.0).round();
        Some(percent.clamp(0.0, 100.0) as u8)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let cents = self.amount_cents.unsigned_abs();
        write!(
            f,
            "{}{}{}.{:02}",
            sign,
            self.currency.symbol(),
            cents / 100,
            cents % 100
        )
    }
}
