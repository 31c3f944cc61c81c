//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. Prices arrive from the
//! catalog as decimal strings and are parsed digit by digit, never through
//! `f64`.

use crate::error::CartError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Bolivian boliviano, the storefront's currency.
    #[default]
    BOB,
    USD,
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "BOB").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::BOB => "BOB",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Get the currency symbol (e.g., "Bs.").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::BOB => "Bs.",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "BOB" => Some(Currency::BOB),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            _ => None,
        }
    }

    fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Parse a non-negative decimal string such as `"49.99"` or `"35"`.
    ///
    /// Extra fractional digits are accepted only when they are zeros
    /// (`"10.500"`), so no amount is ever silently rounded.
    ///
    /// ```
    /// use storefront_cart::money::{Currency, Money};
    /// let price = Money::parse_decimal("49.99", Currency::BOB).unwrap();
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn parse_decimal(input: &str, currency: Currency) -> Result<Self, CartError> {
        let invalid = || CartError::InvalidPrice(input.to_string());
        let s = input.trim();
        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let places = currency.decimal_places() as usize;
        let (kept, dropped) = frac.split_at(frac.len().min(places));
        if dropped.bytes().any(|b| b != b'0') {
            return Err(invalid());
        }

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let mut frac_value: i64 = if kept.is_empty() {
            0
        } else {
            kept.parse().map_err(|_| invalid())?
        };
        for _ in kept.len()..places {
            frac_value *= 10;
        }

        let amount_cents = whole_value
            .checked_mul(currency.minor_per_major())
            .and_then(|v| v.checked_add(frac_value))
            .ok_or_else(invalid)?;
        Ok(Self::new(amount_cents, currency))
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Format as a display string (e.g., "Bs.49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let divisor = self.currency.minor_per_major();
        let places = self.currency.decimal_places() as usize;
        let abs = self.amount_cents.unsigned_abs();
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        format!(
            "{sign}{}.{:0places$}",
            abs / divisor as u64,
            abs % divisor as u64
        )
    }

    /// Multiply by a quantity, saturating at the numeric bounds.
    pub fn saturating_multiply(&self, factor: u32) -> Money {
        Money::new(
            self.amount_cents.saturating_mul(i64::from(factor)),
            self.currency,
        )
    }

    /// Sum an iterator of Money values, saturating at the numeric bounds.
    ///
    /// Values are assumed to be in `currency`; callers guarantee that.
    pub fn saturating_sum(iter: impl Iterator<Item = Money>, currency: Currency) -> Money {
        let amount = iter.fold(0_i64, |acc, m| acc.saturating_add(m.amount_cents));
        Money::new(amount, currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        let m = Money::parse_decimal("49.99", Currency::BOB).unwrap();
        assert_eq!(m.amount_cents, 4999);

        assert_eq!(Money::parse_decimal("35", Currency::BOB).unwrap().amount_cents, 3500);
        assert_eq!(Money::parse_decimal("12.5", Currency::BOB).unwrap().amount_cents, 1250);
        assert_eq!(Money::parse_decimal(".75", Currency::BOB).unwrap().amount_cents, 75);
        assert_eq!(Money::parse_decimal(" 10.500 ", Currency::BOB).unwrap().amount_cents, 1050);
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        for input in ["", ".", "-5", "abc", "1.2.3", "10.555", "1e3", "+4"] {
            assert!(
                matches!(Money::parse_decimal(input, Currency::BOB), Err(CartError::InvalidPrice(_))),
                "accepted {input:?}"
            );
        }
    }

    #[test]
    fn test_parse_decimal_overflow() {
        assert!(Money::parse_decimal("99999999999999999999", Currency::BOB).is_err());
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(3500, Currency::BOB);
        assert_eq!(m.display(), "Bs.35.00");

        let m = Money::new(4999, Currency::USD);
        assert_eq!(m.display(), "$49.99");

        let m = Money::new(-205, Currency::BOB);
        assert_eq!(m.display_amount(), "-2.05");
    }

    #[test]
    fn test_saturating_arithmetic() {
        let m = Money::new(1000, Currency::BOB);
        assert_eq!(m.saturating_multiply(3).amount_cents, 3000);

        let big = Money::new(i64::MAX, Currency::BOB);
        assert_eq!(big.saturating_multiply(2).amount_cents, i64::MAX);

        let total = Money::saturating_sum(
            [Money::new(2000, Currency::BOB), Money::new(1500, Currency::BOB)].into_iter(),
            Currency::BOB,
        );
        assert_eq!(total.amount_cents, 3500);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("BOB"), Some(Currency::BOB));
        assert_eq!(Currency::from_code("eur"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
