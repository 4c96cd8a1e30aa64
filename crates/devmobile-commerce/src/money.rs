//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. Rates (promo,
//! tax) are applied with [`Money::multiply_rate`], which rounds to the
//! nearest cent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

use crate::CommerceError;

/// Display currencies.
///
/// The store prices everything in its base currency; the currency only
/// drives formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    EUR,
    USD,
    GBP,
}

impl Currency {
    /// Get the currency code (e.g., "EUR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::EUR => "EUR",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
        }
    }

    /// Get the currency symbol (e.g., "€").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::EUR => "\u{20ac}",
            Currency::USD => "$",
            Currency::GBP => "\u{00a3}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "EUR" => Some(Currency::EUR),
            "USD" => Some(Currency::USD),
            "GBP" => Some(Currency::GBP),
            _ => None,
        }
    }

    /// Group and decimal separators, and whether the symbol trails.
    fn style(&self) -> (char, char, bool) {
        match self {
            // de-DE: 1.196,50 €
            Currency::EUR => ('.', ',', true),
            Currency::USD | Currency::GBP => (',', '.', false),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::from_code(s).ok_or_else(|| CommerceError::UnknownCurrency(s.to_string()))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (cents).
/// Arithmetic saturates instead of overflowing. All amounts share the
/// store's base currency; binary operators keep the left operand's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
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

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use devmobile_commerce::money::{Currency, Money};
    /// let price = Money::from_decimal(6.5, Currency::EUR);
    /// assert_eq!(price.amount_cents, 650);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Clamp negative amounts to zero.
    pub fn max_zero(&self) -> Self {
        Self::new(self.amount_cents.max(0), self.currency)
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format for display in the currency's store locale.
    ///
    /// ```
    /// use devmobile_commerce::money::{Currency, Money};
    /// assert_eq!(Money::new(119650, Currency::EUR).display(), "1.196,50\u{a0}€");
    /// assert_eq!(Money::new(119650, Currency::USD).display(), "$1,196.50");
    /// ```
    pub fn display(&self) -> String {
        let amount = self.display_amount();
        let (_, _, symbol_trails) = self.currency.style();
        if symbol_trails {
            format!("{}\u{a0}{}", amount, self.currency.symbol())
        } else if let Some(unsigned) = amount.strip_prefix('-') {
            format!("-{}{}", self.currency.symbol(), unsigned)
        } else {
            format!("{}{}", self.currency.symbol(), amount)
        }
    }

    /// Format without symbol, with grouping (e.g., "1.196,50").
    pub fn display_amount(&self) -> String {
        let (group, decimal, _) = self.currency.style();
        let places = self.currency.decimal_places();
        let divisor = 10_u64.pow(places);
        let abs = self.amount_cents.unsigned_abs();
        let whole = (abs / divisor).to_string();

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, c) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(group);
            }
            grouped.push(c);
        }

        let sign = if self.amount_cents < 0 { "-" } else { "" };
        if places == 0 {
            return format!("{sign}{grouped}");
        }
        format!(
            "{sign}{grouped}{decimal}{:0width$}",
            abs % divisor,
            width = places as usize
        )
    }

    /// Multiply by an integer factor (e.g., a quantity).
    pub fn multiply(&self, factor: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor), self.currency)
    }

    /// Multiply by a fractional rate, rounding half away from zero to a whole cent.
    pub fn multiply_rate(&self, rate: f64) -> Money {
        let scaled = (self.amount_cents as f64 * rate).round();
        // `as` saturates for out-of-range floats.
        Money::new(scaled as i64, self.currency)
    }

    /// Sum an iterator of Money values.
    pub fn sum<'a>(iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Money {
        iter.fold(Money::zero(currency), |acc, m| acc + *m)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::new(
            self.amount_cents.saturating_add(other.amount_cents),
            self.currency,
        )
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::new(
            self.amount_cents.saturating_sub(other.amount_cents),
            self.currency,
        )
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        self.multiply(factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        let mut iter = iter.peekable();
        let currency = iter.peek().map(|m| m.currency).unwrap_or_default();
        iter.fold(Money::zero(currency), |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Render a rate as a whole percentage (`0.1` becomes `"10%"`).
pub fn format_percent(rate: f64) -> String {
    format!("{}%", (rate * 100.0).round() as i64)
}
