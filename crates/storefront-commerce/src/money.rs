//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. Catalog prices are
//! exchanged as plain decimal numbers (`109.95`); see [`decimal`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }

    fn minor_units(&self) -> i64 {
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
/// Amounts are stored in the smallest unit of the currency (e.g., cents for USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub const fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Shorthand for a USD amount in cents.
    pub const fn usd(amount_cents: i64) -> Self {
        Self::new(amount_cents, Currency::USD)
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use storefront_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::USD);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let amount_cents = (amount * currency.minor_units() as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create from a decimal amount that is a whole number of minor units.
    ///
    /// Returns None when the amount carries more decimal places than the
    /// currency has, or does not fit.
    pub fn from_decimal_exact(amount: f64, currency: Currency) -> Option<Self> {
        let scaled = amount * currency.minor_units() as f64;
        let rounded = scaled.round();
        if !rounded.is_finite() || rounded.abs() >= i64::MAX as f64 {
            return None;
        }
        // f64 noise such as 109.95 * 100 = 10994.999999999998 is tolerated
        if (scaled - rounded).abs() > 1e-9 * scaled.abs().max(1.0) {
            return None;
        }
        Some(Self::new(rounded as i64, currency))
    }

    /// Create a zero amount in the given currency.
    pub const fn zero(currency: Currency) -> Self {
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

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / self.currency.minor_units() as f64
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        if places == 0 {
            return self.amount_cents.to_string();
        }
        let units = self.currency.minor_units();
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        format!(
            "{sign}{}.{:0places$}",
            abs / units as u64,
            abs % units as u64
        )
    }

    /// Try to add another Money value, returning None on currency mismatch
    /// or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Calculate a percentage of this amount, rounded to the nearest minor unit.
    pub fn percentage(&self, percent: f64) -> Money {
        let amount = (self.amount_cents as f64 * percent / 100.0).round() as i64;
        Money::new(amount, self.currency)
    }

}

impl Add for Money {
    type Output = Money;

    /// # Panics
    /// Panics if currencies don't match. Use `try_add` for fallible addition.
    fn add(self, other: Money) -> Money {
        self.try_add(&other)
            .expect("Currency mismatch or overflow in addition")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Serde adapter that encodes a [`Money`] as a bare decimal number in the
/// default currency, e.g. `"price": 109.95`.
///
/// Deserialization rejects negative and non-finite numbers, and amounts
/// finer than a cent. Nothing is rounded on the way in.
pub mod decimal {
    use super::{Currency, Money};
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(D::Error::custom(format!(
                "price must be a non-negative number, got {amount}"
            )));
        }
        let currency = Currency::default();
        Money::from_decimal_exact(amount, currency).ok_or_else(|| {
            D::Error::custom(format!(
                "price {amount} has more than {} decimal places",
                currency.decimal_places()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::USD);
        assert_eq!(m.amount_cents, 4999);

        let m = Money::from_decimal(100.0, Currency::JPY);
        assert_eq!(m.amount_cents, 100);

        // 0.1 + 0.2 style inputs still land on the right cent
        let m = Money::from_decimal(109.95, Currency::USD);
        assert_eq!(m.amount_cents, 10995);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::usd(4999).display(), "$49.99");
        assert_eq!(Money::usd(5).display(), "$0.05");
        assert_eq!(Money::usd(0).display(), "$0.00");
        assert_eq!(Money::new(100, Currency::JPY).display(), "\u{00a5}100");
    }

    #[test]
    fn test_money_addition() {
        let c = Money::usd(1000) + Money::usd(500);
        assert_eq!(c.amount_cents, 1500);
    }

    #[test]
    fn test_try_add_currency_mismatch() {
        let usd = Money::usd(1000);
        let eur = Money::new(1000, Currency::EUR);
        assert!(usd.try_add(&eur).is_none());
    }

    #[test]
    fn test_try_multiply_overflow() {
        assert_eq!(Money::usd(1000).try_multiply(3).unwrap().amount_cents, 3000);
        assert!(Money::usd(i64::MAX).try_multiply(2).is_none());
    }

    #[test]
    fn test_money_percentage() {
        let tax = Money::usd(10000).percentage(10.0);
        assert_eq!(tax.amount_cents, 1000);

        // $22.30 * 10% = $2.23
        assert_eq!(Money::usd(2230).percentage(10.0).amount_cents, 223);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("USD"), Some(Currency::USD));
        assert_eq!(Currency::from_code("eur"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("INVALID"), None);
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Priced {
        #[serde(with = "decimal")]
        price: Money,
    }

    #[test]
    fn test_decimal_serde() {
        let json = serde_json::to_string(&Priced {
            price: Money::usd(10995),
        })
        .unwrap();
        assert_eq!(json, r#"{"price":109.95}"#);

        let parsed: Priced = serde_json::from_str(r#"{"price":22.3}"#).unwrap();
        assert_eq!(parsed.price, Money::usd(2230));
    }

    #[test]
    fn test_decimal_rejects_negative() {
        let parsed: Result<Priced, _> = serde_json::from_str(r#"{"price":-1.0}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_from_decimal_exact() {
        assert_eq!(Money::from_decimal_exact(109.95, Currency::USD), Some(Money::usd(10995)));
        assert_eq!(Money::from_decimal_exact(0.1, Currency::USD), Some(Money::usd(10)));
        assert_eq!(Money::from_decimal_exact(0.125, Currency::USD), None);
        assert_eq!(Money::from_decimal_exact(10.5, Currency::JPY), None);
        assert_eq!(Money::from_decimal_exact(f64::MAX, Currency::USD), None);
    }

    #[test]
    fn test_decimal_rejects_sub_cent_price() {
        let parsed: Result<Priced, _> = serde_json::from_str(r#"{"price":0.125}"#);
        let err = parsed.unwrap_err().to_string();
        assert!(err.contains("more than 2 decimal places"), "{err}");

        let parsed: Priced = serde_json::from_str(r#"{"price":109.95}"#).unwrap();
        assert_eq!(parsed.price, Money::usd(10995));
    }
}
