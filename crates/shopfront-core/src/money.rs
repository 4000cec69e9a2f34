//! Canonical money representation and the dual price shape accepted on ingress.
//!
//! Prices reach the storefront in two shapes: a bare decimal string
//! (`"145.00"`) from flattened product data, and a `MoneyV2` object
//! (`{"amount": "145.00", "currencyCode": "USD"}`) straight from the
//! Storefront API. [`PriceValue`] accepts either; [`PriceValue::amount`]
//! collapses both into a `Decimal` at the boundary.

use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rusty_money::{iso, Money as DisplayMoney};
use serde::{Deserialize, Serialize};

/// Currency code used for every rendered price string.
///
/// The storefront serves a single market, so prices are always displayed in
/// USD formatting even when the API reports another currency code.
pub const DISPLAY_CURRENCY: &str = "USD";

/// An amount with its ISO 4217 currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: Decimal,
    pub currency_code: String,
}

impl Money {
    #[must_use]
    pub fn new(amount: Decimal, currency_code: impl Into<String>) -> Self {
        Self {
            amount,
            currency_code: currency_code.into(),
        }
    }

    #[must_use]
    pub fn zero(currency_code: impl Into<String>) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Display string in the fixed storefront currency, e.g. `"$1,234.50"`.
    #[must_use]
    pub fn display(&self) -> String {
        format_display(self.amount)
    }
}

/// A bare amount: either a decimal string or a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountScalar {
    Text(String),
    Number(f64),
}

impl AmountScalar {
    fn to_decimal(&self) -> Option<Decimal> {
        match self {
            AmountScalar::Text(raw) => parse_amount(raw),
            AmountScalar::Number(n) => Decimal::from_f64(*n),
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, AmountScalar::Text(raw) if raw.trim().is_empty())
    }
}

/// A price as it arrives from either API surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Nested {
        amount: AmountScalar,
        #[serde(rename = "currencyCode", alias = "currency_code", default)]
        currency_code: Option<String>,
    },
    Scalar(AmountScalar),
}

impl PriceValue {
    /// Shorthand for a bare decimal string.
    #[must_use]
    pub fn text(raw: impl Into<String>) -> Self {
        PriceValue::Scalar(AmountScalar::Text(raw.into()))
    }

    /// The parsed amount, or `None` when the value does not parse to a finite
    /// decimal.
    #[must_use]
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            PriceValue::Nested { amount, .. } | PriceValue::Scalar(amount) => amount.to_decimal(),
        }
    }

    /// The currency code carried by the nested shape, if any.
    #[must_use]
    pub fn currency_code(&self) -> Option<&str> {
        match self {
            PriceValue::Nested { currency_code, .. } => {
                currency_code.as_deref().filter(|c| !c.is_empty())
            }
            PriceValue::Scalar(_) => None,
        }
    }

    /// `true` for an empty string amount, which callers treat the same as an
    /// absent price.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            PriceValue::Nested { amount, .. } | PriceValue::Scalar(amount) => amount.is_blank(),
        }
    }

    /// Converts into canonical [`Money`], falling back to `default_currency`
    /// when the value carries no code.
    #[must_use]
    pub fn to_money(&self, default_currency: &str) -> Option<Money> {
        let amount = self.amount()?;
        let currency = self.currency_code().unwrap_or(default_currency);
        Some(Money::new(amount, currency))
    }
}

impl From<&Money> for PriceValue {
    fn from(money: &Money) -> Self {
        PriceValue::Nested {
            amount: AmountScalar::Text(money.amount.to_string()),
            currency_code: Some(money.currency_code.clone()),
        }
    }
}

/// Parses a decimal amount string. Blank or non-numeric input yields `None`.
#[must_use]
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Formats an amount in the fixed display currency with two decimals and
/// thousands separators.
#[must_use]
pub fn format_display(amount: Decimal) -> String {
    DisplayMoney::from_decimal(amount.round_dp(2), iso::USD).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(raw: &str) -> Decimal {
        Decimal::from_str(raw).unwrap()
    }

    #[test]
    fn parse_amount_accepts_decimal_strings() {
        assert_eq!(parse_amount("145.00"), Some(dec("145.00")));
        assert_eq!(parse_amount(" 24 "), Some(dec("24")));
    }

    #[test]
    fn parse_amount_rejects_blank_and_garbage() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("   "), None);
        assert_eq!(parse_amount("free"), None);
        assert_eq!(parse_amount("NaN"), None);
    }

    #[test]
    fn price_value_deserializes_plain_string() {
        let value: PriceValue = serde_json::from_str("\"12.50\"").unwrap();
        assert_eq!(value.amount(), Some(dec("12.50")));
        assert_eq!(value.currency_code(), None);
    }

    #[test]
    fn price_value_deserializes_nested_money() {
        let value: PriceValue =
            serde_json::from_str(r#"{"amount":"12.50","currencyCode":"CAD"}"#).unwrap();
        assert_eq!(value.amount(), Some(dec("12.50")));
        assert_eq!(value.currency_code(), Some("CAD"));
    }

    #[test]
    fn price_value_deserializes_json_number() {
        let value: PriceValue = serde_json::from_str("9.5").unwrap();
        assert_eq!(value.amount(), Some(dec("9.5")));
    }

    #[test]
    fn to_money_uses_default_currency_for_plain_strings() {
        let money = PriceValue::text("3.00").to_money("USD").unwrap();
        assert_eq!(money.currency_code, "USD");
        assert_eq!(money.amount, dec("3.00"));
    }

    #[test]
    fn format_display_uses_two_decimals_and_separators() {
        assert_eq!(format_display(dec("20")), "$20.00");
        assert_eq!(format_display(dec("1234.5")), "$1,234.50");
        assert_eq!(format_display(dec("0")), "$0.00");
    }

    #[test]
    fn display_ignores_non_usd_currency_code() {
        let money = Money::new(dec("1500"), "EUR");
        assert_eq!(money.display(), "$1,500.00");
    }
}
