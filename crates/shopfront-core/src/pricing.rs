//! Sale-price derivation shared by every surface that shows sale UI.
//!
//! A variant is on sale if and only if its compare-at amount parses and is
//! strictly greater than its (parseable) price. Nothing else feeds into the
//! judgement; discount codes never mark an item as on sale.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::money::{format_display, PriceValue, DISPLAY_CURRENCY};

/// A variant-like value: price, optional compare-at price, optional currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleInput {
    #[serde(default)]
    pub price: Option<PriceValue>,
    #[serde(default)]
    pub compare_at_price: Option<PriceValue>,
    #[serde(default)]
    pub currency_code: Option<String>,
}

/// Normalized sale judgement plus display strings.
///
/// `compare_at` and the `*_text` fields other than `price_text` are filled
/// only when `is_on_sale`; otherwise they are `None` and empty, so a
/// compare-at at or below the price never surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleSummary {
    pub is_on_sale: bool,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub price_text: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub compare_at: Option<Decimal>,
    pub compare_at_text: String,
    pub save_amount_text: String,
    pub save_percent_text: String,
    pub percent_off: u8,
    pub currency_code: String,
}

/// Computes the sale summary for a variant-like value.
///
/// Never fails: an unparseable price or compare-at price degrades to
/// "not on sale" and an unparseable or missing price displays as zero.
#[must_use]
pub fn summarize_sale(input: &SaleInput) -> SaleSummary {
    let currency_code = input
        .currency_code
        .clone()
        .filter(|c| !c.is_empty())
        .or_else(|| {
            input
                .price
                .as_ref()
                .and_then(PriceValue::currency_code)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| DISPLAY_CURRENCY.to_string());

    // Missing price counts as zero; a present but unparseable price yields no
    // comparable amount at all.
    let price = match input.price.as_ref().filter(|p| !p.is_blank()) {
        None => Some(Decimal::ZERO),
        Some(value) => value.amount(),
    };
    let compare_at = input
        .compare_at_price
        .as_ref()
        .filter(|c| !c.is_blank())
        .and_then(PriceValue::amount);

    let display_price = price.unwrap_or(Decimal::ZERO);
    let sale = match (price, compare_at) {
        (Some(p), Some(c)) if c > p => Some((p, c)),
        _ => None,
    };

    match sale {
        Some((p, c)) => {
            let saved = c - p;
            let percent_off = percent_off(saved, c);
            SaleSummary {
                is_on_sale: true,
                price: p,
                price_text: format_display(p),
                compare_at: Some(c),
                compare_at_text: format_display(c),
                save_amount_text: format_display(saved),
                save_percent_text: format!("{percent_off}%"),
                percent_off,
                currency_code,
            }
        }
        None => SaleSummary {
            is_on_sale: false,
            price: display_price,
            price_text: format_display(display_price),
            compare_at: None,
            compare_at_text: String::new(),
            save_amount_text: String::new(),
            save_percent_text: String::new(),
            percent_off: 0,
            currency_code,
        },
    }
}

/// `round(saved / compare_at * 100)`, clamped to `0..=100`.
fn percent_off(saved: Decimal, compare_at: Decimal) -> u8 {
    if compare_at <= Decimal::ZERO {
        return 0;
    }
    saved
        .checked_div(compare_at)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|pct| pct.to_u8())
        .map_or(0, |pct| pct.min(100))
}

#[cfg(test)]
#[path = "pricing_test.rs"]
mod tests;
