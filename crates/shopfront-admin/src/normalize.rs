//! Flattening of the six Admin API discount subtypes into [`Promotion`]s.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use shopfront_core::{DiscountKind, DiscountMethod, Promotion, DISPLAY_CURRENCY};

use crate::types::{RawDiscount, RawDiscountNode, RawDiscountValue};

const ACTIVE_STATUS: &str = "ACTIVE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Subtype {
    Basic,
    FreeShipping,
    BuyXGetY,
}

fn classify(typename: &str) -> Option<(DiscountMethod, Subtype)> {
    let parsed = match typename {
        "DiscountCodeBasic" => (DiscountMethod::Code, Subtype::Basic),
        "DiscountAutomaticBasic" => (DiscountMethod::Automatic, Subtype::Basic),
        "DiscountCodeFreeShipping" => (DiscountMethod::Code, Subtype::FreeShipping),
        "DiscountAutomaticFreeShipping" => (DiscountMethod::Automatic, Subtype::FreeShipping),
        "DiscountCodeBxgy" => (DiscountMethod::Code, Subtype::BuyXGetY),
        "DiscountAutomaticBxgy" => (DiscountMethod::Automatic, Subtype::BuyXGetY),
        _ => return None,
    };
    Some(parsed)
}

/// Converts one discount node, or `None` for subtypes outside the six the
/// storefront understands and for nodes missing an id, start time, or value.
///
/// Status and time window are not checked here; see [`active_promotions`].
#[must_use]
pub fn normalize_discount(node: RawDiscountNode) -> Option<Promotion> {
    let id = node.id.filter(|id| !id.is_empty())?;
    let discount = node.discount?;
    let Some((method, subtype)) = classify(&discount.typename) else {
        tracing::debug!(id = %id, typename = %discount.typename, "skipping unsupported discount subtype");
        return None;
    };

    let kind = match subtype {
        Subtype::FreeShipping => DiscountKind::FreeShipping,
        Subtype::BuyXGetY => DiscountKind::BuyXGetY,
        Subtype::Basic => basic_kind(&discount)?,
    };

    let code = match method {
        DiscountMethod::Code => discount
            .codes
            .and_then(|c| c.nodes.into_iter().map(|n| n.code).find(|c| !c.is_empty())),
        DiscountMethod::Automatic => None,
    };

    let title = discount.title.unwrap_or_default();
    Some(Promotion {
        id,
        summary: discount.summary.unwrap_or_else(|| title.clone()),
        title,
        code,
        method,
        kind,
        starts_at: discount.starts_at?,
        ends_at: discount.ends_at,
    })
}

fn basic_kind(discount: &RawDiscount) -> Option<DiscountKind> {
    let value: &RawDiscountValue = discount.customer_gets.as_ref()?.value.as_ref()?;
    if let Some(fraction) = value.percentage {
        let percent = Decimal::from_f64(fraction * 100.0)?.round_dp(2).normalize();
        return Some(DiscountKind::Percentage { percent });
    }
    let amount = value.amount.as_ref()?.to_money(DISPLAY_CURRENCY)?;
    Some(DiscountKind::FixedAmount { amount })
}

/// Normalizes `nodes` and keeps the promotions that are `ACTIVE` and whose
/// `[starts_at, ends_at)` window contains `now`.
#[must_use]
pub fn active_promotions(nodes: Vec<RawDiscountNode>, now: DateTime<Utc>) -> Vec<Promotion> {
    nodes
        .into_iter()
        .filter(|node| {
            node.discount
                .as_ref()
                .and_then(|d| d.status.as_deref())
                .is_some_and(|status| status.eq_ignore_ascii_case(ACTIVE_STATUS))
        })
        .filter_map(normalize_discount)
        .filter(|promo| promo.is_active_at(now))
        .collect()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
