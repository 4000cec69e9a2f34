use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// One discount from the administrative API, flattened across subtypes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: String,
    pub title: String,
    /// Redeemable code; `None` for automatic discounts.
    pub code: Option<String>,
    pub method: DiscountMethod,
    pub kind: DiscountKind,
    /// Merchant-facing summary, e.g. `"15% off entire order"`.
    pub summary: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
}

impl Promotion {
    /// `true` when `now` falls within `[starts_at, ends_at)`.
    #[must_use]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.starts_at <= now && self.ends_at.is_none_or(|end| now < end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountMethod {
    Automatic,
    Code,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountKind {
    Percentage {
        /// Whole-number percentage, e.g. `15` for 15% off.
        percent: Decimal,
    },
    FixedAmount {
        amount: Money,
    },
    FreeShipping,
    BuyXGetY,
}

/// The discount feed handed to the storefront.
///
/// `active` is `false` when the feed could not be loaded (missing
/// credentials, request failure) as well as when nothing is running.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveDiscounts {
    pub active: bool,
    pub discounts: Vec<Promotion>,
}

impl ActiveDiscounts {
    #[must_use]
    pub fn inactive() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_promotions(discounts: Vec<Promotion>) -> Self {
        Self {
            active: !discounts.is_empty(),
            discounts,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn make_promotion(ends_at: Option<DateTime<Utc>>) -> Promotion {
        Promotion {
            id: "gid://shopify/DiscountCodeNode/1".to_string(),
            title: "Spring".to_string(),
            code: Some("SPRING15".to_string()),
            method: DiscountMethod::Code,
            kind: DiscountKind::FreeShipping,
            summary: "Free shipping".to_string(),
            starts_at: Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
            ends_at,
        }
    }

    #[test]
    fn open_ended_promotion_is_active_after_start() {
        let promo = make_promotion(None);
        assert!(promo.is_active_at(Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap()));
        assert!(!promo.is_active_at(Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn promotion_is_inactive_at_end_instant() {
        let end = Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap();
        let promo = make_promotion(Some(end));
        assert!(!promo.is_active_at(end));
    }

    #[test]
    fn from_promotions_marks_empty_feed_inactive() {
        assert!(!ActiveDiscounts::from_promotions(vec![]).active);
        assert!(ActiveDiscounts::from_promotions(vec![make_promotion(None)]).active);
    }

    #[test]
    fn discount_kind_serializes_with_type_tag() {
        let json = serde_json::to_value(DiscountKind::BuyXGetY).unwrap();
        assert_eq!(json["type"], "buy_x_get_y");
    }
}
