//! Raw Admin API discount shapes.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use shopfront_core::PriceValue;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DiscountNodesData {
    #[serde(rename = "discountNodes")]
    pub discount_nodes: DiscountNodeConnection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DiscountNodeConnection {
    pub nodes: Vec<RawDiscountNode>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawDiscountNode {
    pub id: Option<String>,
    pub discount: Option<RawDiscount>,
}

/// Union over the six discount subtypes; `__typename` tells them apart and
/// subtype-specific fields are simply absent on the others.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawDiscount {
    #[serde(rename = "__typename")]
    pub typename: String,
    pub title: Option<String>,
    /// `ACTIVE`, `SCHEDULED`, or `EXPIRED`.
    pub status: Option<String>,
    pub summary: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub codes: Option<RawCodeConnection>,
    pub customer_gets: Option<RawCustomerGets>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawCodeConnection {
    pub nodes: Vec<RawRedeemCode>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawRedeemCode {
    pub code: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawCustomerGets {
    pub value: Option<RawDiscountValue>,
}

/// `DiscountPercentage { percentage }` or `DiscountAmount { amount }`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawDiscountValue {
    #[serde(rename = "__typename")]
    pub typename: String,
    /// Fraction in `0.0..=1.0`, e.g. `0.15` for 15% off.
    pub percentage: Option<f64>,
    pub amount: Option<PriceValue>,
}
