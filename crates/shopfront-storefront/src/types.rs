//! Raw Storefront API response shapes.
//!
//! Every field is optional or defaulted: the adapter owns the decision of what
//! an absent field means, so deserialization itself only fails on structurally
//! wrong JSON (e.g. a string where an object belongs).
//!
//! Connections are modelled as both `edges { node }` and `nodes`, since the
//! API exposes either form depending on the query.

use serde::Deserialize;
use shopfront_core::PriceValue;

/// A paginated list in edge/node or nodes form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self {
            edges: Vec::new(),
            nodes: Vec::new(),
        }
    }
}

impl<T> Connection<T> {
    #[must_use]
    pub fn from_nodes(nodes: Vec<T>) -> Self {
        Self {
            edges: Vec::new(),
            nodes,
        }
    }

    /// All nodes, edge form first.
    pub fn into_nodes(self) -> impl Iterator<Item = T> {
        self.edges.into_iter().map(|e| e.node).chain(self.nodes)
    }
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawProduct {
    pub id: Option<String>,
    pub handle: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub available_for_sale: Option<bool>,
    pub product_type: Option<String>,
    pub tags: Vec<String>,
    pub featured_image: Option<RawImage>,
    pub images: Connection<RawImage>,
    pub price_range: Option<RawPriceRange>,
    pub compare_at_price_range: Option<RawPriceRange>,
    pub collections: Connection<RawCollectionRef>,
    pub variants: Connection<RawVariant>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawImage {
    pub url: Option<String>,
    pub alt_text: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPriceRange {
    pub min_variant_price: Option<PriceValue>,
    pub max_variant_price: Option<PriceValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCollectionRef {
    pub handle: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawVariant {
    pub id: Option<String>,
    pub title: Option<String>,
    pub available_for_sale: Option<bool>,
    pub price: Option<PriceValue>,
    pub compare_at_price: Option<PriceValue>,
    pub selected_options: Vec<RawSelectedOption>,
    pub image: Option<RawImage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawSelectedOption {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCollection {
    pub id: Option<String>,
    pub handle: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<RawImage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCart {
    pub id: Option<String>,
    pub checkout_url: Option<String>,
    pub total_quantity: Option<i64>,
    pub cost: Option<RawCartCost>,
    pub discount_codes: Vec<RawDiscountCode>,
    pub lines: Connection<RawCartLine>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCartCost {
    pub subtotal_amount: Option<PriceValue>,
    pub total_amount: Option<PriceValue>,
    pub total_tax_amount: Option<PriceValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawDiscountCode {
    pub code: String,
    pub applicable: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCartLine {
    pub id: Option<String>,
    pub quantity: Option<i64>,
    pub cost: Option<RawLineCost>,
    pub merchandise: Option<RawMerchandise>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLineCost {
    pub amount_per_quantity: Option<PriceValue>,
    pub compare_at_amount_per_quantity: Option<PriceValue>,
    pub total_amount: Option<PriceValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMerchandise {
    pub id: Option<String>,
    pub title: Option<String>,
    pub price: Option<PriceValue>,
    pub compare_at_price: Option<PriceValue>,
    pub selected_options: Vec<RawSelectedOption>,
    pub image: Option<RawImage>,
    pub product: Option<RawMerchandiseProduct>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMerchandiseProduct {
    pub id: Option<String>,
    pub title: Option<String>,
    pub handle: Option<String>,
}

/// Payload shared by every cart mutation (`cartLinesAdd`, `cartCreate`, ...).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCartPayload {
    pub cart: Option<RawCart>,
    pub user_errors: Vec<RawUserError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawUserError {
    pub field: Option<Vec<String>>,
    pub message: String,
    pub code: Option<String>,
}

impl RawUserError {
    /// Matches Shopify's "The specified cart does not exist." family.
    #[must_use]
    pub fn is_missing_cart(&self) -> bool {
        let message = self.message.to_ascii_lowercase();
        message.contains("cart does not exist") || message.contains("cart not found")
    }

    /// Matches rejections that target a line the cart no longer holds.
    #[must_use]
    pub fn is_missing_line(&self) -> bool {
        if self.code.as_deref() == Some("INVALID_MERCHANDISE_LINE") {
            return true;
        }
        let message = self.message.to_ascii_lowercase();
        message.contains("line") && (message.contains("does not exist") || message.contains("not found"))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMenu {
    pub handle: Option<String>,
    pub title: Option<String>,
    pub items: Vec<RawMenuItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawMenuItem {
    pub title: Option<String>,
    pub url: Option<String>,
    pub items: Vec<RawMenuItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPage {
    pub id: Option<String>,
    pub handle: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub body_summary: Option<String>,
    pub seo: Option<RawSeo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawSeo {
    pub title: Option<String>,
    pub description: Option<String>,
}
