use serde::{Deserialize, Serialize};

use crate::money::{Money, PriceValue};
use crate::pricing::{summarize_sale, SaleInput, SaleSummary};

/// Image rendered when a product has no media of its own.
pub const PLACEHOLDER_IMAGE_URL: &str = "/images/placeholder.png";

/// Title used when the API returns a product without one.
pub const UNTITLED_PRODUCT: &str = "Untitled Product";

/// A product flattened from the Storefront API's edge/node graph, ready for
/// rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontProduct {
    /// Storefront global ID, e.g. `"gid://shopify/Product/123"`.
    pub id: String,
    pub title: String,
    /// URL slug, e.g. `"starter-kit"`.
    pub handle: String,
    pub description: String,
    /// Never empty: holds a placeholder entry when the product has no images.
    pub images: Vec<ProductImage>,
    pub variants: Vec<ProductVariant>,
    pub available_for_sale: bool,
    pub tags: Vec<String>,
    /// Product type / category label. `None` when blank.
    pub category: Option<String>,
    /// Handles of the collections the product belongs to.
    pub collections: Vec<String>,
    /// Lowest variant price, or zero when unknown.
    pub price: Money,
    pub compare_at_price: Option<Money>,
    pub badge: Option<ProductBadge>,
}

impl StorefrontProduct {
    /// The variant a product card shows before the shopper picks options:
    /// the first available variant, else the first variant.
    #[must_use]
    pub fn default_variant(&self) -> Option<&ProductVariant> {
        self.variants
            .iter()
            .find(|v| v.available_for_sale)
            .or_else(|| self.variants.first())
    }

    /// Finds the variant whose selected options match every given pair.
    ///
    /// Empty `selections` resolve to [`Self::default_variant`].
    #[must_use]
    pub fn select_variant(&self, selections: &[SelectedOption]) -> Option<&ProductVariant> {
        if selections.is_empty() {
            return self.default_variant();
        }
        self.variants.iter().find(|variant| {
            selections.iter().all(|wanted| {
                variant
                    .selected_options
                    .iter()
                    .any(|opt| opt.name.eq_ignore_ascii_case(&wanted.name) && opt.value == wanted.value)
            })
        })
    }

    /// Sale summary for the product card, taken from the product-level price
    /// range.
    #[must_use]
    pub fn sale_summary(&self) -> SaleSummary {
        summarize_sale(&SaleInput {
            price: Some(PriceValue::from(&self.price)),
            compare_at_price: self.compare_at_price.as_ref().map(PriceValue::from),
            currency_code: Some(self.price.currency_code.clone()),
        })
    }

    /// The first image; always present after adaptation.
    #[must_use]
    pub fn featured_image(&self) -> Option<&ProductImage> {
        self.images.first()
    }
}

/// A purchasable configuration of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: String,
    pub title: String,
    pub price: Money,
    pub compare_at_price: Option<Money>,
    pub available_for_sale: bool,
    pub selected_options: Vec<SelectedOption>,
    pub image: Option<ProductImage>,
}

impl ProductVariant {
    #[must_use]
    pub fn sale_summary(&self) -> SaleSummary {
        summarize_sale(&SaleInput {
            price: Some(PriceValue::from(&self.price)),
            compare_at_price: self.compare_at_price.as_ref().map(PriceValue::from),
            currency_code: Some(self.price.currency_code.clone()),
        })
    }
}

/// A single option name/value pair, e.g. `Size = "Large"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    pub alt_text: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

impl ProductImage {
    #[must_use]
    pub fn placeholder(alt_text: &str) -> Self {
        Self {
            url: PLACEHOLDER_IMAGE_URL.to_string(),
            alt_text: Some(alt_text.to_string()),
            width: None,
            height: None,
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.url == PLACEHOLDER_IMAGE_URL
    }
}

/// Presentational marker derived from title/collection heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductBadge {
    Kit,
}

impl std::fmt::Display for ProductBadge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductBadge::Kit => write!(f, "Kit"),
        }
    }
}
