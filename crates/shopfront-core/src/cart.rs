use serde::{Deserialize, Serialize};

use crate::money::{Money, PriceValue};
use crate::pricing::{summarize_sale, SaleInput, SaleSummary};
use crate::products::{ProductImage, SelectedOption};

/// Snapshot of the remote cart. Always replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Opaque cart identifier, e.g. `"gid://shopify/Cart/abc?key=..."`.
    pub id: String,
    pub checkout_url: String,
    pub total_quantity: u32,
    pub lines: Vec<CartLine>,
    /// Authoritative cost fields from the backend; never recomputed locally.
    pub cost: CartCost,
    pub discount_codes: Vec<CartDiscountCode>,
}

impl Cart {
    #[must_use]
    pub fn line(&self, line_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    /// The line holding `variant_id`, if the variant is already in the cart.
    #[must_use]
    pub fn line_for_variant(&self, variant_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.merchandise.variant_id == variant_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line quantities, for badge counts while a mutation is pending.
    #[must_use]
    pub fn line_quantity(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: String,
    /// Always at least 1.
    pub quantity: u32,
    pub merchandise: LineMerchandise,
    /// `None` only on optimistic lines that the backend has not priced yet.
    pub cost: Option<LineCost>,
}

impl CartLine {
    /// Sale summary for the line's variant.
    #[must_use]
    pub fn sale_summary(&self) -> SaleSummary {
        let merch = &self.merchandise;
        summarize_sale(&SaleInput {
            price: Some(PriceValue::from(&merch.price)),
            compare_at_price: merch.compare_at_price.as_ref().map(PriceValue::from),
            currency_code: Some(merch.price.currency_code.clone()),
        })
    }
}

/// The variant a cart line refers to, plus enough of its parent product to
/// render the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineMerchandise {
    pub variant_id: String,
    pub variant_title: String,
    pub product_id: String,
    pub product_title: String,
    pub product_handle: String,
    pub image: Option<ProductImage>,
    pub price: Money,
    pub compare_at_price: Option<Money>,
    pub selected_options: Vec<SelectedOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineCost {
    pub amount_per_quantity: Money,
    pub compare_at_amount_per_quantity: Option<Money>,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartCost {
    pub subtotal: Money,
    pub total: Money,
    pub total_tax: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartDiscountCode {
    pub code: String,
    pub applicable: bool,
}
