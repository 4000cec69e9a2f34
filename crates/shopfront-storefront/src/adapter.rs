//! Conversion from raw Storefront API shapes into the flat types in
//! [`shopfront_core`].
//!
//! Product adaptation is total: missing or malformed fields fall back to
//! defaults (placeholder image, zero price, [`UNTITLED_PRODUCT`]) so a bad
//! record never fails a render. Carts are the exception; a cart without an
//! identifier cannot be mirrored and adapts to `None`.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shopfront_core::{
    Cart, CartCost, CartDiscountCode, CartLine, Collection, LineCost, LineMerchandise, Menu,
    MenuItem, Money, Page, PriceValue, ProductBadge, ProductImage, ProductVariant, SelectedOption,
    StorefrontProduct, DISPLAY_CURRENCY, UNTITLED_PRODUCT,
};

use crate::types::{
    Connection, RawCart, RawCollection, RawImage, RawMenu, RawMenuItem, RawPage, RawProduct,
    RawSelectedOption, RawVariant,
};

static KIT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bkits?\b").expect("valid kit regex"));

const DEFAULT_VARIANT_TITLE: &str = "Default Title";

/// Flattens a raw product.
#[must_use]
pub fn adapt_product(raw: RawProduct) -> StorefrontProduct {
    let title = non_blank(raw.title).unwrap_or_else(|| UNTITLED_PRODUCT.to_string());

    let currency = raw
        .price_range
        .as_ref()
        .and_then(|r| r.min_variant_price.as_ref())
        .and_then(PriceValue::currency_code)
        .map(str::to_owned)
        .or_else(|| {
            raw.variants
                .nodes
                .iter()
                .chain(raw.variants.edges.iter().map(|e| &e.node))
                .find_map(|v| v.price.as_ref().and_then(PriceValue::currency_code))
                .map(str::to_owned)
        })
        .unwrap_or_else(|| DISPLAY_CURRENCY.to_string());

    let mut images: Vec<ProductImage> = raw.images.into_nodes().filter_map(adapt_image).collect();
    if images.is_empty() {
        if let Some(featured) = raw.featured_image.and_then(adapt_image) {
            images.push(featured);
        }
    }
    if images.is_empty() {
        images.push(ProductImage::placeholder(&title));
    }

    let variants: Vec<ProductVariant> = raw
        .variants
        .into_nodes()
        .map(|v| adapt_variant(v, &currency))
        .collect();

    let collection_refs: Vec<(String, Option<String>)> = raw
        .collections
        .into_nodes()
        .filter_map(|c| non_blank(c.handle).map(|h| (h, c.title)))
        .collect();

    let badge = if KIT_PATTERN.is_match(&title)
        || collection_refs.iter().any(|(handle, title)| {
            KIT_PATTERN.is_match(handle) || title.as_deref().is_some_and(|t| KIT_PATTERN.is_match(t))
        }) {
        Some(ProductBadge::Kit)
    } else {
        None
    };

    let price = raw
        .price_range
        .as_ref()
        .and_then(|r| r.min_variant_price.as_ref())
        .and_then(|p| p.to_money(&currency))
        .or_else(|| {
            variants
                .iter()
                .map(|v| v.price.clone())
                .min_by(|a, b| a.amount.cmp(&b.amount))
        })
        .unwrap_or_else(|| Money::zero(currency.clone()));

    // Compare-at comes from the variant carrying the headline price; the
    // range minimum is only a fallback because the API reports "0.0" there
    // when no variant has a compare-at price.
    let compare_at_price = variants
        .iter()
        .find(|v| v.price.amount == price.amount)
        .and_then(|v| v.compare_at_price.clone())
        .or_else(|| {
            raw.compare_at_price_range
                .as_ref()
                .and_then(|r| r.min_variant_price.as_ref())
                .and_then(|p| p.to_money(&currency))
                .filter(|m| m.amount > Decimal::ZERO)
        });

    let available_for_sale = raw
        .available_for_sale
        .unwrap_or_else(|| variants.iter().any(|v| v.available_for_sale));

    StorefrontProduct {
        id: raw.id.unwrap_or_default(),
        title,
        handle: raw.handle.unwrap_or_default(),
        description: raw.description.unwrap_or_default(),
        images,
        variants,
        available_for_sale,
        tags: raw.tags,
        category: non_blank(raw.product_type),
        collections: collection_refs.into_iter().map(|(handle, _)| handle).collect(),
        price,
        compare_at_price,
        badge,
    }
}

/// Adapts a product from arbitrary JSON.
///
/// Each field is read independently, so one malformed field only costs that
/// field. A non-object input yields an all-defaults product.
#[must_use]
pub fn adapt_product_value(value: &Value) -> StorefrontProduct {
    let raw = RawProduct {
        id: field(value, "id"),
        handle: field(value, "handle"),
        title: field(value, "title"),
        description: field(value, "description"),
        available_for_sale: field(value, "availableForSale"),
        product_type: field(value, "productType"),
        tags: field(value, "tags"),
        featured_image: field(value, "featuredImage"),
        images: Connection::from_nodes(connection_nodes(value, "images")),
        price_range: field(value, "priceRange"),
        compare_at_price_range: field(value, "compareAtPriceRange"),
        collections: Connection::from_nodes(connection_nodes(value, "collections")),
        variants: Connection::from_nodes(connection_nodes(value, "variants")),
    };
    adapt_product(raw)
}

/// Adapts every product node in a products connection value.
#[must_use]
pub fn adapt_product_connection(value: &Value) -> Vec<StorefrontProduct> {
    connection_values(value)
        .filter(|node| node.as_object().is_some_and(|o| !o.is_empty()))
        .map(adapt_product_value)
        .collect()
}

fn adapt_variant(raw: RawVariant, currency: &str) -> ProductVariant {
    ProductVariant {
        id: raw.id.unwrap_or_default(),
        title: non_blank(raw.title).unwrap_or_else(|| DEFAULT_VARIANT_TITLE.to_string()),
        price: raw
            .price
            .as_ref()
            .and_then(|p| p.to_money(currency))
            .unwrap_or_else(|| Money::zero(currency)),
        compare_at_price: raw.compare_at_price.as_ref().and_then(|p| p.to_money(currency)),
        available_for_sale: raw.available_for_sale.unwrap_or(false),
        selected_options: adapt_options(raw.selected_options),
        image: raw.image.and_then(adapt_image),
    }
}

fn adapt_options(raw: Vec<RawSelectedOption>) -> Vec<SelectedOption> {
    raw.into_iter()
        .map(|o| SelectedOption {
            name: o.name,
            value: o.value,
        })
        .collect()
}

fn adapt_image(raw: RawImage) -> Option<ProductImage> {
    Some(ProductImage {
        url: non_blank(raw.url)?,
        alt_text: raw.alt_text,
        width: raw.width,
        height: raw.height,
    })
}

/// Converts a raw cart snapshot. Lines with a quantity below 1 or without
/// merchandise are dropped.
#[must_use]
pub fn adapt_cart(raw: RawCart) -> Option<Cart> {
    let id = non_blank(raw.id)?;

    let cost = raw.cost.unwrap_or_default();
    let currency = cost
        .total_amount
        .as_ref()
        .and_then(PriceValue::currency_code)
        .unwrap_or(DISPLAY_CURRENCY)
        .to_string();
    let money = |value: Option<&PriceValue>| {
        value
            .and_then(|v| v.to_money(&currency))
            .unwrap_or_else(|| Money::zero(currency.clone()))
    };

    let lines: Vec<CartLine> = raw
        .lines
        .into_nodes()
        .filter_map(|line| {
            let line_id = non_blank(line.id)?;
            let quantity = line
                .quantity
                .and_then(|q| u32::try_from(q).ok())
                .filter(|q| *q >= 1)?;
            let Some(merch) = line.merchandise else {
                tracing::warn!(line_id = %line_id, "cart line without merchandise; dropping");
                return None;
            };
            let product = merch.product.unwrap_or_default();
            let line_cost = line.cost.map(|c| LineCost {
                amount_per_quantity: money(c.amount_per_quantity.as_ref()),
                compare_at_amount_per_quantity: c
                    .compare_at_amount_per_quantity
                    .as_ref()
                    .and_then(|v| v.to_money(&currency)),
                total: money(c.total_amount.as_ref()),
            });
            Some(CartLine {
                id: line_id,
                quantity,
                merchandise: LineMerchandise {
                    variant_id: merch.id.unwrap_or_default(),
                    variant_title: non_blank(merch.title)
                        .unwrap_or_else(|| DEFAULT_VARIANT_TITLE.to_string()),
                    product_id: product.id.unwrap_or_default(),
                    product_title: non_blank(product.title)
                        .unwrap_or_else(|| UNTITLED_PRODUCT.to_string()),
                    product_handle: product.handle.unwrap_or_default(),
                    image: merch.image.and_then(adapt_image),
                    price: money(merch.price.as_ref()),
                    compare_at_price: merch
                        .compare_at_price
                        .as_ref()
                        .and_then(|v| v.to_money(&currency)),
                    selected_options: adapt_options(merch.selected_options),
                },
                cost: line_cost,
            })
        })
        .collect();

    let total_quantity = raw
        .total_quantity
        .and_then(|q| u32::try_from(q).ok())
        .unwrap_or_else(|| lines.iter().map(|l| l.quantity).sum());

    Some(Cart {
        id,
        checkout_url: raw.checkout_url.unwrap_or_default(),
        total_quantity,
        cost: CartCost {
            subtotal: money(cost.subtotal_amount.as_ref()),
            total: money(cost.total_amount.as_ref()),
            total_tax: cost.total_tax_amount.as_ref().and_then(|v| v.to_money(&currency)),
        },
        discount_codes: raw
            .discount_codes
            .into_iter()
            .filter(|d| !d.code.is_empty())
            .map(|d| CartDiscountCode {
                code: d.code,
                applicable: d.applicable,
            })
            .collect(),
        lines,
    })
}

#[must_use]
pub fn adapt_collection(raw: RawCollection) -> Option<Collection> {
    let handle = non_blank(raw.handle)?;
    Some(Collection {
        id: raw.id.unwrap_or_default(),
        title: non_blank(raw.title).unwrap_or_else(|| handle.clone()),
        handle,
        description: raw.description.unwrap_or_default(),
        image: raw.image.and_then(adapt_image),
    })
}

/// Converts a menu, rewriting links into `store_host` as site-relative paths.
#[must_use]
pub fn adapt_menu(raw: RawMenu, store_host: Option<&str>) -> Menu {
    Menu {
        handle: raw.handle.unwrap_or_default(),
        title: raw.title.unwrap_or_default(),
        items: raw
            .items
            .into_iter()
            .map(|item| adapt_menu_item(item, store_host))
            .collect(),
    }
}

fn adapt_menu_item(raw: RawMenuItem, store_host: Option<&str>) -> MenuItem {
    let url = raw.url.unwrap_or_default();
    MenuItem {
        title: raw.title.unwrap_or_default(),
        url: relative_store_url(&url, store_host),
        items: raw
            .items
            .into_iter()
            .map(|item| adapt_menu_item(item, store_host))
            .collect(),
    }
}

fn relative_store_url(url: &str, store_host: Option<&str>) -> String {
    let Some(host) = store_host else {
        return url.to_string();
    };
    match reqwest::Url::parse(url) {
        Ok(parsed) if parsed.host_str() == Some(host) => {
            let mut path = parsed.path().to_string();
            if let Some(query) = parsed.query() {
                path.push('?');
                path.push_str(query);
            }
            path
        }
        _ => url.to_string(),
    }
}

#[must_use]
pub fn adapt_page(raw: RawPage) -> Option<Page> {
    let handle = non_blank(raw.handle)?;
    let seo = raw.seo.unwrap_or_default();
    Some(Page {
        id: raw.id.unwrap_or_default(),
        title: non_blank(raw.title).unwrap_or_else(|| handle.clone()),
        handle,
        body: raw.body.unwrap_or_default(),
        body_summary: raw.body_summary.unwrap_or_default(),
        seo_title: non_blank(seo.title),
        seo_description: non_blank(seo.description),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn field<T: DeserializeOwned + Default>(value: &Value, key: &str) -> T {
    value
        .get(key)
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default()
}

/// Nodes of a connection under `value[key]` that deserialize as `T`;
/// malformed nodes are skipped.
fn connection_nodes<T: DeserializeOwned>(value: &Value, key: &str) -> Vec<T> {
    value
        .get(key)
        .map(|conn| {
            connection_values(conn)
                .filter_map(|node| serde_json::from_value(node.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

fn connection_values(conn: &Value) -> impl Iterator<Item = &Value> {
    let edges = conn
        .get("edges")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|edge| edge.get("node"));
    let nodes = conn.get("nodes").and_then(Value::as_array).into_iter().flatten();
    edges.chain(nodes)
}

#[cfg(test)]
#[path = "adapter_test.rs"]
mod tests;
