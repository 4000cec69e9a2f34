//! Cart server actions.
//!
//! The browser keeps the cart id and sends it in `x-cart-id`; each request
//! runs a fresh synchronizer seeded with that id. Responses carry the id to
//! keep (`null` once the cart is gone) together with the cart snapshot.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use shopfront_core::{Cart, CartCost, CartDiscountCode, CartLine, SaleSummary};
use shopfront_storefront::{CartSynchronizer, MemoryCartIdStore, StorefrontClient};

use crate::middleware::RequestId;

use super::{map_storefront_error, ApiError, ApiResponse, AppState, CART_ID_HEADER};

type RequestCart = CartSynchronizer<Arc<StorefrontClient>, MemoryCartIdStore>;

const MAX_LINE_QUANTITY: u32 = 99;

#[derive(Debug, Serialize)]
pub(super) struct CartPayload {
    cart_id: Option<String>,
    cart: Option<CartItem>,
}

#[derive(Debug, Serialize)]
pub(super) struct CartItem {
    id: String,
    checkout_url: String,
    total_quantity: u32,
    lines: Vec<CartLineItem>,
    cost: CartCost,
    discount_codes: Vec<CartDiscountCode>,
}

#[derive(Debug, Serialize)]
pub(super) struct CartLineItem {
    #[serde(flatten)]
    line: CartLine,
    sale: SaleSummary,
}

impl From<Cart> for CartItem {
    fn from(cart: Cart) -> Self {
        Self {
            id: cart.id,
            checkout_url: cart.checkout_url,
            total_quantity: cart.total_quantity,
            lines: cart
                .lines
                .into_iter()
                .map(|line| CartLineItem {
                    sale: line.sale_summary(),
                    line,
                })
                .collect(),
            cost: cart.cost,
            discount_codes: cart.discount_codes,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AddLineRequest {
    pub merchandise_id: String,
    pub quantity: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UpdateLineRequest {
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub(super) struct DiscountCodesRequest {
    pub codes: Vec<String>,
}

fn synchronizer(state: &AppState, headers: &HeaderMap) -> RequestCart {
    let cart_id = headers
        .get(CART_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    CartSynchronizer::new(
        Arc::clone(&state.storefront),
        MemoryCartIdStore::new(cart_id),
    )
    .with_max_line_quantity(MAX_LINE_QUANTITY)
}

fn payload(
    sync: &RequestCart,
    cart: Option<Cart>,
    request_id: String,
) -> Json<ApiResponse<CartPayload>> {
    Json(ApiResponse::new(
        CartPayload {
            cart_id: sync.cart_id(),
            cart: cart.map(CartItem::from),
        },
        request_id,
    ))
}

pub(super) async fn get_cart(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<CartPayload>>, ApiError> {
    let sync = synchronizer(&state, &headers);
    let cart = sync
        .load()
        .await
        .map_err(|e| map_storefront_error(req_id.0.clone(), &e))?;
    Ok(payload(&sync, cart, req_id.0))
}

/// Forgets the cart. The remote cart is left to expire on its own.
pub(super) async fn clear_cart(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
) -> Json<ApiResponse<CartPayload>> {
    let sync = synchronizer(&state, &headers);
    sync.clear();
    payload(&sync, None, req_id.0)
}

pub(super) async fn add_line(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    Json(body): Json<AddLineRequest>,
) -> Result<Json<ApiResponse<CartPayload>>, ApiError> {
    let merchandise_id = body.merchandise_id.trim();
    if merchandise_id.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "merchandise_id is required",
        ));
    }
    let quantity = body.quantity.unwrap_or(1).clamp(1, MAX_LINE_QUANTITY);

    let sync = synchronizer(&state, &headers);
    let cart = sync
        .add_line(merchandise_id, quantity)
        .await
        .map_err(|e| map_storefront_error(req_id.0.clone(), &e))?;
    Ok(payload(&sync, Some(cart), req_id.0))
}

/// Sets a line's quantity; zero or less removes it.
pub(super) async fn update_line(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(line_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<UpdateLineRequest>,
) -> Result<Json<ApiResponse<CartPayload>>, ApiError> {
    let sync = synchronizer(&state, &headers);
    let cart = sync
        .update_line(&line_id, body.quantity)
        .await
        .map_err(|e| map_storefront_error(req_id.0.clone(), &e))?;
    Ok(payload(&sync, cart, req_id.0))
}

pub(super) async fn remove_line(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(line_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<CartPayload>>, ApiError> {
    let sync = synchronizer(&state, &headers);
    let cart = sync
        .remove_line(&line_id)
        .await
        .map_err(|e| map_storefront_error(req_id.0.clone(), &e))?;
    Ok(payload(&sync, cart, req_id.0))
}

/// Replaces the cart's discount codes. Blank codes are dropped, so an empty
/// list clears them.
pub(super) async fn apply_discount_codes(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    Json(body): Json<DiscountCodesRequest>,
) -> Result<Json<ApiResponse<CartPayload>>, ApiError> {
    let codes: Vec<String> = body
        .codes
        .iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();

    let sync = synchronizer(&state, &headers);
    let cart = sync
        .apply_discount_codes(&codes)
        .await
        .map_err(|e| map_storefront_error(req_id.0.clone(), &e))?;
    Ok(payload(&sync, cart, req_id.0))
}
