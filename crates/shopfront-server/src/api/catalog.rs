use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use shopfront_core::{Collection, Menu, Page, SaleSummary, StorefrontProduct};

use crate::middleware::RequestId;

use super::{map_storefront_error, normalize_limit, ApiError, ApiResponse, AppState};

/// A product plus the sale figures the storefront renders next to it.
#[derive(Debug, Serialize)]
pub(super) struct ProductItem {
    #[serde(flatten)]
    product: StorefrontProduct,
    sale: SaleSummary,
}

impl From<StorefrontProduct> for ProductItem {
    fn from(product: StorefrontProduct) -> Self {
        let sale = product.sale_summary();
        Self { product, sale }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct CollectionProducts {
    collection: Option<Collection>,
    products: Vec<ProductItem>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProductQuery {
    pub query: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LimitQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    pub q: Option<String>,
    pub limit: Option<u32>,
}

fn items(products: Vec<StorefrontProduct>) -> Vec<ProductItem> {
    products.into_iter().map(ProductItem::from).collect()
}

/// Product grid. Commerce failures degrade to an empty list.
pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ProductQuery>,
) -> Json<ApiResponse<Vec<ProductItem>>> {
    let filter = query.query.as_deref().map(str::trim).filter(|q| !q.is_empty());
    let products = state
        .storefront
        .products(normalize_limit(query.limit), filter)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "product list unavailable; returning empty list");
            Vec::new()
        });

    Json(ApiResponse::new(items(products), req_id.0))
}

pub(super) async fn get_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(handle): Path<String>,
) -> Result<Json<ApiResponse<ProductItem>>, ApiError> {
    let product = state
        .storefront
        .product_by_handle(&handle)
        .await
        .map_err(|e| map_storefront_error(req_id.0.clone(), &e))?
        .ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "not_found",
                format!("product {handle} not found"),
            )
        })?;

    Ok(Json(ApiResponse::new(ProductItem::from(product), req_id.0)))
}

/// Products of one collection. Unknown collections and commerce failures
/// both degrade to an empty grid.
pub(super) async fn list_collection_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(handle): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Json<ApiResponse<CollectionProducts>> {
    let data = match state
        .storefront
        .collection_products(&handle, normalize_limit(query.limit))
        .await
    {
        Ok(Some((collection, products))) => CollectionProducts {
            collection: Some(collection),
            products: items(products),
        },
        Ok(None) => {
            tracing::debug!(handle = %handle, "collection not found");
            CollectionProducts {
                collection: None,
                products: Vec::new(),
            }
        }
        Err(e) => {
            tracing::warn!(handle = %handle, error = %e, "collection products unavailable");
            CollectionProducts {
                collection: None,
                products: Vec::new(),
            }
        }
    };

    Json(ApiResponse::new(data, req_id.0))
}

/// Full-text product search. A blank term returns nothing without a
/// round-trip.
pub(super) async fn search_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> Json<ApiResponse<Vec<ProductItem>>> {
    let term = query.q.as_deref().map(str::trim).unwrap_or_default();
    if term.is_empty() {
        return Json(ApiResponse::new(Vec::new(), req_id.0));
    }

    let products = state
        .storefront
        .search_products(term, normalize_limit(query.limit))
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "search unavailable; returning no results");
            Vec::new()
        });

    Json(ApiResponse::new(items(products), req_id.0))
}

pub(super) async fn get_menu(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(handle): Path<String>,
) -> Result<Json<ApiResponse<Menu>>, ApiError> {
    let menu = state
        .storefront
        .menu(&handle)
        .await
        .map_err(|e| map_storefront_error(req_id.0.clone(), &e))?
        .ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "not_found",
                format!("menu {handle} not found"),
            )
        })?;

    Ok(Json(ApiResponse::new(menu, req_id.0)))
}

pub(super) async fn get_page(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(handle): Path<String>,
) -> Result<Json<ApiResponse<Page>>, ApiError> {
    let page = state
        .storefront
        .page(&handle)
        .await
        .map_err(|e| map_storefront_error(req_id.0.clone(), &e))?
        .ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "not_found",
                format!("page {handle} not found"),
            )
        })?;

    Ok(Json(ApiResponse::new(page, req_id.0)))
}
