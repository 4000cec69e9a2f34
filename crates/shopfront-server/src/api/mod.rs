mod cart;
mod catalog;
mod contact;
mod content;
mod discounts;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, patch, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use shopfront_admin::AdminClient;
use shopfront_content::SeoMap;
use shopfront_core::AppConfig;
use shopfront_storefront::{StorefrontClient, StorefrontError};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::mailer::ContactMailer;
use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};

pub(crate) const CART_ID_HEADER: &str = "x-cart-id";

/// Static site content served next to the commerce data.
#[derive(Debug)]
pub struct ContentSettings {
    pub blog_dir: PathBuf,
    pub seo: SeoMap,
    /// Public origin for sitemap URLs.
    pub site_url: String,
}

#[derive(Clone)]
pub struct AppState {
    pub storefront: Arc<StorefrontClient>,
    /// `None` when no admin token is configured; the discount feed is then
    /// always inactive.
    pub admin: Option<Arc<AdminClient>>,
    /// `None` when SMTP is not configured; the contact route then answers
    /// `not_configured`.
    pub contact: Option<Arc<ContactMailer>>,
    pub content: Arc<ContentSettings>,
}

impl AppState {
    /// Builds the clients and loads the SEO map named by `config`.
    ///
    /// A missing or malformed SEO file is logged and replaced by an empty map.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client or the SMTP transport cannot be
    /// constructed.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let storefront = StorefrontClient::from_config(config)?;
        let admin = AdminClient::from_config(config)?;
        let contact = ContactMailer::from_config(config)?;

        let seo = SeoMap::load(&config.seo_path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "SEO map unavailable; serving defaults only");
            SeoMap::default()
        });

        if admin.is_none() {
            tracing::info!("SHOPIFY_ADMIN_ACCESS_TOKEN not set; discount feed disabled");
        }
        if contact.is_none() {
            tracing::info!("CONTACT_SMTP_HOST not set; contact form disabled");
        }

        Ok(Self {
            storefront: Arc::new(storefront),
            admin: admin.map(Arc::new),
            contact: contact.map(Arc::new),
            content: Arc::new(ContentSettings {
                blog_dir: config.content_dir.clone(),
                seo,
                site_url: config.site_url.clone(),
            }),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    discounts: &'static str,
    contact: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(data: T, request_id: String) -> Self {
        Self {
            data,
            meta: ResponseMeta::new(request_id),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            "not_configured" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Page size for catalog reads.
pub(super) fn normalize_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(24).clamp(1, 100)
}

pub(super) fn map_storefront_error(request_id: String, error: &StorefrontError) -> ApiError {
    match error {
        StorefrontError::CartNotFound { .. } => {
            ApiError::new(request_id, "not_found", "cart not found")
        }
        StorefrontError::LineNotFound { line_id } => ApiError::new(
            request_id,
            "not_found",
            format!("cart line {line_id} not found"),
        ),
        StorefrontError::UserErrors { messages } => {
            ApiError::new(request_id, "validation_error", messages.join("; "))
        }
        _ => {
            tracing::error!(error = %error, "storefront request failed");
            ApiError::new(request_id, "upstream_error", "storefront request failed")
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
            HeaderName::from_static(CART_ID_HEADER),
        ])
        .expose_headers([
            HeaderName::from_static("x-request-id"),
            HeaderName::from_static(CART_ID_HEADER),
        ])
}

fn api_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/products", get(catalog::list_products))
        .route("/api/v1/products/{handle}", get(catalog::get_product))
        .route(
            "/api/v1/collections/{handle}/products",
            get(catalog::list_collection_products),
        )
        .route("/api/v1/search", get(catalog::search_products))
        .route("/api/v1/menus/{handle}", get(catalog::get_menu))
        .route("/api/v1/pages/{handle}", get(catalog::get_page))
        .route(
            "/api/v1/cart",
            get(cart::get_cart).delete(cart::clear_cart),
        )
        .route("/api/v1/cart/lines", post(cart::add_line))
        .route(
            "/api/v1/cart/lines/{line_id}",
            patch(cart::update_line).delete(cart::remove_line),
        )
        .route(
            "/api/v1/cart/discount-codes",
            post(cart::apply_discount_codes),
        )
        .route(
            "/api/v1/discounts/active",
            get(discounts::list_active_discounts),
        )
        .route("/api/v1/contact", post(contact::submit_contact))
        .route("/api/v1/blog", get(content::list_posts))
        .route("/api/v1/blog/{slug}", get(content::get_post))
        .route("/api/v1/seo", get(content::get_seo))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new()
        .route("/api/v1/health", get(health))
        .route("/sitemap.xml", get(content::sitemap));

    Router::new()
        .merge(public_routes)
        .merge(api_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let data = HealthData {
        status: "ok",
        discounts: if state.admin.is_some() {
            "enabled"
        } else {
            "disabled"
        },
        contact: if state.contact.is_some() {
            "enabled"
        } else {
            "disabled"
        },
    };
    (StatusCode::OK, Json(ApiResponse::new(data, req_id.0)))
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(120, Duration::from_secs(60))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
