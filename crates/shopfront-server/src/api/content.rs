use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shopfront_content::{
    build_sitemap, find_post, load_posts, site_entries, BlogPost, SeoEntry,
};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

/// Products and collections listed in the sitemap are capped at one page.
const SITEMAP_PAGE_SIZE: u32 = 100;

#[derive(Debug, Serialize)]
pub(super) struct PostSummary {
    slug: String,
    title: String,
    date: NaiveDate,
    excerpt: String,
    tags: Vec<String>,
    image: Option<String>,
}

impl From<BlogPost> for PostSummary {
    fn from(post: BlogPost) -> Self {
        Self {
            excerpt: post.excerpt(),
            slug: post.slug,
            title: post.title,
            date: post.date,
            tags: post.tags,
            image: post.image,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct SeoData {
    path: String,
    #[serde(flatten)]
    entry: SeoEntry,
}

#[derive(Debug, Deserialize)]
pub(super) struct SeoQuery {
    pub path: Option<String>,
}

pub(super) async fn list_posts(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<PostSummary>>>, ApiError> {
    let posts = load_posts(&state.content.blog_dir).map_err(|e| {
        tracing::error!(error = %e, "failed to load blog posts");
        ApiError::new(req_id.0.clone(), "internal_error", "failed to load blog posts")
    })?;

    let data = posts.into_iter().map(PostSummary::from).collect();
    Ok(Json(ApiResponse::new(data, req_id.0)))
}

pub(super) async fn get_post(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<BlogPost>>, ApiError> {
    let post = find_post(&state.content.blog_dir, &slug)
        .map_err(|e| {
            tracing::error!(slug = %slug, error = %e, "failed to load blog post");
            ApiError::new(req_id.0.clone(), "internal_error", "failed to load blog post")
        })?
        .ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "not_found",
                format!("blog post {slug} not found"),
            )
        })?;

    Ok(Json(ApiResponse::new(post, req_id.0)))
}

pub(super) async fn get_seo(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SeoQuery>,
) -> Json<ApiResponse<SeoData>> {
    let path = query
        .path
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| "/".to_string());
    let entry = state.content.seo.lookup(&path);
    Json(ApiResponse::new(SeoData { path, entry }, req_id.0))
}

/// `sitemap.xml` over the current catalog and blog. Sources that fail to
/// load are left out rather than failing the document.
pub(super) async fn sitemap(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<impl IntoResponse, ApiError> {
    let products: Vec<String> = state
        .storefront
        .products(SITEMAP_PAGE_SIZE, None)
        .await
        .map(|products| products.into_iter().map(|p| p.handle).collect())
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "sitemap: product list unavailable");
            Vec::new()
        });
    let collections: Vec<String> = state
        .storefront
        .collections(SITEMAP_PAGE_SIZE)
        .await
        .map(|collections| collections.into_iter().map(|c| c.handle).collect())
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "sitemap: collection list unavailable");
            Vec::new()
        });
    let posts = load_posts(&state.content.blog_dir).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "sitemap: blog posts unavailable");
        Vec::new()
    });

    let entries = site_entries(&products, &collections, &posts);
    let xml = build_sitemap(&state.content.site_url, &entries).map_err(|e| {
        tracing::error!(error = %e, "failed to render sitemap");
        ApiError::new(req_id.0, "internal_error", "failed to render sitemap")
    })?;

    Ok(([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml))
}
