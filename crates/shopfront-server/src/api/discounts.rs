use axum::{extract::State, Extension, Json};
use chrono::Utc;
use shopfront_admin::fetch_active_discounts;
use shopfront_core::ActiveDiscounts;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState};

/// Promotions running now. Always succeeds; the feed is inactive when the
/// admin API is unconfigured or unavailable.
pub(super) async fn list_active_discounts(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<ActiveDiscounts>> {
    let discounts = fetch_active_discounts(state.admin.as_deref(), Utc::now()).await;
    Json(ApiResponse::new(discounts, req_id.0))
}
