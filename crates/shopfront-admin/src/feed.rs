use chrono::{DateTime, Utc};
use shopfront_core::ActiveDiscounts;

use crate::client::{AdminClient, MAX_DISCOUNT_NODES};
use crate::normalize::active_promotions;

/// Loads the promotions running at `now`.
///
/// Never fails. Without a client (no admin token configured) or on any
/// request or parse failure the result is [`ActiveDiscounts::inactive`];
/// the feed decorates pages and must not break them.
pub async fn fetch_active_discounts(
    client: Option<&AdminClient>,
    now: DateTime<Utc>,
) -> ActiveDiscounts {
    let Some(client) = client else {
        tracing::debug!("admin token not configured; discount feed disabled");
        return ActiveDiscounts::inactive();
    };

    match client.discount_nodes(MAX_DISCOUNT_NODES).await {
        Ok(nodes) => {
            let promotions = active_promotions(nodes, now);
            tracing::debug!(count = promotions.len(), "loaded active discounts");
            ActiveDiscounts::from_promotions(promotions)
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to load active discounts");
            ActiveDiscounts::inactive()
        }
    }
}
