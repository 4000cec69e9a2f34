//! Cart state synchronization.
//!
//! [`CartSynchronizer`] keeps one cart identifier in an injected
//! [`CartIdStore`] and an in-memory mirror of the remote cart. The mirror is
//! only ever replaced by a full snapshot from the [`CartBackend`]; optimistic
//! projections are kept apart from it and dropped once nothing is in flight.

mod state;
mod store;
mod sync;

use std::sync::Arc;

use serde::Serialize;
use shopfront_core::Cart;

use crate::error::StorefrontError;

pub use state::{CartPhase, CartView};
pub use store::{CartIdStore, MemoryCartIdStore};
pub use sync::CartSynchronizer;

/// A line to add, e.g. `{ merchandiseId: "gid://shopify/ProductVariant/1", quantity: 2 }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineInput {
    pub merchandise_id: String,
    pub quantity: u32,
}

/// A quantity change for an existing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineUpdate {
    pub id: String,
    pub quantity: u32,
}

/// Remote cart operations the synchronizer depends on.
///
/// Every mutation returns the full cart snapshot. Implementations signal an
/// expired cart with [`StorefrontError::CartNotFound`] and a vanished line
/// with [`StorefrontError::LineNotFound`].
pub trait CartBackend {
    async fn create_cart(&self, lines: &[LineInput]) -> Result<Cart, StorefrontError>;

    /// `Ok(None)` when the cart no longer exists remotely.
    async fn fetch_cart(&self, cart_id: &str) -> Result<Option<Cart>, StorefrontError>;

    async fn add_lines(&self, cart_id: &str, lines: &[LineInput]) -> Result<Cart, StorefrontError>;

    async fn update_lines(
        &self,
        cart_id: &str,
        lines: &[LineUpdate],
    ) -> Result<Cart, StorefrontError>;

    async fn remove_lines(&self, cart_id: &str, line_ids: &[String])
        -> Result<Cart, StorefrontError>;

    async fn update_discount_codes(
        &self,
        cart_id: &str,
        codes: &[String],
    ) -> Result<Cart, StorefrontError>;
}

impl<T: CartBackend> CartBackend for Arc<T> {
    async fn create_cart(&self, lines: &[LineInput]) -> Result<Cart, StorefrontError> {
        (**self).create_cart(lines).await
    }

    async fn fetch_cart(&self, cart_id: &str) -> Result<Option<Cart>, StorefrontError> {
        (**self).fetch_cart(cart_id).await
    }

    async fn add_lines(&self, cart_id: &str, lines: &[LineInput]) -> Result<Cart, StorefrontError> {
        (**self).add_lines(cart_id, lines).await
    }

    async fn update_lines(
        &self,
        cart_id: &str,
        lines: &[LineUpdate],
    ) -> Result<Cart, StorefrontError> {
        (**self).update_lines(cart_id, lines).await
    }

    async fn remove_lines(
        &self,
        cart_id: &str,
        line_ids: &[String],
    ) -> Result<Cart, StorefrontError> {
        (**self).remove_lines(cart_id, line_ids).await
    }

    async fn update_discount_codes(
        &self,
        cart_id: &str,
        codes: &[String],
    ) -> Result<Cart, StorefrontError> {
        (**self).update_discount_codes(cart_id, codes).await
    }
}

