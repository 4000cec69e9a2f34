use std::sync::{Mutex, MutexGuard, PoisonError};

use shopfront_core::{Cart, LineMerchandise};

use super::state::{project_addition, project_quantity, project_removal, SyncState};
use super::{CartBackend, CartIdStore, CartView, LineInput, LineUpdate};
use crate::error::StorefrontError;

/// Keeps the persisted cart id and the in-memory mirror in step with the
/// remote cart.
///
/// Mutations do not serialize: overlapping calls all run to completion and
/// whichever response arrives last becomes the mirror.
pub struct CartSynchronizer<B, S> {
    backend: B,
    store: S,
    state: Mutex<SyncState>,
    max_line_quantity: u32,
}

impl<B: CartBackend, S: CartIdStore> CartSynchronizer<B, S> {
    pub fn new(backend: B, store: S) -> Self {
        Self {
            backend,
            store,
            state: Mutex::new(SyncState::default()),
            max_line_quantity: u32::MAX,
        }
    }

    /// Caps every quantity this synchronizer sends for a single line,
    /// including the merged total when an add lands on an existing line.
    #[must_use]
    pub fn with_max_line_quantity(mut self, max: u32) -> Self {
        self.max_line_quantity = max.max(1);
        self
    }

    #[must_use]
    pub fn view(&self) -> CartView {
        self.lock().view()
    }

    /// The persisted identifier, if a cart exists.
    #[must_use]
    pub fn cart_id(&self) -> Option<String> {
        self.store.load()
    }

    fn lock(&self) -> MutexGuard<'_, SyncState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetches the stored cart into the mirror.
    ///
    /// An expired or emptied cart is purged silently and yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Propagates backend failures other than cart-not-found; the mirror is
    /// left as it was.
    pub async fn load(&self) -> Result<Option<Cart>, StorefrontError> {
        let Some(cart_id) = self.store.load() else {
            return Ok(None);
        };
        self.lock().begin(None);
        match self.backend.fetch_cart(&cart_id).await {
            Ok(Some(cart)) => Ok(self.settle(cart)),
            Ok(None) | Err(StorefrontError::CartNotFound { .. }) => {
                self.purge(&cart_id);
                Ok(None)
            }
            Err(e) => {
                self.lock().fail();
                Err(e)
            }
        }
    }

    /// Adds `quantity` (at least 1) of a variant, merging into the existing
    /// line when the variant is already in the cart.
    ///
    /// # Errors
    ///
    /// Propagates backend failures. On cart-not-found the identifier is
    /// purged first so the next add starts a fresh cart.
    pub async fn add_line(&self, variant_id: &str, quantity: u32) -> Result<Cart, StorefrontError> {
        self.add_line_with_preview(variant_id, quantity, None).await
    }

    /// As [`Self::add_line`], with merchandise details for the optimistic
    /// projection of a line the cart does not hold yet.
    ///
    /// # Errors
    ///
    /// As for [`Self::add_line`].
    pub async fn add_line_with_preview(
        &self,
        variant_id: &str,
        quantity: u32,
        preview: Option<LineMerchandise>,
    ) -> Result<Cart, StorefrontError> {
        let quantity = quantity.clamp(1, self.max_line_quantity);

        let needs_load = self.lock().confirmed.is_none();
        if needs_load {
            self.load().await?;
        }

        let projection = {
            let state = self.lock();
            project_addition(
                state.base(),
                variant_id,
                quantity,
                self.max_line_quantity,
                preview.as_ref(),
            )
        };
        self.lock().begin(Some(projection));

        let cart_id = match self.ensure_cart().await {
            Ok(id) => id,
            Err(e) => {
                self.lock().fail();
                return Err(e);
            }
        };

        let existing = self
            .lock()
            .confirmed
            .as_ref()
            .and_then(|cart| cart.line_for_variant(variant_id))
            .map(|line| (line.id.clone(), line.quantity));

        let result = match existing {
            Some((line_id, current)) => {
                let update = LineUpdate {
                    id: line_id,
                    quantity: current
                        .saturating_add(quantity)
                        .min(self.max_line_quantity),
                };
                self.backend.update_lines(&cart_id, &[update]).await
            }
            None => {
                let input = LineInput {
                    merchandise_id: variant_id.to_string(),
                    quantity,
                };
                self.backend.add_lines(&cart_id, &[input]).await
            }
        };

        match result {
            Ok(cart) => {
                self.store.save(&cart.id);
                self.lock().resolve(Some(cart.clone()));
                Ok(cart)
            }
            Err(e) => Err(self.reject(&cart_id, e)),
        }
    }

    /// Sets a line's quantity. Zero or negative quantities remove the line.
    ///
    /// Returns `Ok(None)` when the cart ends up gone or empty.
    ///
    /// # Errors
    ///
    /// Propagates backend failures, including [`StorefrontError::LineNotFound`]
    /// for a line the cart no longer holds.
    pub async fn update_line(
        &self,
        line_id: &str,
        quantity: i64,
    ) -> Result<Option<Cart>, StorefrontError> {
        if quantity <= 0 {
            return self.remove_line(line_id).await;
        }
        let Some(cart_id) = self.store.load() else {
            return Err(StorefrontError::LineNotFound {
                line_id: line_id.to_string(),
            });
        };
        let quantity = u32::try_from(quantity)
            .unwrap_or(u32::MAX)
            .min(self.max_line_quantity);

        let projection = self
            .lock()
            .base()
            .map(|cart| project_quantity(cart, line_id, quantity));
        self.lock().begin(projection);

        let update = LineUpdate {
            id: line_id.to_string(),
            quantity,
        };
        match self.backend.update_lines(&cart_id, &[update]).await {
            Ok(cart) => Ok(self.settle(cart)),
            Err(e) => Err(self.reject(&cart_id, e)),
        }
    }

    /// Removes a line. A line or cart the backend no longer knows counts as
    /// already removed: the cart is re-fetched and its current state returned.
    ///
    /// # Errors
    ///
    /// Propagates backend failures other than not-found.
    pub async fn remove_line(&self, line_id: &str) -> Result<Option<Cart>, StorefrontError> {
        let Some(cart_id) = self.store.load() else {
            return Ok(None);
        };

        let projection = self
            .lock()
            .base()
            .map(|cart| project_removal(cart, line_id));
        self.lock().begin(projection);

        match self.backend.remove_lines(&cart_id, &[line_id.to_string()]).await {
            Ok(cart) => Ok(self.settle(cart)),
            Err(StorefrontError::CartNotFound { .. }) => {
                self.purge(&cart_id);
                Ok(None)
            }
            Err(StorefrontError::LineNotFound { .. }) => {
                tracing::debug!(cart_id = %cart_id, line_id, "line already removed; re-syncing cart");
                match self.backend.fetch_cart(&cart_id).await {
                    Ok(Some(cart)) => Ok(self.settle(cart)),
                    Ok(None) => {
                        self.purge(&cart_id);
                        Ok(None)
                    }
                    Err(e) => Err(self.reject(&cart_id, e)),
                }
            }
            Err(e) => Err(self.reject(&cart_id, e)),
        }
    }

    /// Replaces the cart's discount codes. `Ok(None)` when there is no cart
    /// to apply them to.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn apply_discount_codes(
        &self,
        codes: &[String],
    ) -> Result<Option<Cart>, StorefrontError> {
        let Some(cart_id) = self.store.load() else {
            return Ok(None);
        };
        self.lock().begin(None);
        match self.backend.update_discount_codes(&cart_id, codes).await {
            Ok(cart) => {
                self.store.save(&cart.id);
                self.lock().resolve(Some(cart.clone()));
                Ok(Some(cart))
            }
            Err(e) => Err(self.reject(&cart_id, e)),
        }
    }

    /// Forgets the cart locally. The remote cart is left to expire.
    pub fn clear(&self) {
        self.store.clear();
        *self.lock() = SyncState::default();
    }

    /// Returns the stored cart id, creating an empty remote cart when there
    /// is none. The new id is persisted before any line is added.
    async fn ensure_cart(&self) -> Result<String, StorefrontError> {
        if let Some(cart_id) = self.store.load() {
            return Ok(cart_id);
        }
        let cart = self.backend.create_cart(&[]).await?;
        tracing::info!(cart_id = %cart.id, "created cart");
        self.store.save(&cart.id);
        let cart_id = cart.id.clone();
        self.lock().confirmed = Some(cart);
        Ok(cart_id)
    }

    /// Installs a snapshot, destroying the cart when it came back empty.
    fn settle(&self, cart: Cart) -> Option<Cart> {
        if cart.is_empty() {
            self.store.clear();
            self.lock().resolve(None);
            return None;
        }
        self.store.save(&cart.id);
        self.lock().resolve(Some(cart.clone()));
        Some(cart)
    }

    fn purge(&self, cart_id: &str) {
        tracing::warn!(cart_id, "cart no longer exists; discarding identifier");
        self.store.clear();
        self.lock().purge();
    }

    /// Records a failed mutation and hands the error back to the caller.
    fn reject(&self, cart_id: &str, error: StorefrontError) -> StorefrontError {
        if matches!(error, StorefrontError::CartNotFound { .. }) {
            self.purge(cart_id);
        } else {
            tracing::warn!(cart_id, error = %error, "cart mutation failed");
            self.lock().fail();
        }
        error
    }
}

#[cfg(test)]
#[path = "sync_test.rs"]
mod tests;
