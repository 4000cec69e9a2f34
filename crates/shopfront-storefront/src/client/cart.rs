use serde_json::{json, Value};
use shopfront_core::Cart;

use super::StorefrontClient;
use crate::adapter::adapt_cart;
use crate::cart::{CartBackend, LineInput, LineUpdate};
use crate::error::StorefrontError;
use crate::queries;
use crate::types::{RawCart, RawCartPayload};

impl StorefrontClient {
    /// Creates a cart, optionally seeded with lines.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::UserErrors`] when the API rejects the input,
    /// or any transport/GraphQL error.
    pub async fn create_cart(&self, lines: &[LineInput]) -> Result<Cart, StorefrontError> {
        self.mutate(
            "cartCreate",
            queries::CREATE_CART,
            json!({ "lines": lines }),
            "cartCreate",
            None,
            &[],
        )
        .await
    }

    /// Fetches a cart by id. `Ok(None)` when the cart expired or never existed.
    ///
    /// # Errors
    ///
    /// Returns a [`StorefrontError`] on transport, status, GraphQL, or
    /// deserialization failure.
    pub async fn get_cart(&self, cart_id: &str) -> Result<Option<Cart>, StorefrontError> {
        let raw: Option<RawCart> = self
            .query_root(
                &format!("cart(id={cart_id})"),
                queries::GET_CART,
                json!({ "cartId": cart_id }),
                "cart",
            )
            .await?;
        Ok(raw.and_then(adapt_cart))
    }

    /// # Errors
    ///
    /// [`StorefrontError::CartNotFound`] when the cart is gone, otherwise as
    /// for [`StorefrontClient::create_cart`].
    pub async fn add_lines(
        &self,
        cart_id: &str,
        lines: &[LineInput],
    ) -> Result<Cart, StorefrontError> {
        self.mutate(
            "cartLinesAdd",
            queries::ADD_LINES,
            json!({ "cartId": cart_id, "lines": lines }),
            "cartLinesAdd",
            Some(cart_id),
            &[],
        )
        .await
    }

    /// # Errors
    ///
    /// [`StorefrontError::LineNotFound`] when a targeted line is no longer in
    /// the cart, otherwise as for [`StorefrontClient::add_lines`].
    pub async fn update_lines(
        &self,
        cart_id: &str,
        lines: &[LineUpdate],
    ) -> Result<Cart, StorefrontError> {
        let line_ids: Vec<&str> = lines.iter().map(|l| l.id.as_str()).collect();
        self.mutate(
            "cartLinesUpdate",
            queries::UPDATE_LINES,
            json!({ "cartId": cart_id, "lines": lines }),
            "cartLinesUpdate",
            Some(cart_id),
            &line_ids,
        )
        .await
    }

    /// # Errors
    ///
    /// As for [`StorefrontClient::update_lines`].
    pub async fn remove_lines(
        &self,
        cart_id: &str,
        line_ids: &[String],
    ) -> Result<Cart, StorefrontError> {
        let ids: Vec<&str> = line_ids.iter().map(String::as_str).collect();
        self.mutate(
            "cartLinesRemove",
            queries::REMOVE_LINES,
            json!({ "cartId": cart_id, "lineIds": line_ids }),
            "cartLinesRemove",
            Some(cart_id),
            &ids,
        )
        .await
    }

    /// Replaces the cart's discount codes. An empty slice removes them all.
    ///
    /// # Errors
    ///
    /// As for [`StorefrontClient::add_lines`].
    pub async fn update_discount_codes(
        &self,
        cart_id: &str,
        codes: &[String],
    ) -> Result<Cart, StorefrontError> {
        self.mutate(
            "cartDiscountCodesUpdate",
            queries::UPDATE_DISCOUNT_CODES,
            json!({ "cartId": cart_id, "discountCodes": codes }),
            "cartDiscountCodesUpdate",
            Some(cart_id),
            &[],
        )
        .await
    }

    async fn mutate(
        &self,
        context: &str,
        query: &str,
        variables: Value,
        root: &str,
        cart_id: Option<&str>,
        line_ids: &[&str],
    ) -> Result<Cart, StorefrontError> {
        let payload: Option<RawCartPayload> =
            self.query_root(context, query, variables, root).await?;
        let payload = payload.unwrap_or_default();

        if !payload.user_errors.is_empty() {
            return Err(classify_user_errors(&payload, cart_id, line_ids));
        }

        let not_found = || StorefrontError::CartNotFound {
            cart_id: cart_id.unwrap_or_default().to_string(),
        };
        let raw = payload.cart.ok_or_else(not_found)?;
        adapt_cart(raw).ok_or_else(|| StorefrontError::MissingData {
            context: format!("{context}.cart.id"),
        })
    }
}

fn classify_user_errors(
    payload: &RawCartPayload,
    cart_id: Option<&str>,
    line_ids: &[&str],
) -> StorefrontError {
    if payload.user_errors.iter().any(|e| e.is_missing_cart()) {
        return StorefrontError::CartNotFound {
            cart_id: cart_id.unwrap_or_default().to_string(),
        };
    }
    if let Some(err) = payload.user_errors.iter().find(|e| e.is_missing_line()) {
        let line_id = line_ids
            .iter()
            .find(|id| err.message.contains(**id))
            .or_else(|| line_ids.first())
            .map_or_else(|| err.message.clone(), |id| (*id).to_string());
        return StorefrontError::LineNotFound { line_id };
    }
    StorefrontError::UserErrors {
        messages: payload.user_errors.iter().map(|e| e.message.clone()).collect(),
    }
}

impl CartBackend for StorefrontClient {
    async fn create_cart(&self, lines: &[LineInput]) -> Result<Cart, StorefrontError> {
        StorefrontClient::create_cart(self, lines).await
    }

    async fn fetch_cart(&self, cart_id: &str) -> Result<Option<Cart>, StorefrontError> {
        self.get_cart(cart_id).await
    }

    async fn add_lines(&self, cart_id: &str, lines: &[LineInput]) -> Result<Cart, StorefrontError> {
        StorefrontClient::add_lines(self, cart_id, lines).await
    }

    async fn update_lines(
        &self,
        cart_id: &str,
        lines: &[LineUpdate],
    ) -> Result<Cart, StorefrontError> {
        StorefrontClient::update_lines(self, cart_id, lines).await
    }

    async fn remove_lines(
        &self,
        cart_id: &str,
        line_ids: &[String],
    ) -> Result<Cart, StorefrontError> {
        StorefrontClient::remove_lines(self, cart_id, line_ids).await
    }

    async fn update_discount_codes(
        &self,
        cart_id: &str,
        codes: &[String],
    ) -> Result<Cart, StorefrontError> {
        StorefrontClient::update_discount_codes(self, cart_id, codes).await
    }
}
