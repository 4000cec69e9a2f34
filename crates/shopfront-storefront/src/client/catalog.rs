use serde_json::{json, Value};
use shopfront_core::{Collection, Menu, Page, StorefrontProduct};

use super::StorefrontClient;
use crate::adapter::{
    adapt_collection, adapt_menu, adapt_page, adapt_product_connection, adapt_product_value,
};
use crate::error::StorefrontError;
use crate::queries;
use crate::types::{Connection, RawCollection, RawMenu, RawPage};

impl StorefrontClient {
    /// Lists up to `first` products, optionally filtered by a Storefront
    /// search `query` (e.g. `"tag:summer"`).
    ///
    /// Individual malformed product nodes degrade to defaults instead of
    /// failing the list.
    ///
    /// # Errors
    ///
    /// Returns a [`StorefrontError`] on transport, status, or GraphQL failure.
    pub async fn products(
        &self,
        first: u32,
        query: Option<&str>,
    ) -> Result<Vec<StorefrontProduct>, StorefrontError> {
        let data = self
            .execute(
                "products",
                queries::PRODUCTS,
                json!({ "first": first, "query": query }),
            )
            .await?;
        Ok(data
            .get("products")
            .map(adapt_product_connection)
            .unwrap_or_default())
    }

    /// Fetches one product by handle; `Ok(None)` when no product has it.
    ///
    /// # Errors
    ///
    /// Returns a [`StorefrontError`] on transport, status, or GraphQL failure.
    pub async fn product_by_handle(
        &self,
        handle: &str,
    ) -> Result<Option<StorefrontProduct>, StorefrontError> {
        let data = self
            .execute(
                &format!("product(handle={handle})"),
                queries::PRODUCT_BY_HANDLE,
                json!({ "handle": handle }),
            )
            .await?;
        Ok(data
            .get("product")
            .filter(|p| p.is_object())
            .map(adapt_product_value))
    }

    /// # Errors
    ///
    /// Returns a [`StorefrontError`] on transport, status, GraphQL, or
    /// deserialization failure.
    pub async fn collections(&self, first: u32) -> Result<Vec<Collection>, StorefrontError> {
        let raw: Option<Connection<RawCollection>> = self
            .query_root(
                "collections",
                queries::COLLECTIONS,
                json!({ "first": first }),
                "collections",
            )
            .await?;
        Ok(raw
            .map(|c| c.into_nodes().filter_map(adapt_collection).collect())
            .unwrap_or_default())
    }

    /// Fetches a collection and up to `first` of its products.
    ///
    /// `Ok(None)` when the handle does not name a collection.
    ///
    /// # Errors
    ///
    /// Returns a [`StorefrontError`] on transport, status, GraphQL, or
    /// deserialization failure.
    pub async fn collection_products(
        &self,
        handle: &str,
        first: u32,
    ) -> Result<Option<(Collection, Vec<StorefrontProduct>)>, StorefrontError> {
        let context = format!("collection(handle={handle})");
        let mut data = self
            .execute(
                &context,
                queries::COLLECTION_PRODUCTS,
                json!({ "handle": handle, "first": first }),
            )
            .await?;

        let node = data
            .get_mut("collection")
            .map(Value::take)
            .unwrap_or(Value::Null);
        if node.is_null() {
            return Ok(None);
        }

        let products = node
            .get("products")
            .map(adapt_product_connection)
            .unwrap_or_default();
        let raw: RawCollection =
            serde_json::from_value(node).map_err(|source| StorefrontError::Deserialize {
                context,
                source,
            })?;

        Ok(adapt_collection(raw).map(|collection| (collection, products)))
    }

    /// Product search over titles, tags, and descriptions.
    ///
    /// # Errors
    ///
    /// Returns a [`StorefrontError`] on transport, status, or GraphQL failure.
    pub async fn search_products(
        &self,
        term: &str,
        first: u32,
    ) -> Result<Vec<StorefrontProduct>, StorefrontError> {
        let data = self
            .execute(
                &format!("search(query={term})"),
                queries::SEARCH_PRODUCTS,
                json!({ "query": term, "first": first }),
            )
            .await?;
        Ok(data
            .get("search")
            .map(adapt_product_connection)
            .unwrap_or_default())
    }

    /// # Errors
    ///
    /// Returns a [`StorefrontError`] on transport, status, GraphQL, or
    /// deserialization failure.
    pub async fn menu(&self, handle: &str) -> Result<Option<Menu>, StorefrontError> {
        let raw: Option<RawMenu> = self
            .query_root(
                &format!("menu(handle={handle})"),
                queries::MENU,
                json!({ "handle": handle }),
                "menu",
            )
            .await?;
        Ok(raw.map(|m| adapt_menu(m, self.store_host())))
    }

    /// # Errors
    ///
    /// Returns a [`StorefrontError`] on transport, status, GraphQL, or
    /// deserialization failure.
    pub async fn page(&self, handle: &str) -> Result<Option<Page>, StorefrontError> {
        let raw: Option<RawPage> = self
            .query_root(
                &format!("page(handle={handle})"),
                queries::PAGE,
                json!({ "handle": handle }),
                "page",
            )
            .await?;
        Ok(raw.and_then(adapt_page))
    }
}
