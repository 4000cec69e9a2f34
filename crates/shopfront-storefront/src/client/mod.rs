//! GraphQL client for the Shopify Storefront API.
//!
//! Every call is a single POST of `{query, variables}`. Transport failures,
//! non-2xx statuses, and top-level `errors[]` payloads become
//! [`StorefrontError`]s; callers decide whether to degrade or surface them.
//! There is no retry and no cancellation beyond the request timeout.

mod cart;
mod catalog;

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shopfront_core::AppConfig;

use crate::error::StorefrontError;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// Client for the public-scoped Storefront API.
///
/// Use [`StorefrontClient::new`] for a real store or
/// [`StorefrontClient::with_endpoint`] to point at a mock server in tests.
pub struct StorefrontClient {
    client: Client,
    endpoint: Url,
    access_token: String,
    /// Host whose absolute links are rewritten to site-relative paths.
    store_host: Option<String>,
}

impl StorefrontClient {
    /// Creates a client for `https://{store_domain}/api/{api_version}/graphql.json`.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::InvalidEndpoint`] if the domain does not form
    /// a valid URL, or [`StorefrontError::Http`] if the `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        store_domain: &str,
        access_token: &str,
        api_version: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, StorefrontError> {
        let endpoint = format!("https://{store_domain}/api/{api_version}/graphql.json");
        Self::with_endpoint(&endpoint, access_token, timeout_secs, user_agent)
    }

    /// Creates a client posting to an explicit GraphQL endpoint.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontClient::new`].
    pub fn with_endpoint(
        endpoint: &str,
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, StorefrontError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let endpoint_url = Url::parse(endpoint).map_err(|e| StorefrontError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        let store_host = endpoint_url.host_str().map(str::to_owned);

        Ok(Self {
            client,
            endpoint: endpoint_url,
            access_token: access_token.to_owned(),
            store_host,
        })
    }

    /// Builds a client from the loaded application config.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, StorefrontError> {
        Self::new(
            &config.store_domain,
            &config.storefront_access_token,
            &config.api_version,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Overrides the host used when relativizing menu links.
    #[must_use]
    pub fn with_store_host(mut self, host: impl Into<String>) -> Self {
        self.store_host = Some(host.into());
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub(crate) fn store_host(&self) -> Option<&str> {
        self.store_host.as_deref()
    }

    /// Posts one GraphQL document and returns its `data` object.
    async fn execute(
        &self,
        context: &str,
        query: &str,
        variables: Value,
    ) -> Result<Value, StorefrontError> {
        let body = serde_json::json!({ "query": query, "variables": variables });

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorefrontError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let text = response.text().await?;
        let mut envelope: Value =
            serde_json::from_str(&text).map_err(|source| StorefrontError::Deserialize {
                context: context.to_string(),
                source,
            })?;

        if let Some(errors) = envelope.get("errors").and_then(Value::as_array) {
            if !errors.is_empty() {
                let messages = errors
                    .iter()
                    .map(|e| {
                        e.get("message")
                            .and_then(Value::as_str)
                            .unwrap_or("unknown GraphQL error")
                            .to_string()
                    })
                    .collect();
                return Err(StorefrontError::Graphql { messages });
            }
        }

        match envelope.get_mut("data").map(Value::take) {
            Some(data) if !data.is_null() => Ok(data),
            _ => Err(StorefrontError::MissingData {
                context: context.to_string(),
            }),
        }
    }

    /// Executes a query and deserializes `data[root]` into `T`.
    ///
    /// A `null` root yields `Ok(None)`: the API's way of saying the resource
    /// does not exist.
    async fn query_root<T: DeserializeOwned>(
        &self,
        context: &str,
        query: &str,
        variables: Value,
        root: &str,
    ) -> Result<Option<T>, StorefrontError> {
        let mut data = self.execute(context, query, variables).await?;
        let node = data.get_mut(root).map(Value::take).unwrap_or(Value::Null);
        if node.is_null() {
            return Ok(None);
        }
        serde_json::from_value(node)
            .map(Some)
            .map_err(|source| StorefrontError::Deserialize {
                context: context.to_string(),
                source,
            })
    }
}
