use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::{json, Value};
use shopfront_core::AppConfig;

use crate::error::AdminError;
use crate::types::{DiscountNodesData, RawDiscountNode};

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Upper bound on discount nodes fetched per call. Stores rarely run more
/// than a handful at once.
pub const MAX_DISCOUNT_NODES: u32 = 50;

const DISCOUNT_NODES_QUERY: &str = r#"query ActiveDiscounts($first: Int!) {
  discountNodes(first: $first, query: "status:active") {
    nodes {
      id
      discount {
        __typename
        ... on DiscountCodeBasic {
          title status summary startsAt endsAt
          codes(first: 1) { nodes { code } }
          customerGets { value { ...DiscountValue } }
        }
        ... on DiscountAutomaticBasic {
          title status summary startsAt endsAt
          customerGets { value { ...DiscountValue } }
        }
        ... on DiscountCodeFreeShipping {
          title status summary startsAt endsAt
          codes(first: 1) { nodes { code } }
        }
        ... on DiscountAutomaticFreeShipping { title status summary startsAt endsAt }
        ... on DiscountCodeBxgy {
          title status summary startsAt endsAt
          codes(first: 1) { nodes { code } }
        }
        ... on DiscountAutomaticBxgy { title status summary startsAt endsAt }
      }
    }
  }
}

fragment DiscountValue on DiscountCustomerGetsValue {
  __typename
  ... on DiscountPercentage { percentage }
  ... on DiscountAmount { amount { amount currencyCode } }
}"#;

/// Client for the private Admin GraphQL API.
pub struct AdminClient {
    client: Client,
    endpoint: Url,
    access_token: String,
}

impl AdminClient {
    /// Creates a client for `https://{store_domain}/admin/api/{api_version}/graphql.json`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::InvalidEndpoint`] for a domain that does not form
    /// a URL, or [`AdminError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        store_domain: &str,
        access_token: &str,
        api_version: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, AdminError> {
        let endpoint = format!("https://{store_domain}/admin/api/{api_version}/graphql.json");
        Self::with_endpoint(&endpoint, access_token, timeout_secs, user_agent)
    }

    /// Creates a client posting to an explicit endpoint (for wiremock tests).
    ///
    /// # Errors
    ///
    /// Same as [`AdminClient::new`].
    pub fn with_endpoint(
        endpoint: &str,
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, AdminError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        let endpoint_url = Url::parse(endpoint).map_err(|e| AdminError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            client,
            endpoint: endpoint_url,
            access_token: access_token.to_owned(),
        })
    }

    /// `Ok(None)` when no admin token is configured.
    ///
    /// # Errors
    ///
    /// Same as [`AdminClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, AdminError> {
        let Some(token) = config.admin_access_token.as_deref() else {
            return Ok(None);
        };
        Self::new(
            &config.store_domain,
            token,
            &config.api_version,
            config.request_timeout_secs,
            &config.user_agent,
        )
        .map(Some)
    }

    /// Fetches up to `first` discount nodes the API reports as active.
    ///
    /// # Errors
    ///
    /// - [`AdminError::Http`] on network failure.
    /// - [`AdminError::UnexpectedStatus`] for a non-2xx response.
    /// - [`AdminError::Graphql`] when the payload carries `errors[]`.
    /// - [`AdminError::Deserialize`] when `data` has the wrong shape.
    pub async fn discount_nodes(&self, first: u32) -> Result<Vec<RawDiscountNode>, AdminError> {
        let data = self
            .execute("discountNodes", DISCOUNT_NODES_QUERY, json!({ "first": first }))
            .await?;
        let parsed: DiscountNodesData =
            serde_json::from_value(data).map_err(|source| AdminError::Deserialize {
                context: "discountNodes".to_string(),
                source,
            })?;
        Ok(parsed.discount_nodes.nodes)
    }

    async fn execute(
        &self,
        context: &str,
        query: &str,
        variables: Value,
    ) -> Result<Value, AdminError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdminError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let text = response.text().await?;
        let mut envelope: Value =
            serde_json::from_str(&text).map_err(|source| AdminError::Deserialize {
                context: context.to_string(),
                source,
            })?;

        let messages: Vec<String> = envelope
            .get("errors")
            .and_then(Value::as_array)
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e.get("message").and_then(Value::as_str))
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();
        if !messages.is_empty() {
            return Err(AdminError::Graphql { messages });
        }

        match envelope.get_mut("data").map(Value::take) {
            Some(data) if !data.is_null() => Ok(data),
            _ => Err(AdminError::MissingData {
                context: context.to_string(),
            }),
        }
    }
}
