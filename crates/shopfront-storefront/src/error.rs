use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("GraphQL error: {}", .messages.join("; "))]
    Graphql { messages: Vec<String> },

    /// A cart mutation was rejected with `userErrors`.
    #[error("cart mutation rejected: {}", .messages.join("; "))]
    UserErrors { messages: Vec<String> },

    /// The cart expired or was deleted remotely.
    #[error("cart not found: {cart_id}")]
    CartNotFound { cart_id: String },

    /// The targeted line is no longer part of the cart.
    #[error("cart line not found: {line_id}")]
    LineNotFound { line_id: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("response for {context} carried no data")]
    MissingData { context: String },

    #[error("invalid Storefront endpoint \"{endpoint}\": {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

impl StorefrontError {
    /// `true` for expected-absence conditions (expired cart, removed line)
    /// that callers reconcile instead of reporting.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StorefrontError::CartNotFound { .. } | StorefrontError::LineNotFound { .. }
        )
    }
}
