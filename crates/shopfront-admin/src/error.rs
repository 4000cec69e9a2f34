use thiserror::Error;

/// Errors returned by the administrative API client.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("GraphQL error: {}", .messages.join("; "))]
    Graphql { messages: Vec<String> },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("response for {context} carried no data")]
    MissingData { context: String },

    #[error("invalid admin endpoint \"{endpoint}\": {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}
