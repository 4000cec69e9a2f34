use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} does not start with a front matter block")]
    MissingFrontMatter { path: String },

    #[error("invalid front matter in {path}: {source}")]
    FrontMatter {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid SEO map {path}: {source}")]
    SeoMap {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("sitemap generation failed: {0}")]
    Sitemap(String),
}
