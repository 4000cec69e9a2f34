//! Per-path SEO metadata loaded from a static JSON file:
//!
//! ```json
//! {
//!   "default": { "title": "Shopfront", "description": "Outdoor gear." },
//!   "/blog":   { "title": "Journal" }
//! }
//! ```
//!
//! Lookups fall back to the `default` entry field by field.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;

const DEFAULT_KEY: &str = "default";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoEntry {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Open Graph image URL.
    pub image: Option<String>,
    pub keywords: Vec<String>,
}

impl SeoEntry {
    fn or(self, fallback: &SeoEntry) -> SeoEntry {
        SeoEntry {
            title: self.title.or_else(|| fallback.title.clone()),
            description: self.description.or_else(|| fallback.description.clone()),
            image: self.image.or_else(|| fallback.image.clone()),
            keywords: if self.keywords.is_empty() {
                fallback.keywords.clone()
            } else {
                self.keywords
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeoMap {
    default: SeoEntry,
    pages: HashMap<String, SeoEntry>,
}

impl SeoMap {
    /// # Errors
    ///
    /// Returns [`ContentError::Io`] if the file cannot be read, or
    /// [`ContentError::SeoMap`] if it is not a JSON object of entries.
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw).map_err(|source| ContentError::SeoMap {
            path: path.display().to_string(),
            source,
        })
    }

    /// # Errors
    ///
    /// Returns the `serde_json` error when `raw` is not a map of entries.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut entries: HashMap<String, SeoEntry> = serde_json::from_str(raw)?;
        let default = entries.remove(DEFAULT_KEY).unwrap_or_default();
        let pages = entries
            .into_iter()
            .map(|(path, entry)| (normalize_path(&path), entry))
            .collect();
        Ok(Self { default, pages })
    }

    /// Metadata for `path`, with unset fields taken from the default entry.
    /// Query strings and trailing slashes are ignored.
    #[must_use]
    pub fn lookup(&self, path: &str) -> SeoEntry {
        match self.pages.get(&normalize_path(path)) {
            Some(entry) => entry.clone().or(&self.default),
            None => self.default.clone(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default().trim();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
