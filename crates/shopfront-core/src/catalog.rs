use serde::{Deserialize, Serialize};

use crate::products::ProductImage;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub description: String,
    pub image: Option<ProductImage>,
}

/// A navigation menu, e.g. `main-menu` or `footer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub handle: String,
    pub title: String,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub title: String,
    /// Site-relative path when the item points at this store, else the
    /// absolute URL as configured.
    pub url: String,
    pub items: Vec<MenuItem>,
}

/// A static content page managed in the commerce backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub handle: String,
    pub title: String,
    /// Raw HTML body.
    pub body: String,
    pub body_summary: String,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}
