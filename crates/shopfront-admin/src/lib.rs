//! Administrative API access for the discount/promotion feed.
//!
//! Server-only: the admin token is private and never reaches a browser.

pub mod client;
pub mod error;
pub mod feed;
pub mod normalize;
pub mod types;

pub use client::AdminClient;
pub use error::AdminError;
pub use feed::fetch_active_discounts;
pub use normalize::{active_promotions, normalize_discount};
