//! Storefront API access: the GraphQL client, the product adapter, and the
//! cart state synchronizer built on top of them.

pub mod adapter;
pub mod cart;
pub mod client;
pub mod error;
pub mod queries;
pub mod types;

pub use adapter::{
    adapt_cart, adapt_collection, adapt_menu, adapt_page, adapt_product, adapt_product_connection,
    adapt_product_value,
};
pub use cart::{
    CartBackend, CartIdStore, CartPhase, CartSynchronizer, CartView, LineInput, LineUpdate,
    MemoryCartIdStore,
};
pub use client::StorefrontClient;
pub use error::StorefrontError;
