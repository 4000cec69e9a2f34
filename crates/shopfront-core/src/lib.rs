pub mod app_config;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod discounts;
pub mod money;
pub mod pricing;
pub mod products;

use thiserror::Error;

pub use app_config::{AppConfig, ContactMailConfig, Environment, SmtpSecurity};
pub use cart::{Cart, CartCost, CartDiscountCode, CartLine, LineCost, LineMerchandise};
pub use catalog::{Collection, Menu, MenuItem, Page};
pub use config::{load_app_config, load_app_config_from_env};
pub use discounts::{ActiveDiscounts, DiscountKind, DiscountMethod, Promotion};
pub use money::{format_display, parse_amount, Money, PriceValue, DISPLAY_CURRENCY};
pub use pricing::{summarize_sale, SaleInput, SaleSummary};
pub use products::{
    ProductBadge, ProductImage, ProductVariant, SelectedOption, StorefrontProduct,
    PLACEHOLDER_IMAGE_URL, UNTITLED_PRODUCT,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
