//! VAPLUS Storefront logic core
//!
//! Pure, stateless storefront logic behind a localized catalog-to-Telegram
//! order flow.
//!
//! ## Features
//! - Localized catalog (EN/ZH) with canonical-text fallback
//! - GST-inclusive price formatting with a plain-text fallback
//! - Best-seller ranking
//! - Shipping fee / transit-time estimation for AU regions
//! - Telegram deep-link construction and mobile app-scheme dispatch
//!
//! Environment access (client-local storage, analytics beacon, platform
//! navigation) sits behind traits so every flow is testable without a live
//! browser. Display logic never hard-fails: formatting, storage, and
//! transport problems all degrade to defined fallbacks.

use thiserror::Error;

pub mod attribution;
pub mod config;
pub mod domain;
pub mod i18n;
pub mod order;
pub mod pricing;
pub mod session;
pub mod shipping;
pub mod storage;
pub mod telegram;

pub use config::StorefrontConfig;
pub use domain::catalog::{Catalog, Product, Variant};
pub use domain::ranking::pick_best;
pub use domain::value_objects::Money;
pub use i18n::{Lang, LocalizedText};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Unknown variant {variant} for product {product}")]
    UnknownVariant { product: String, variant: String },

    #[error("Invalid catalog: {0}")]
    Catalog(#[from] domain::catalog::CatalogError),
}

pub type Result<T, E = StorefrontError> = std::result::Result<T, E>;
