//! Domain model: catalog items, ranking, and value objects.

pub mod catalog;
pub mod ranking;
pub mod value_objects;

pub use catalog::{Badge, Catalog, CatalogError, Category, Product, Strength, Variant};
pub use ranking::pick_best;
pub use value_objects::{Money, MoneyError};
