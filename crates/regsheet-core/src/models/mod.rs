//! Data models for orders and catalog definitions.
//!
//! - `Order`, `LineItem`, `Modifier`, `Money`: an order snapshot as returned
//!   by order search
//! - `CatalogObject` and its `CatalogData` payloads: versioned modifier and
//!   modifier-list definitions

pub mod catalog;
pub mod order;

pub use catalog::{CatalogData, CatalogObject, CatalogObjectType, ModifierData, ModifierListData};
pub use order::{LineItem, Modifier, Money, Order};
