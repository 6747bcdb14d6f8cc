//! Catalog index building.
//!
//! Catalog objects are versioned, so every lookup is scoped to the catalog
//! version the line item was created against. `build_index` issues one
//! batched fetch per version; modifier-list definitions are fetched either
//! lazily per modifier or prefetched in bulk (see `ListLookup`).

pub mod index;
pub mod lists;

pub use index::{build_index, dedup_preserving_order, group_modifier_ids, CatalogIndex, CatalogIndexes, VersionedIds};
pub use lists::{fetch_modifier_list, group_modifier_list_ids, prefetch_modifier_lists, ListLookup, ListStrategy};
