use tracing::{debug, warn};

use crate::api::CatalogSource;
use crate::models::{CatalogObject, Order};

use super::index::{build_index, dedup_preserving_order, CatalogIndexes, VersionedIds};

/// How modifier-list definitions are fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStrategy {
    /// One fetch per list-bearing modifier, at resolution time
    #[default]
    Lazy,
    /// One batched fetch per version before any row is extracted
    Prefetch,
}

/// Source of modifier-list definitions for the resolver.
///
/// Both variants resolve the same (version, list id) pairs to the same
/// objects; they differ only in when the round-trips happen.
pub enum ListLookup<'a, C: ?Sized> {
    Lazy(&'a C),
    Prefetched(CatalogIndexes),
}

impl<'a, C> ListLookup<'a, C>
where
    C: CatalogSource + ?Sized,
{
    pub async fn prepare(strategy: ListStrategy, source: &'a C, orders: &[Order], indexes: &CatalogIndexes) -> Self {
        match strategy {
            ListStrategy::Lazy => ListLookup::Lazy(source),
            ListStrategy::Prefetch => ListLookup::Prefetched(prefetch_modifier_lists(source, orders, indexes).await),
        }
    }

    pub async fn modifier_list(&self, version: i64, list_id: &str) -> Option<CatalogObject> {
        match self {
            ListLookup::Lazy(source) => fetch_modifier_list(*source, version, list_id).await,
            ListLookup::Prefetched(lists) => lists
                .get(version, list_id)
                .filter(|o| o.modifier_list_data().is_some())
                .cloned(),
        }
    }
}

/// Fetch a single modifier-list under `version`.
///
/// Returns `None` when the call fails or the list isn't among the returned
/// objects; the caller then treats the modifier as list-less.
pub async fn fetch_modifier_list<C>(source: &C, version: i64, list_id: &str) -> Option<CatalogObject>
where
    C: CatalogSource + ?Sized,
{
    let ids = [list_id.to_string()];
    match source.batch_get(&ids, version).await {
        Ok(partial) => {
            for err in &partial.errors {
                warn!(version, list_id, error = %err, "Modifier list fetch reported an error");
            }
            let found = partial
                .items
                .into_iter()
                .find(|o| o.id == list_id && o.modifier_list_data().is_some());
            if found.is_none() {
                debug!(version, list_id, "Modifier list not returned");
            }
            found
        }
        Err(e) => {
            warn!(version, list_id, error = %e, "Modifier list fetch failed");
            None
        }
    }
}

/// Every (version, modifier-list id) pair reachable from the orders through
/// the modifier index, deduplicated in first-seen order.
pub fn group_modifier_list_ids(orders: &[Order], indexes: &CatalogIndexes) -> VersionedIds {
    let mut grouped = VersionedIds::new();

    for item in orders.iter().flat_map(|o| &o.line_items) {
        let Some(version) = item.catalog_version else {
            continue;
        };
        let list_ids = item
            .modifiers
            .iter()
            .filter_map(|m| m.catalog_object_id.as_deref())
            .filter_map(|id| indexes.get(version, id))
            .filter_map(CatalogObject::modifier_list_id)
            .map(str::to_string);
        grouped.entry(version).or_default().extend(list_ids);
    }

    grouped
        .into_iter()
        .filter(|(_, ids)| !ids.is_empty())
        .map(|(version, ids)| (version, dedup_preserving_order(&ids)))
        .collect()
}

pub async fn prefetch_modifier_lists<C>(source: &C, orders: &[Order], indexes: &CatalogIndexes) -> CatalogIndexes
where
    C: CatalogSource + ?Sized,
{
    build_index(source, &group_modifier_list_ids(orders, indexes)).await
}
