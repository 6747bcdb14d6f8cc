use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, error, warn};

use crate::api::CatalogSource;
use crate::models::{CatalogObject, Order};

/// Requested object ids, grouped by catalog version
pub type VersionedIds = BTreeMap<i64, Vec<String>>;

/// id -> object for a single catalog version
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    objects: HashMap<String, CatalogObject>,
}

impl CatalogIndex {
    pub fn from_objects(objects: impl IntoIterator<Item = CatalogObject>) -> Self {
        Self {
            objects: objects.into_iter().map(|o| (o.id.clone(), o)).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&CatalogObject> {
        self.objects.get(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// One `CatalogIndex` per catalog version. Versions never share an index.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndexes {
    by_version: HashMap<i64, CatalogIndex>,
}

impl CatalogIndexes {
    pub fn insert(&mut self, version: i64, index: CatalogIndex) {
        self.by_version.insert(version, index);
    }

    pub fn version(&self, version: i64) -> Option<&CatalogIndex> {
        self.by_version.get(&version)
    }

    /// Look up `id` strictly within `version`'s index
    pub fn get(&self, version: i64, id: &str) -> Option<&CatalogObject> {
        self.version(version).and_then(|index| index.get(id))
    }
}

/// Remove duplicate ids, keeping the first occurrence of each
pub fn dedup_preserving_order<S: AsRef<str>>(ids: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.iter()
        .map(|id| id.as_ref())
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

/// Collect the catalog ids of every line-item modifier, grouped by the line
/// item's catalog version, deduplicated in first-seen order.
///
/// Line items without a catalog version and modifiers without a catalog id
/// are skipped; those modifiers resolve from their order-time names alone.
pub fn group_modifier_ids(orders: &[Order]) -> VersionedIds {
    let mut grouped: VersionedIds = BTreeMap::new();

    for item in orders.iter().flat_map(|o| &o.line_items) {
        let Some(version) = item.catalog_version else {
            continue;
        };
        let ids = item
            .modifiers
            .iter()
            .filter_map(|m| m.catalog_object_id.as_deref())
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        grouped.entry(version).or_default().extend(ids);
    }

    grouped
        .into_iter()
        .filter(|(_, ids)| !ids.is_empty())
        .map(|(version, ids)| (version, dedup_preserving_order(&ids)))
        .collect()
}

/// Fetch every requested id with one batched call per version.
///
/// Failures are isolated per version: remote errors are logged and whatever
/// objects came back are kept; a transport failure leaves that version's
/// index empty. Nothing is propagated to the caller.
pub async fn build_index<C>(source: &C, version_to_ids: &VersionedIds) -> CatalogIndexes
where
    C: CatalogSource + ?Sized,
{
    let mut indexes = CatalogIndexes::default();

    for (&version, ids) in version_to_ids {
        let ids = dedup_preserving_order(ids);
        if ids.is_empty() {
            continue;
        }

        let index = match source.batch_get(&ids, version).await {
            Ok(partial) => {
                for err in &partial.errors {
                    warn!(version, error = %err, "Catalog batch fetch reported an error");
                }
                debug!(
                    version,
                    requested = ids.len(),
                    returned = partial.items.len(),
                    "Fetched catalog objects"
                );
                CatalogIndex::from_objects(partial.items)
            }
            Err(e) => {
                error!(version, error = %e, "Catalog batch fetch failed; version left unresolved");
                CatalogIndex::default()
            }
        };

        indexes.insert(version, index);
    }

    indexes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{line_item, modifier, order, FakeCatalog};

    #[test]
    fn test_dedup_preserving_order() {
        assert_eq!(dedup_preserving_order(&["M2", "M1", "M2", "M3", "M1"]), vec!["M2", "M1", "M3"]);
        assert!(dedup_preserving_order::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_group_modifier_ids_by_version() {
        let orders = vec![
            order("O1", 100, vec![line_item("Camp", Some(1), vec![modifier("Rank", Some("M1")), modifier("Patrol", Some("M2"))])]),
            order("O2", 100, vec![
                line_item("Camp", Some(1), vec![modifier("Rank", Some("M1"))]),
                line_item("Camp", Some(2), vec![modifier("Rank", Some("M1"))]),
                line_item("Donation", None, vec![modifier("Note", Some("M7"))]),
                line_item("Camp", Some(3), vec![modifier("Scout Name: Ann", None)]),
            ]),
        ];

        let grouped = group_modifier_ids(&orders);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[&1], vec!["M1", "M2"]);
        assert_eq!(grouped[&2], vec!["M1"]);
    }

    #[test]
    fn test_group_modifier_ids_no_line_items() {
        let orders = vec![order("O1", 0, vec![])];
        assert!(group_modifier_ids(&orders).is_empty());
    }

    #[tokio::test]
    async fn test_one_fetch_per_version_with_dedup() {
        let catalog = FakeCatalog::new().with(1, CatalogObject::modifier("M1", 1, "Rank: Star", None));
        let items = (0..5)
            .map(|_| line_item("Camp", Some(1), vec![modifier("Rank", Some("M1"))]))
            .collect();
        let orders = vec![order("O1", 100, items)];

        let indexes = build_index(&catalog, &group_modifier_ids(&orders)).await;

        assert_eq!(catalog.calls(), vec![(vec!["M1".to_string()], 1)]);
        assert!(indexes.get(1, "M1").is_some());
    }

    #[tokio::test]
    async fn test_caller_duplicates_are_removed() {
        let catalog = FakeCatalog::new();
        let mut request = VersionedIds::new();
        request.insert(4, vec!["A".to_string(), "B".to_string(), "A".to_string()]);
        request.insert(5, vec![]);

        build_index(&catalog, &request).await;

        assert_eq!(catalog.calls(), vec![(vec!["A".to_string(), "B".to_string()], 4)]);
    }

    #[tokio::test]
    async fn test_version_isolation() {
        let catalog = FakeCatalog::new()
            .with(1, CatalogObject::modifier("M1", 1, "Rank: Scout", None))
            .with(2, CatalogObject::modifier("M1", 2, "Rank: Tenderfoot", None));

        let mut request = VersionedIds::new();
        request.insert(1, vec!["M1".to_string()]);
        let indexes = build_index(&catalog, &request).await;
        assert!(indexes.get(1, "M1").is_some());
        assert!(indexes.get(2, "M1").is_none(), "v1 object must not satisfy a v2 lookup");

        request.insert(2, vec!["M1".to_string()]);
        let indexes = build_index(&catalog, &request).await;
        let v2 = indexes.get(2, "M1").and_then(|o| o.modifier_data()).and_then(|d| d.name.clone());
        assert_eq!(v2.as_deref(), Some("Rank: Tenderfoot"));
        assert_eq!(catalog.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_partial_errors_keep_returned_objects() {
        let catalog = FakeCatalog::new().with(1, CatalogObject::modifier("M1", 1, "Rank: Star", None));
        let mut request = VersionedIds::new();
        request.insert(1, vec!["M1".to_string(), "MISSING".to_string()]);

        let indexes = build_index(&catalog, &request).await;

        let index = indexes.version(1).expect("version 1 should be indexed");
        assert_eq!(index.len(), 1);
        assert!(index.get("MISSING").is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_is_isolated_per_version() {
        let catalog = FakeCatalog::new()
            .with(1, CatalogObject::modifier("M1", 1, "Rank: Star", None))
            .with(2, CatalogObject::modifier("M2", 2, "Rank: Life", None))
            .failing_version(1);

        let mut request = VersionedIds::new();
        request.insert(1, vec!["M1".to_string()]);
        request.insert(2, vec!["M2".to_string()]);

        let indexes = build_index(&catalog, &request).await;

        assert!(indexes.version(1).is_some_and(CatalogIndex::is_empty));
        assert!(indexes.get(2, "M2").is_some());
    }
}
