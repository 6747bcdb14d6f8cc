use tracing::debug;

use crate::api::CatalogSource;
use crate::catalog::{CatalogIndexes, ListLookup};
use crate::models::Modifier;

use super::parse_kv;

/// Value emitted for a bare label that arrived without a value
pub const UNKNOWN_VALUE: &str = "Unknown";

/// Labels that still produce a field (valued `"Unknown"`) when they carry
/// no `": value"` part
pub const BARE_LABELS: [&str; 4] = ["Scout Name", "Scouter Name", "Rank", "Patrol"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    pub key: String,
    pub value: String,
}

impl ResolvedField {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// Resolve one line-item modifier to a field.
///
/// The catalog name (looked up under the line item's own version) wins over
/// the order-time name. If the modifier belongs to a modifier-list, the
/// list's name supplies the key. Ids missing from the index fall through to
/// the order-time name.
pub async fn resolve<C>(
    modifier: &Modifier,
    catalog_version: Option<i64>,
    indexes: &CatalogIndexes,
    lists: &ListLookup<'_, C>,
) -> Option<ResolvedField>
where
    C: CatalogSource + ?Sized,
{
    let mut display_name = modifier.raw_name().to_string();

    let catalog_object = match (catalog_version, modifier.catalog_object_id.as_deref()) {
        (Some(version), Some(id)) => indexes.get(version, id).map(|o| (version, o)),
        _ => None,
    };

    if let Some((version, object)) = catalog_object {
        match object.modifier_data() {
            Some(data) => {
                if let Some(ref name) = data.name {
                    display_name = name.clone();
                }
            }
            None => debug!(version, id = %object.id, object_type = %object.object_type(), "Catalog object is not a modifier"),
        }

        if let Some(list_id) = object.modifier_list_id() {
            let list_name = lists
                .modifier_list(version, list_id)
                .await
                .and_then(|list| list.modifier_list_data().and_then(|d| d.name.clone()));
            match list_name {
                Some(list_name) => return Some(resolve_with_list(&list_name, &display_name)),
                None => debug!(version, list_id, "Modifier list unavailable, resolving by name"),
            }
        }
    }

    resolve_plain(&display_name)
}

/// Combine a modifier-list name with the modifier's display name.
///
/// `"Patrol: Eagle Patrol"` + `"Special Accommodation"` gives key `Patrol`,
/// value `"Eagle Patrol - Special Accommodation"`. A list name without a
/// colon becomes the key and the display name the value.
pub fn resolve_with_list(list_name: &str, display_name: &str) -> ResolvedField {
    match parse_kv(list_name) {
        Some((list_key, list_value)) => {
            let value = if list_value.contains(display_name) {
                list_value.to_string()
            } else {
                format!("{} - {}", list_value, display_name)
            };
            ResolvedField {
                key: list_key.to_string(),
                value,
            }
        }
        None => ResolvedField::new(list_name, display_name),
    }
}

/// Resolve a display name that has no modifier-list behind it
pub fn resolve_plain(display_name: &str) -> Option<ResolvedField> {
    match parse_kv(display_name) {
        Some((key, value)) => Some(ResolvedField::new(key, value)),
        None if BARE_LABELS.contains(&display_name) => Some(ResolvedField::new(display_name, UNKNOWN_VALUE)),
        None => None,
    }
}
