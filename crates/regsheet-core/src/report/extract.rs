use tracing::debug;

use crate::api::CatalogSource;
use crate::catalog::{CatalogIndexes, ListLookup};
use crate::models::Order;
use crate::resolve::resolve;

use super::row::{Column, OutputRow};

/// Flatten orders into one row per (order, line item), in input order.
///
/// Each modifier is resolved against the index for its line item's catalog
/// version and its key mapped through `Column::from_key`. Unrecognised keys
/// are dropped; a later modifier mapping to the same column wins.
pub async fn extract_rows<C>(orders: &[Order], indexes: &CatalogIndexes, lists: &ListLookup<'_, C>) -> Vec<OutputRow>
where
    C: CatalogSource + ?Sized,
{
    let mut rows = Vec::new();

    for order in orders {
        let total_money = order.total_display();

        for item in &order.line_items {
            let mut row = OutputRow {
                order_id: order.id.clone(),
                total_money: total_money.clone(),
                line_item_name: item.name.clone().unwrap_or_default(),
                ..OutputRow::default()
            };

            for modifier in &item.modifiers {
                let Some(field) = resolve(modifier, item.catalog_version, indexes, lists).await else {
                    continue;
                };
                match Column::from_key(&field.key) {
                    Some(column) => row.set(column, field.value),
                    None => debug!(order_id = %order.id, key = %field.key, "Dropping unrecognised field"),
                }
            }

            rows.push(row);
        }
    }

    rows
}
