//! Orchestration: orders -> catalog indexes -> report rows.

use tracing::{error, info, warn};

use crate::api::{CatalogSource, OrderSource};
use crate::catalog::{build_index, group_modifier_ids, ListLookup, ListStrategy};
use crate::models::Order;
use crate::report::{extract_rows, OutputRow};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
    pub location_ids: Vec<String>,
    pub limit: u32,
    pub list_strategy: ListStrategy,
}

/// Search orders once. Remote errors are logged and whatever orders came
/// back are used; a transport failure yields no orders.
pub async fn fetch_orders<O>(source: &O, location_ids: &[String], limit: u32) -> Vec<Order>
where
    O: OrderSource + ?Sized,
{
    match source.search_orders(location_ids, limit).await {
        Ok(partial) => {
            for err in &partial.errors {
                warn!(error = %err, "Order search reported an error");
            }
            info!(count = partial.items.len(), "Fetched orders");
            partial.items
        }
        Err(e) => {
            error!(error = %e, "Order search failed");
            Vec::new()
        }
    }
}

/// Build the full report: one row per (order, line item)
pub async fn run_report<O, C>(orders: &O, catalog: &C, settings: &ReportSettings) -> Vec<OutputRow>
where
    O: OrderSource + ?Sized,
    C: CatalogSource + ?Sized,
{
    let orders = fetch_orders(orders, &settings.location_ids, settings.limit).await;
    if orders.is_empty() {
        info!("No orders found");
        return Vec::new();
    }

    let requested = group_modifier_ids(&orders);
    let indexes = build_index(catalog, &requested).await;
    let lists = ListLookup::prepare(settings.list_strategy, catalog, &orders, &indexes).await;

    let rows = extract_rows(&orders, &indexes, &lists).await;
    info!(rows = rows.len(), versions = requested.len(), "Report rows extracted");
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RemoteError;
    use crate::testing::{mock_catalog, mock_orders, FakeOrders};

    fn settings(list_strategy: ListStrategy) -> ReportSettings {
        ReportSettings {
            location_ids: vec!["LRG8TDY17X9VD".to_string()],
            limit: 70,
            list_strategy,
        }
    }

    #[tokio::test]
    async fn test_run_report_over_mock_feed() {
        let orders = FakeOrders::new(mock_orders());
        let catalog = mock_catalog();

        let rows = run_report(&orders, &catalog, &settings(ListStrategy::Lazy)).await;

        assert_eq!(orders.calls(), vec![(vec!["LRG8TDY17X9VD".to_string()], 70)]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].rank, "Tenderfoot");
        assert_eq!(rows[0].display_name(), "John Smith");
        assert_eq!(rows[1].display_name(), "Jane Doe");
        assert_eq!(rows[2].patrol, "Eagle Patrol");
        // All seven modifiers share catalog version 1: a single batched fetch
        assert_eq!(catalog.calls().len(), 1);
        assert_eq!(catalog.calls()[0].0.len(), 7);
    }

    #[tokio::test]
    async fn test_order_errors_keep_partial_orders() {
        let orders = FakeOrders::new(mock_orders()).with_errors(vec![RemoteError {
            category: "INVALID_REQUEST_ERROR".to_string(),
            code: "NOT_FOUND".to_string(),
            detail: Some("No orders found".to_string()),
            field: None,
        }]);

        let rows = run_report(&orders, &mock_catalog(), &settings(ListStrategy::Prefetch)).await;
        assert_eq!(rows.len(), 3);
    }

    #[tokio::test]
    async fn test_order_transport_failure_yields_no_rows() {
        let orders = FakeOrders::new(mock_orders()).failing();
        let catalog = mock_catalog();

        let rows = run_report(&orders, &catalog, &settings(ListStrategy::Lazy)).await;

        assert!(rows.is_empty());
        assert!(catalog.calls().is_empty());
    }
}
