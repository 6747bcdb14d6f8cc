//! In-memory fakes and fixtures shared by unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ApiError, CatalogSource, OrderSource, Partial, RemoteError};
use crate::models::{CatalogObject, LineItem, Modifier, Money, Order};
use crate::report::SheetValues;

// ============================================================================
// Fixture builders
// ============================================================================

pub(crate) fn modifier(name: &str, catalog_object_id: Option<&str>) -> Modifier {
    Modifier {
        uid: None,
        name: Some(name.to_string()),
        catalog_object_id: catalog_object_id.map(str::to_string),
    }
}

pub(crate) fn line_item(name: &str, catalog_version: Option<i64>, modifiers: Vec<Modifier>) -> LineItem {
    LineItem {
        uid: None,
        name: Some(name.to_string()),
        catalog_object_id: Some("CATALOG_ITEM_1".to_string()),
        catalog_version,
        variation_name: None,
        modifiers,
    }
}

pub(crate) fn order(id: &str, amount: i64, line_items: Vec<LineItem>) -> Order {
    Order {
        id: id.to_string(),
        total_money: Some(Money::new(amount, "USD")),
        line_items,
    }
}

/// Three registrations, all against catalog version 1
pub(crate) fn mock_orders() -> Vec<Order> {
    vec![
        order(
            "ORDER_1",
            15000,
            vec![line_item(
                "Camp Registration",
                Some(1),
                vec![
                    modifier("Scout Name: John Smith", Some("MODIFIER_1")),
                    modifier("Rank", Some("MODIFIER_2")),
                ],
            )],
        ),
        order(
            "ORDER_2",
            25000,
            vec![line_item(
                "Camp Registration",
                Some(1),
                vec![
                    modifier("Scout Name: Jane Doe", Some("MODIFIER_3")),
                    modifier("Scouter Name: Bob Doe", Some("MODIFIER_4")),
                    modifier("Emergency Contact: Alice Doe", Some("MODIFIER_5")),
                ],
            )],
        ),
        order(
            "ORDER_3",
            10000,
            vec![line_item(
                "Camp Registration",
                Some(1),
                vec![
                    modifier("Patrol", Some("MODIFIER_6")),
                    modifier("Will you travel with the troop to the campout?", Some("MODIFIER_7")),
                ],
            )],
        ),
    ]
}

pub(crate) fn mock_catalog() -> FakeCatalog {
    FakeCatalog::new()
        .with(1, CatalogObject::modifier("MODIFIER_1", 1, "Scout Name: John Smith", None))
        .with(1, CatalogObject::modifier("MODIFIER_2", 1, "Rank: Tenderfoot", None))
        .with(1, CatalogObject::modifier("MODIFIER_3", 1, "Scout Name: Jane Doe", None))
        .with(1, CatalogObject::modifier("MODIFIER_4", 1, "Scouter Name: Bob Doe", None))
        .with(1, CatalogObject::modifier("MODIFIER_5", 1, "Emergency Contact: Alice Doe", None))
        .with(1, CatalogObject::modifier("MODIFIER_6", 1, "Patrol: Eagle Patrol", None))
        .with(
            1,
            CatalogObject::modifier("MODIFIER_7", 1, "Will you travel with the troop to the campout?: Yes", None),
        )
}

// ============================================================================
// Order source
// ============================================================================

pub(crate) struct FakeOrders {
    orders: Vec<Order>,
    errors: Vec<RemoteError>,
    fail: bool,
    calls: Mutex<Vec<(Vec<String>, u32)>>,
}

impl FakeOrders {
    pub(crate) fn new(orders: Vec<Order>) -> Self {
        Self {
            orders,
            errors: Vec::new(),
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_errors(mut self, errors: Vec<RemoteError>) -> Self {
        self.errors = errors;
        self
    }

    pub(crate) fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<(Vec<String>, u32)> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl OrderSource for FakeOrders {
    async fn search_orders(&self, location_ids: &[String], limit: u32) -> Result<Partial<Order>, ApiError> {
        self.calls.lock().expect("calls lock").push((location_ids.to_vec(), limit));
        if self.fail {
            return Err(ApiError::ServerError("fake order outage".to_string()));
        }
        Ok(Partial {
            items: self.orders.iter().take(limit as usize).cloned().collect(),
            errors: self.errors.clone(),
        })
    }
}

// ============================================================================
// Catalog source
// ============================================================================

/// Versioned catalog. Unknown ids come back as NOT_FOUND errors next to the
/// objects that were found.
#[derive(Default)]
pub(crate) struct FakeCatalog {
    objects: HashMap<i64, Vec<CatalogObject>>,
    failing: HashSet<i64>,
    calls: Mutex<Vec<(Vec<String>, i64)>>,
}

impl FakeCatalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, version: i64, object: CatalogObject) -> Self {
        self.objects.entry(version).or_default().push(object);
        self
    }

    pub(crate) fn failing_version(mut self, version: i64) -> Self {
        self.failing.insert(version);
        self
    }

    pub(crate) fn calls(&self) -> Vec<(Vec<String>, i64)> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn batch_get(&self, object_ids: &[String], catalog_version: i64) -> Result<Partial<CatalogObject>, ApiError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((object_ids.to_vec(), catalog_version));

        if self.failing.contains(&catalog_version) {
            return Err(ApiError::ServerError("fake catalog outage".to_string()));
        }

        let known = self.objects.get(&catalog_version).map(Vec::as_slice).unwrap_or_default();
        let mut partial = Partial::default();
        for id in object_ids {
            match known.iter().find(|o| &o.id == id) {
                Some(object) => partial.items.push(object.clone()),
                None => partial.errors.push(RemoteError {
                    category: "INVALID_REQUEST_ERROR".to_string(),
                    code: "NOT_FOUND".to_string(),
                    detail: Some(format!("Object `{}` not found", id)),
                    field: None,
                }),
            }
        }
        Ok(partial)
    }
}

// ============================================================================
// Spreadsheet
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SheetCall {
    Get(String),
    Clear(String),
    Update(String, Vec<Vec<String>>),
    Append(String, Vec<Vec<String>>),
}

pub(crate) struct FakeSheet {
    existing: Vec<Vec<String>>,
    fail_get: bool,
    fail_writes: bool,
    calls: Mutex<Vec<SheetCall>>,
}

impl FakeSheet {
    pub(crate) fn new(existing: Vec<Vec<String>>) -> Self {
        Self {
            existing,
            fail_get: false,
            fail_writes: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing_get(mut self) -> Self {
        self.fail_get = true;
        self
    }

    pub(crate) fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<SheetCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: SheetCall) {
        self.calls.lock().expect("calls lock").push(call);
    }

    fn write_result(&self, rows: &[Vec<String>]) -> Result<u64, ApiError> {
        if self.fail_writes {
            return Err(ApiError::AccessDenied("The caller does not have permission".to_string()));
        }
        Ok(rows.iter().map(|r| r.len() as u64).sum())
    }
}

#[async_trait]
impl SheetValues for FakeSheet {
    async fn get_values(&self, _sheet_id: &str, range: &str) -> Result<Vec<Vec<String>>, ApiError> {
        self.record(SheetCall::Get(range.to_string()));
        if self.fail_get {
            return Err(ApiError::NotFound("Unable to parse range".to_string()));
        }
        Ok(self.existing.clone())
    }

    async fn clear(&self, _sheet_id: &str, range: &str) -> Result<(), ApiError> {
        self.record(SheetCall::Clear(range.to_string()));
        self.write_result(&[]).map(|_| ())
    }

    async fn update(&self, _sheet_id: &str, range: &str, rows: &[Vec<String>]) -> Result<u64, ApiError> {
        self.record(SheetCall::Update(range.to_string(), rows.to_vec()));
        self.write_result(rows)
    }

    async fn append(&self, _sheet_id: &str, range: &str, rows: &[Vec<String>]) -> Result<u64, ApiError> {
        self.record(SheetCall::Append(range.to_string(), rows.to_vec()));
        self.write_result(rows)
    }
}
