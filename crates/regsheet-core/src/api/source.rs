use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::{CatalogObject, Order};

use super::ApiError;

/// An application-level error reported by the API alongside (possibly empty)
/// result data, e.g. `INVALID_REQUEST_ERROR / NOT_FOUND`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RemoteError {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.code)?;
        if let Some(ref detail) = self.detail {
            write!(f, ": {}", detail)?;
        }
        if let Some(ref field) = self.field {
            write!(f, " (field {})", field)?;
        }
        Ok(())
    }
}

/// Whatever the API returned, plus any errors it reported while doing so.
#[derive(Debug, Clone, PartialEq)]
pub struct Partial<T> {
    pub items: Vec<T>,
    pub errors: Vec<RemoteError>,
}

impl<T> Partial<T> {
    pub fn ok(items: Vec<T>) -> Self {
        Self { items, errors: Vec::new() }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl<T> Default for Partial<T> {
    fn default() -> Self {
        Self::ok(Vec::new())
    }
}

/// Source of orders for a set of locations.
#[async_trait]
pub trait OrderSource: Send + Sync {
    async fn search_orders(&self, location_ids: &[String], limit: u32) -> Result<Partial<Order>, ApiError>;
}

/// Source of versioned catalog objects.
///
/// Objects are looked up under an explicit catalog version; the same id
/// may resolve differently (or not at all) under another version.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn batch_get(&self, object_ids: &[String], catalog_version: i64) -> Result<Partial<CatalogObject>, ApiError>;
}
