//! regsheet core - reconcile a Square order feed against its modifier
//! catalog and flatten it into a registration roster.
//!
//! Data flows one way: orders are searched, their modifier ids grouped by
//! catalog version and fetched in batches, each line item's modifiers are
//! resolved to `Key: Value` fields, and the fields are mapped into one
//! `OutputRow` per line item for a CSV or spreadsheet sink.

pub mod api;
pub mod catalog;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod resolve;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{Config, ConfigError, GoogleCredentials, SheetSettings, SheetTarget, SquareEnvironment, SquareSettings, WriteMode};
pub use pipeline::{fetch_orders, run_report, ReportSettings};
