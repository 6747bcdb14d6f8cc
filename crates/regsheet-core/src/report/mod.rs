//! Report rows and the sinks that render them.
//!
//! - `extract_rows`: one `OutputRow` per (order, line item)
//! - `write_csv`: CSV rendering
//! - `write_to_sheet`: Google Sheets overwrite/append

pub mod csv;
pub mod extract;
pub mod row;
pub mod sheets;

pub use self::csv::{csv_record, write_csv};
pub use extract::extract_rows;
pub use row::{Column, OutputRow, DEFAULT_PATROL, REPORT_HEADERS};
pub use sheets::{sheet_values, write_to_sheet, SheetValues, SheetsError};
