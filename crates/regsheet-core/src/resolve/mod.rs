//! Modifier resolution: turning a line-item modifier into a `Key: Value`
//! field using the catalog's authoritative names.

pub mod parser;
pub mod resolver;

pub use parser::parse_kv;
pub use resolver::{resolve, resolve_plain, resolve_with_list, ResolvedField, BARE_LABELS, UNKNOWN_VALUE};
