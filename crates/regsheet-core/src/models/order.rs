use serde::{Deserialize, Serialize};

use crate::utils::format_money;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the smallest currency unit (cents for USD)
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub currency: String,
}

impl Money {
    pub fn new(amount: i64, currency: &str) -> Self {
        Self {
            amount,
            currency: currency.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub id: String,
    pub total_money: Option<Money>,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

impl Order {
    /// Total formatted as `"<amount> <currency>"`, empty when the order has no total
    pub fn total_display(&self) -> String {
        self.total_money
            .as_ref()
            .map(|m| format_money(m.amount, &m.currency))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub uid: Option<String>,
    pub name: Option<String>,
    pub catalog_object_id: Option<String>,
    /// Catalog version the line item was created against. Ad-hoc (non-catalog)
    /// items have none.
    pub catalog_version: Option<i64>,
    pub variation_name: Option<String>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

/// A custom field attached to a line item at purchase time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifier {
    pub uid: Option<String>,
    /// Order-time display name; may be a generic placeholder like `"Rank"`
    pub name: Option<String>,
    pub catalog_object_id: Option<String>,
}

impl Modifier {
    pub fn raw_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}
