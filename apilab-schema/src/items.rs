use serde::{Deserialize, Serialize};

/// A persisted item. `id` is assigned by the database on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub is_offered: bool,
}
