use apilab_schema::Item;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbItem {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub is_offered: bool,
}

impl From<DbItem> for Item {
    fn from(row: DbItem) -> Self {
        Item {
            id: Some(row.id),
            name: row.name,
            price: row.price,
            is_offered: row.is_offered,
        }
    }
}

/// Insert payload. Any client-side id is dropped; SQLite assigns one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCreate {
    pub name: String,
    pub price: f64,
    pub is_offered: bool,
}

impl From<Item> for ItemCreate {
    fn from(item: Item) -> Self {
        ItemCreate {
            name: item.name,
            price: item.price,
            is_offered: item.is_offered,
        }
    }
}
