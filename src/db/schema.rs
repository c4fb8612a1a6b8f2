//! SQL DDL for the items lab.

/// SQLite schema: a single `item` table, one row per item.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS item (
    id INTEGER PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    price REAL NOT NULL,
    is_offered INTEGER NOT NULL DEFAULT 0
);
"#;

/// Drops the `item` table and its rows.
pub const SQLITE_DROP: &str = r#"
DROP TABLE IF EXISTS item;
"#;
