//! Database module: the SQLite-backed `item` table of the items lab.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing (and dropping) the table
//! - `actor.rs`: the actor owning the pool; one transaction per write

pub mod actor;
pub mod models;
pub mod schema;

pub use actor::{DbActorHandle, DbArgs, spawn};
pub use models::{DbItem, ItemCreate};
pub use schema::{SQLITE_DROP, SQLITE_INIT};
