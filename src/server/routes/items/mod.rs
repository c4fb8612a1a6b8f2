//! SQLite-backed items. The database actor is the lab's lifecycle resource.

pub mod handlers;

use crate::db::DbActorHandle;
use axum::{Router, routing::post};

#[derive(Clone)]
pub struct ItemsState {
    pub db: DbActorHandle,
}

pub fn router(state: ItemsState) -> Router {
    Router::new()
        .route(
            "/items/",
            post(handlers::create_item).get(handlers::list_items),
        )
        .with_state(state)
}
