//! Path/query parameter lab over an in-memory order book.

pub mod handlers;

use crate::store::OrderBook;
use crate::store::orders::demo_profile;
use apilab_schema::UserProfile;
use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct OrdersState {
    pub book: Arc<RwLock<OrderBook>>,
    pub profile: Arc<UserProfile>,
}

impl OrdersState {
    pub fn seeded() -> Self {
        Self {
            book: Arc::new(RwLock::new(OrderBook::seeded())),
            profile: Arc::new(demo_profile()),
        }
    }
}

pub fn router(state: OrdersState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/hello/{name}", get(handlers::say_hello))
        .route("/add/{a}/{b}", get(handlers::add))
        .route("/get_user/{user_id}", get(handlers::get_user))
        .route(
            "/search_item_by_quantity/",
            get(handlers::search_item_by_quantity),
        )
        .route("/users/{user_id}/", get(handlers::user_orders))
        .route("/create_order/{user_id}", post(handlers::create_order))
        .route(
            "/update_order/{user_id}/{order_id}",
            put(handlers::update_order),
        )
        .with_state(state)
}
