use super::OrdersState;
use crate::server::extract::{LabJson, LabPath, LabQuery};
use crate::store::orders::{Insert, Update, items_with_quantity};
use crate::utils::logging::with_pretty_json_debug;
use apilab_schema::orders::{
    NoMatch, OrderCreated, OrderUpdated, QuantityQuery, Sum, UserOrders,
};
use apilab_schema::{ErrorReply, Message, Order, OrderFilters, OrderUpdate};
use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use tracing::debug;

pub(super) async fn root() -> Json<Message> {
    Json(Message::new("Hello World"))
}

pub(super) async fn say_hello(LabPath(name): LabPath<String>) -> Json<Message> {
    Json(Message::new(format!("Hello {name}")))
}

#[allow(clippy::cast_precision_loss)]
pub(super) async fn add(LabPath((a, b)): LabPath<(i64, f64)>) -> Json<Sum> {
    Json(Sum {
        result: a as f64 + b,
    })
}

pub(super) async fn get_user(
    State(state): State<OrdersState>,
    LabPath(user_id): LabPath<i64>,
) -> Response {
    if user_id == state.profile.user_id {
        Json(state.profile.as_ref().clone()).into_response()
    } else {
        Json(ErrorReply::new("User not found")).into_response()
    }
}

pub(super) async fn search_item_by_quantity(
    State(state): State<OrdersState>,
    LabQuery(query): LabQuery<QuantityQuery>,
) -> Response {
    let found = items_with_quantity(&state.profile, query.quantity);
    if found.is_empty() {
        Json(NoMatch {
            data: "No items found with the specified quantity".to_string(),
        })
        .into_response()
    } else {
        Json(found).into_response()
    }
}

pub(super) async fn user_orders(
    State(state): State<OrdersState>,
    LabPath(user_id): LabPath<i64>,
    LabQuery(filters): LabQuery<OrderFilters>,
) -> Json<UserOrders> {
    let results = state.book.read().await.search(user_id, &filters);
    Json(UserOrders {
        user_id,
        filters_applied: filters,
        results,
    })
}

pub(super) async fn create_order(
    State(state): State<OrdersState>,
    LabPath(user_id): LabPath<i64>,
    LabJson(order): LabJson<Order>,
) -> Response {
    let outcome = state.book.write().await.insert(user_id, order.clone());
    debug!(user_id, order_id = order.order_id, ?outcome, "create_order");

    let message = match outcome {
        Insert::DuplicateId => {
            return Json(ErrorReply::new("Order ID already exists for this user")).into_response();
        }
        Insert::CreatedUser => "User not found, created new user and added order",
        Insert::Appended => "Order created successfully",
    };
    Json(OrderCreated {
        message: message.to_string(),
        order,
    })
    .into_response()
}

/// Replies with the update exactly as supplied, not the merged order.
pub(super) async fn update_order(
    State(state): State<OrdersState>,
    LabPath((user_id, order_id)): LabPath<(i64, i64)>,
    LabJson(patch): LabJson<OrderUpdate>,
) -> Response {
    let mut book = state.book.write().await;
    with_pretty_json_debug(&book.orders_of(user_id), |orders| {
        debug!(user_id, orders = %orders, "update_order: orders before update");
    });

    match book.update(user_id, order_id, &patch) {
        Update::UnknownUser => Json(ErrorReply::new("User not found")).into_response(),
        Update::UnknownOrder => Json(ErrorReply::new("Order not found")).into_response(),
        Update::Updated(_) => Json(OrderUpdated {
            message: format!("Order: {order_id} updated successfully for user {user_id}"),
            updated_order: patch,
        })
        .into_response(),
    }
}
