//! Validated CRUD over an in-memory todo list.

pub mod handlers;

use crate::store::TodoList;
use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct TodosState {
    pub todos: Arc<RwLock<TodoList>>,
}

impl TodosState {
    pub fn new(list: TodoList) -> Self {
        Self {
            todos: Arc::new(RwLock::new(list)),
        }
    }

    pub fn seeded() -> Self {
        Self::new(TodoList::seeded())
    }
}

pub fn router(state: TodosState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/todos", get(handlers::list_todos))
        .route("/todos/{todo_id}", get(handlers::get_todo))
        .route("/todos/create", post(handlers::create_todo))
        .route("/todos/update/{todo_id}", put(handlers::update_todo))
        .route("/todos/delete/{todo_id}", delete(handlers::delete_todo))
        .with_state(state)
}
