use super::TodosState;
use crate::error::LabError;
use crate::server::extract::{LabPath, ValidJson};
use apilab_schema::todos::{TodoCreated, TodoDeleted, TodoUpdated};
use apilab_schema::{Message, Todo, TodoCreate, TodoUpdate};
use axum::{Json, extract::State};
use tracing::debug;

const NOT_FOUND: &str = "Todo not found";

pub(super) async fn index() -> Json<Message> {
    Json(Message::new("Welcome to the Todo API"))
}

pub(super) async fn list_todos(State(state): State<TodosState>) -> Json<Vec<Todo>> {
    Json(state.todos.read().await.all().to_vec())
}

pub(super) async fn get_todo(
    State(state): State<TodosState>,
    LabPath(todo_id): LabPath<i64>,
) -> Result<Json<Todo>, LabError> {
    state
        .todos
        .read()
        .await
        .get(todo_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| LabError::not_found(NOT_FOUND))
}

pub(super) async fn create_todo(
    State(state): State<TodosState>,
    ValidJson(create): ValidJson<TodoCreate>,
) -> Json<TodoCreated> {
    let todo = state.todos.write().await.create(create);
    debug!(todo_id = todo.todo_id, "todo created");
    Json(TodoCreated {
        message: "Todo created successfully".to_string(),
        todo,
    })
}

pub(super) async fn update_todo(
    State(state): State<TodosState>,
    LabPath(todo_id): LabPath<i64>,
    ValidJson(update): ValidJson<TodoUpdate>,
) -> Result<Json<TodoUpdated>, LabError> {
    let updated_todo = state
        .todos
        .write()
        .await
        .update(todo_id, update)
        .ok_or_else(|| LabError::not_found(NOT_FOUND))?;
    debug!(todo_id, "todo updated");
    Ok(Json(TodoUpdated {
        message: "Todo updated successfully".to_string(),
        updated_todo,
    }))
}

pub(super) async fn delete_todo(
    State(state): State<TodosState>,
    LabPath(todo_id): LabPath<i64>,
) -> Result<Json<TodoDeleted>, LabError> {
    let deleted_todo = state
        .todos
        .write()
        .await
        .remove(todo_id)
        .ok_or_else(|| LabError::not_found(NOT_FOUND))?;
    debug!(todo_id, "todo deleted");
    Ok(Json(TodoDeleted {
        message: "Todo deleted successfully".to_string(),
        deleted_todo,
    }))
}
