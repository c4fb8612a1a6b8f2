use super::ItemsState;
use crate::error::LabError;
use crate::server::extract::LabJson;
use apilab_schema::Item;
use axum::{Json, extract::State};
use tracing::debug;

pub(super) async fn create_item(
    State(state): State<ItemsState>,
    LabJson(item): LabJson<Item>,
) -> Result<Json<Item>, LabError> {
    if let Some(ignored) = item.id {
        debug!(ignored, "client-supplied item id dropped");
    }
    let row = state.db.create_item(item.into()).await?;
    Ok(Json(row.into()))
}

pub(super) async fn list_items(State(state): State<ItemsState>) -> Result<Json<Vec<Item>>, LabError> {
    let rows = state.db.list_items().await?;
    Ok(Json(rows.into_iter().map(Item::from).collect()))
}
