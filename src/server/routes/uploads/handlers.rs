use super::receive::{StagedUpload, save_buffered, save_chunked};
use super::{BATCH_FIELD, SINGLE_FIELD, UploadsState};
use crate::error::LabError;
use apilab_schema::{BatchUploadReceipt, UploadReceipt};
use axum::{
    Json,
    extract::{Multipart, State},
};
use serde_json::{Value, json};
use tracing::info;

pub(super) async fn index() -> Json<Value> {
    Json(json!({ "Welcome": "You have entered the file-upload backend home page!" }))
}

/// POST /upload
///
/// Small files only: the part is held in memory before it is written.
pub(super) async fn upload_buffered(
    State(state): State<UploadsState>,
    mut multipart: Multipart,
) -> Result<Json<UploadReceipt>, LabError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(SINGLE_FIELD) {
            let receipt = save_buffered(field, &state.cfg).await?.commit().await?;
            info!(filename = %receipt.filename, size = receipt.size, "buffered upload stored");
            return Ok(Json(receipt));
        }
    }
    Err(LabError::missing_field(SINGLE_FIELD))
}

/// POST /upload2
///
/// Large files: the part is streamed to disk with bounded memory.
pub(super) async fn upload_chunked(
    State(state): State<UploadsState>,
    mut multipart: Multipart,
) -> Result<Json<UploadReceipt>, LabError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(SINGLE_FIELD) {
            let receipt = save_chunked(field, &state.cfg).await?.commit().await?;
            info!(filename = %receipt.filename, size = receipt.size, "chunked upload stored");
            return Ok(Json(receipt));
        }
    }
    Err(LabError::missing_field(SINGLE_FIELD))
}

/// POST /upload_file
///
/// Every `file_uploads` part is stored; other fields are skipped. Parts are
/// staged until the whole request has been read, so a failed batch stores
/// nothing.
pub(super) async fn upload_batch(
    State(state): State<UploadsState>,
    mut multipart: Multipart,
) -> Result<Json<BatchUploadReceipt>, LabError> {
    let mut staged = Vec::new();
    let received = async {
        while let Some(field) = multipart.next_field().await? {
            if field.name() != Some(BATCH_FIELD) {
                continue;
            }
            staged.push(save_buffered(field, &state.cfg).await?);
        }
        Ok::<(), LabError>(())
    }
    .await;

    if let Err(e) = received {
        discard_all(staged).await;
        return Err(e);
    }
    if staged.is_empty() {
        return Err(LabError::missing_field(BATCH_FIELD));
    }

    let mut batch = BatchUploadReceipt::default();
    let mut pending = staged.into_iter();
    while let Some(upload) = pending.next() {
        match upload.commit().await {
            Ok(receipt) => {
                batch.filename.push(receipt.filename);
                batch.content_type.push(receipt.content_type);
            }
            Err(e) => {
                discard_all(pending.by_ref()).await;
                return Err(e);
            }
        }
    }

    info!(files = batch.filename.len(), "batch upload stored");
    Ok(Json(batch))
}

async fn discard_all(staged: impl IntoIterator<Item = StagedUpload>) {
    for upload in staged {
        upload.discard().await;
    }
}
