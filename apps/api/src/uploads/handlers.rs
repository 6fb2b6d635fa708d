//! Axum route handler for document uploads.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;
use crate::uploads::storage::{sanitize_filename, save_upload, upload_summary};

/// Multipart field carrying the file.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub summary: String,
}

/// POST /upload-doc
///
/// Stores the `file` part verbatim under the upload directory.
pub async fn handle_upload_doc(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read multipart field: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let raw_name = field.file_name().unwrap_or_default().to_string();
        let filename = sanitize_filename(&raw_name)?.to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read file bytes: {e}")))?;

        let path = save_upload(&state.config.upload_dir, &filename, &data).await?;

        info!(filename = %filename, bytes = data.len(), path = %path.display(), "Upload stored");

        return Ok(Json(UploadResponse {
            message: "Upload complete.".to_string(),
            summary: upload_summary(&filename),
        }));
    }

    Err(AppError::UnprocessableEntity(format!(
        "multipart body has no '{FILE_FIELD}' field"
    )))
}
