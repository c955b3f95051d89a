use crate::AppState;
use crate::api::error::AppError;
use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
};
use serde::Serialize;
use tracing::{error, info};
use utoipa::ToSchema;

pub const FILE_FIELD: &str = "file";

#[derive(Serialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    pub bucket: String,
    pub key: String,
}

#[utoipa::path(
    post,
    path = "/upload",
    request_body(content = Object, description = "Form with a `file` field", content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored under its filename", body = UploadResponse),
        (status = 400, description = "No file provided or no file selected"),
        (status = 500, description = "Storage error")
    ),
    tag = "storage"
)]
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let no_file = || AppError::BadRequest("No file provided".to_string());
    let mut multipart = multipart.map_err(|_| no_file())?;
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        // A part without a filename parameter is a plain form value, not a file.
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        file = Some((filename, data));
        break;
    }

    let (filename, data) = file.ok_or_else(no_file)?;
    if filename.is_empty() {
        return Err(AppError::BadRequest("No file selected".to_string()));
    }

    let bucket = state.storage.bucket().to_string();
    info!("Attempting to upload file {} to bucket {}", filename, bucket);

    state
        .storage
        .upload_file(&filename, data)
        .await
        .map_err(|e| {
            error!("Error uploading file: {}", e);
            AppError::from(e)
        })?;

    Ok(Json(UploadResponse {
        message: format!("File {} uploaded successfully", filename),
        bucket,
        key: filename,
    }))
}
