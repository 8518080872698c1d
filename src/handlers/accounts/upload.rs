use axum::extract::{
    State,
    multipart::{Multipart, MultipartRejection},
};
use chrono::Utc;

use crate::db::AppState;
use crate::error::{AppError, Result};
use crate::extractors::Json;
use crate::models::UploadResponse;

const UPLOAD_FIELD: &str = "file";

/// Store the `file` part under the uploads directory as
/// `<epoch millis>-<client file name>`. The name is used as sent.
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>> {
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        // A part without a file name is a plain form value
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let mimetype = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field.bytes().await?;

        let filename = format!("{}-{}", Utc::now().timestamp_millis(), original_name);
        tokio::fs::create_dir_all(&state.config.uploads_dir).await?;
        tokio::fs::write(state.config.uploads_dir.join(&filename), &data).await?;

        tracing::info!("Stored upload {} ({} bytes)", filename, data.len());

        return Ok(Json(UploadResponse {
            success: true,
            path: format!("/uploads/{}", filename),
            filename,
            original_name,
            size: data.len(),
            mimetype,
        }));
    }

    Err(AppError::BadRequest("No file uploaded".into()))
}
