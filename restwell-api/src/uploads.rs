//! Photo ingestion. Filenames are always server-generated (timestamp plus
//! the original extension), so user-supplied names never reach the
//! filesystem and the uploads directory is append-only.

use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UploadByLinkRequest {
    pub link: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload))
        .route("/upload-by-link", post(upload_by_link))
}

/// Extension of a filename or URL path, dot included; empty when absent.
fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default()
}

/// POST /upload
/// Multipart upload from the device; any number of `photos` parts.
async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let mut filenames = Vec::new();
    let stamp = Utc::now().timestamp_millis();

    let mut index = 0;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::ValidationError(e.to_string()))?
    {
        let ext = field.file_name().map(extension_of).unwrap_or_default();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let filename = format!("photo_{}_{}{}", stamp, index, ext);
        tokio::fs::write(state.uploads_dir.join(&filename), &data).await?;

        filenames.push(filename);
        index += 1;
    }

    Ok(Json(json!({ "filenames": filenames })))
}

/// POST /upload-by-link
/// Fetch an image from a URL into the uploads directory. Sent with
/// browser-ish headers since many image hosts refuse bare clients.
async fn upload_by_link(
    State(state): State<AppState>,
    Json(req): Json<UploadByLinkRequest>,
) -> Result<Json<Value>, AppError> {
    if req.link.is_empty() {
        return Err(AppError::ValidationError("Invalid URL".to_string()));
    }

    // Extension from the URL path, query string stripped; .jpg when absent.
    let path_part = req.link.split('?').next().unwrap_or("");
    let mut ext = extension_of(path_part);
    if ext.is_empty() {
        ext = ".jpg".to_string();
    }
    let filename = format!("photo_{}{}", Utc::now().timestamp_millis(), ext);

    let response = state
        .http
        .get(&req.link)
        .header(
            "User-Agent",
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/115.0.0.0 Safari/537.36",
        )
        .header("Accept", "image/avif,image/webp,image/apng,image/*,*/*;q=0.8")
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| {
            tracing::warn!("image download failed: {}", e);
            AppError::InternalServerError("Download failed".to_string())
        })?;

    let data = response
        .bytes()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    tokio::fs::write(state.uploads_dir.join(&filename), &data).await?;

    tracing::info!(%filename, "image downloaded");
    Ok(Json(json!({ "filename": filename })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_parsing() {
        assert_eq!(extension_of("house.png"), ".png");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("no-extension"), "");
        // User-supplied directories never survive into the extension
        assert_eq!(extension_of("../../etc/passwd"), "");
    }
}
