use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::handlers::storage_error;
use crate::AppState;

/// Handle a multipart file upload into the named bucket.
pub async fn upload_file(
    State(state): State<AppState>,
    Path(bucket_name): Path<String>,
    mut multipart: Multipart,
) -> Result<String, (StatusCode, String)> {
    tracing::info!("File upload request: bucket={}", bucket_name);

    let mut filename = String::new();
    let mut file_data: Option<Vec<u8>> = None;
    let mut content_type: Option<String> = None;

    // Extract file from multipart form
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid multipart: {}", e)))?
    {
        let field_name = field.name().unwrap_or("unknown").to_string();
        tracing::debug!("Processing field: {}", field_name);

        if field_name == "file" {
            filename = field.file_name().unwrap_or("unknown").to_string();
            content_type = field.content_type().map(|s| s.to_string());

            let data = field.bytes().await.map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to read file: {}", e),
                )
            })?;

            if data.is_empty() {
                return Err((StatusCode::BAD_REQUEST, "Empty file provided".to_string()));
            }

            file_data = Some(data.to_vec());
            break;
        }
    }

    let data = file_data.ok_or((StatusCode::BAD_REQUEST, "No file provided".to_string()))?;
    let file_size = data.len();

    tracing::info!(
        "File received: filename={}, size={} bytes, content_type={:?}",
        filename,
        file_size,
        content_type
    );

    let key = state
        .gateway
        .upload_file(&bucket_name, &filename, data, content_type)
        .await
        .map_err(storage_error)?;

    Ok(format!("File uploaded successfully: {}", key))
}

/// Stream a stored object back as an octet-stream attachment.
pub async fn download_file(
    State(state): State<AppState>,
    Path((bucket_name, file_name)): Path<(String, String)>,
) -> Result<Response, (StatusCode, String)> {
    let record = state
        .gateway
        .download_file(&bucket_name, &file_name)
        .await
        .map_err(storage_error)?;

    let body = record.content.unwrap_or_default();

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/octet-stream".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(&record.file_name),
            ),
        ],
        body,
    )
        .into_response())
}

/// Delete one object from the named bucket.
pub async fn delete_file(
    State(state): State<AppState>,
    Path((bucket_name, file_name)): Path<(String, String)>,
) -> Result<String, (StatusCode, String)> {
    tracing::info!(
        "File delete request: bucket={}, key={}",
        bucket_name,
        file_name
    );

    state
        .gateway
        .delete_file(&bucket_name, &file_name)
        .await
        .map_err(storage_error)?;

    Ok(format!("File deleted successfully: {}", file_name))
}

/// Quotes, backslashes and control characters would make the header value
/// invalid (axum would answer 500), so they are replaced before quoting.
fn content_disposition(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' | '\\' => '_',
            c => c,
        })
        .collect();
    format!("inline; filename=\"{}\"", safe)
}
