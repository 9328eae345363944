use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::handlers::storage_error;
use crate::models::FileUpload;
use crate::AppState;

/// Create a bucket, reporting the region it landed in.
pub async fn create_bucket(
    State(state): State<AppState>,
    Path(bucket_name): Path<String>,
) -> Result<String, (StatusCode, String)> {
    tracing::info!("Create bucket request: {}", bucket_name);

    let region = state
        .gateway
        .create_bucket(&bucket_name)
        .await
        .map_err(storage_error)?;

    Ok(format!(
        "Bucket created: {} (region: {})",
        bucket_name, region
    ))
}

/// List every bucket visible to the configured credentials.
pub async fn list_buckets(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, (StatusCode, String)> {
    let buckets = state.gateway.list_buckets().await.map_err(storage_error)?;
    Ok(Json(buckets))
}

/// List the objects in one bucket as file records.
pub async fn list_files(
    State(state): State<AppState>,
    Path(bucket_name): Path<String>,
) -> Result<Json<Vec<FileUpload>>, (StatusCode, String)> {
    let files = state
        .gateway
        .list_files(&bucket_name)
        .await
        .map_err(storage_error)?;
    Ok(Json(files))
}

/// Delete the bucket if and only if it holds no objects.
pub async fn soft_delete_bucket(
    State(state): State<AppState>,
    Path(bucket_name): Path<String>,
) -> Result<String, (StatusCode, String)> {
    tracing::info!("Soft delete bucket request: {}", bucket_name);

    state
        .gateway
        .soft_delete_bucket(&bucket_name)
        .await
        .map_err(storage_error)?;

    Ok(format!("Bucket deleted: {}", bucket_name))
}

/// Remove every object in the bucket; the bucket itself stays.
pub async fn hard_delete_bucket(
    State(state): State<AppState>,
    Path(bucket_name): Path<String>,
) -> Result<String, (StatusCode, String)> {
    tracing::info!("Hard delete bucket request: {}", bucket_name);

    let removed = state
        .gateway
        .hard_delete_bucket(&bucket_name)
        .await
        .map_err(storage_error)?;

    Ok(format!(
        "Bucket emptied: {} ({} objects removed)",
        bucket_name, removed
    ))
}
