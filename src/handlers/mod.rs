pub mod bucket;
pub mod file;

use axum::http::StatusCode;

use crate::storage::error::StorageError;

/// Map a gateway error onto the HTTP response pair used by every handler.
pub(crate) fn storage_error(err: StorageError) -> (StatusCode, String) {
    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let (status, body) = storage_error(StorageError::BucketNotFound("b".to_string()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Bucket not found: b");
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let (status, _) = storage_error(StorageError::BucketAlreadyExists("b".to_string()));
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[test]
    fn test_client_error_maps_to_502() {
        let (status, _) = storage_error(StorageError::Client("timeout".to_string()));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
