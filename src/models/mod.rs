use serde::{Deserialize, Serialize};

/// A single file record returned by listing and download operations.
///
/// `content` is populated only by a successful download and is never
/// serialized into list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUpload {
    pub file_name: String,
    pub file_size: i64,
    pub file_path: String,
    #[serde(skip)]
    pub content: Option<Vec<u8>>,
}

impl FileUpload {
    pub fn new(file_name: String, file_size: i64, file_path: String) -> Self {
        Self {
            file_name,
            file_size,
            file_path,
            content: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_has_no_content() {
        let record = FileUpload::new("report.pdf".to_string(), 42, "etag-1".to_string());
        assert!(record.content.is_none());
        assert_eq!(record.file_name, "report.pdf");
        assert_eq!(record.file_size, 42);
    }

    #[test]
    fn test_content_never_serialized() {
        let mut record = FileUpload::new("report.pdf".to_string(), 4, "etag-1".to_string());
        record.content = Some(vec![1, 2, 3, 4]);

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("content").is_none());
        assert_eq!(json["file_name"], "report.pdf");
        assert_eq!(json["file_size"], 4);
    }
}
