//! Document ingestion types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Processing status of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// The backend is still parsing and indexing the document.
    Processing,
    /// The document is indexed and searchable.
    Completed,
    /// Processing failed; see the error message on the file.
    Failed,
}

/// A document known to the backend for the current user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Backend-assigned identifier.
    pub id: String,
    /// Original file name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// File extension, e.g. "pdf" or "txt".
    #[serde(rename = "type")]
    pub file_type: String,
    /// When the file was uploaded.
    pub uploaded_at: DateTime<Utc>,
    /// Current processing status.
    pub status: FileStatus,
    /// Error message when processing failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response from an upload request.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadOutput {
    /// Human-readable summary from the backend.
    pub message: String,
    /// The files accepted for ingestion.
    pub files: Vec<UploadedFile>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn uploaded_file_deserializes_wire_format() {
        let file: UploadedFile = serde_json::from_value(json!({
            "id": "f-1",
            "name": "report.pdf",
            "size": 10240,
            "type": "pdf",
            "uploadedAt": "2025-06-01T12:00:00Z",
            "status": "completed"
        }))
        .unwrap();

        assert_eq!(file.file_type, "pdf");
        assert_eq!(file.status, FileStatus::Completed);
        assert!(file.error.is_none());
    }

    #[test]
    fn failed_file_carries_error() {
        let file: UploadedFile = serde_json::from_value(json!({
            "id": "f-2",
            "name": "scan.tiff",
            "size": 1,
            "type": "tiff",
            "uploadedAt": "2025-06-01T12:00:00Z",
            "status": "failed",
            "error": "unsupported format"
        }))
        .unwrap();

        assert_eq!(file.status, FileStatus::Failed);
        assert_eq!(file.error.as_deref(), Some("unsupported format"));
    }
}
