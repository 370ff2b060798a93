//! Backend endpoint definitions and request/response types.

use serde::{Deserialize, Serialize};

use nexusmind_core::SearchFilters;

// ============================================================================
// Endpoint Paths
// ============================================================================

/// Credential exchange (form-encoded username/password).
pub const AUTH_TOKEN: &str = "auth/token";

/// Identity confirmation for the current bearer token.
pub const AUTH_ME: &str = "auth/me";

/// Natural-language search over ingested documents.
pub const QUERY: &str = "query";

/// Document upload endpoint for a user.
pub fn ingest_path(username: &str) -> String {
    format!("ingest/{}", username)
}

/// Uploaded-file listing endpoint for a user.
pub fn files_path(username: &str) -> String {
    format!("files/{}", username)
}

/// File deletion endpoint for a user.
pub fn delete_files_path(username: &str) -> String {
    format!("files/{}/delete", username)
}

/// File reprocessing endpoint for a user.
pub fn reprocess_path(username: &str) -> String {
    format!("files/{}/reprocess", username)
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Form body for the credential exchange.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response from the credential exchange.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[allow(dead_code)]
    pub token_type: String,
}

/// Error body shape; the backend sometimes includes a `detail` message.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Request body for search queries.
#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    pub query: &'a str,
    pub user_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<&'a SearchFilters>,
}

/// Request body for file deletion.
#[derive(Debug, Serialize)]
pub struct DeleteFilesRequest<'a> {
    pub file_ids: &'a [String],
}

/// Request body for file reprocessing.
#[derive(Debug, Serialize)]
pub struct ReprocessRequest<'a> {
    pub file_id: &'a str,
}

/// Generic acknowledgement from file management endpoints.
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
