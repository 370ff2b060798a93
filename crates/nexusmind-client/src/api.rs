//! Typed operations against the NexusMind backend.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, instrument};

use nexusmind_core::{
    AccessToken, ApiUrl, Credentials, CredentialStore, Result, SearchFilters, SearchResults,
    UploadOutput, UploadedFile, User,
};

use crate::http::{AuthLost, HttpClient};
use crate::wire::*;

/// Typed HTTP client for the NexusMind backend.
///
/// Wraps the request layer with the backend's endpoints: the credential
/// exchange, identity confirmation, document upload, uploaded-file
/// management, and search. Clone is cheap.
#[derive(Debug, Clone)]
pub struct NexusClient {
    http: HttpClient,
}

impl NexusClient {
    /// Create a new client for the given backend base URL, reading bearer
    /// tokens from the given credential store.
    pub fn new(api: ApiUrl, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            http: HttpClient::new(api, store),
        }
    }

    /// Returns the backend base URL.
    pub fn api(&self) -> &ApiUrl {
        self.http.api()
    }

    /// Subscribe to the authentication-lost signal raised when the stored
    /// token is rejected by the backend.
    pub fn subscribe_auth_lost(&self) -> broadcast::Receiver<AuthLost> {
        self.http.subscribe_auth_lost()
    }

    /// Exchange username/password for a bearer token, then confirm the
    /// identity it was issued for.
    ///
    /// The token is returned alongside the confirmed user; persisting it is
    /// the session manager's job, so a failed exchange leaves no trace.
    #[instrument(skip(self, credentials), fields(username = credentials.username()))]
    pub async fn login_exchange(&self, credentials: &Credentials) -> Result<(AccessToken, User)> {
        debug!("Exchanging credentials for a token");

        let request = LoginRequest {
            username: credentials.username(),
            password: credentials.password(),
        };
        let response: LoginResponse = self.http.post_form(AUTH_TOKEN, &request).await?;
        let token = AccessToken::new(response.access_token);

        let user: User = self.http.get_json_with_token(AUTH_ME, &token).await?;

        Ok((token, user))
    }

    /// Confirm the identity behind the stored token.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<User> {
        debug!("Confirming identity");
        self.http.get_json(AUTH_ME).await
    }

    /// Upload documents for ingestion.
    ///
    /// Each path is read fully and sent as one part of a single multipart
    /// request; uploads are single-shot, there is no chunking or resume.
    #[instrument(skip(self, paths), fields(count = paths.len()))]
    pub async fn upload_files(
        &self,
        username: &str,
        paths: &[impl AsRef<Path>],
    ) -> Result<UploadOutput> {
        debug!("Uploading files");

        let mut form = reqwest::multipart::Form::new();
        for path in paths {
            let path = path.as_ref();
            let bytes = tokio::fs::read(path).await?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string());
            let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
            form = form.part("files", part);
        }

        self.http.post_multipart(&ingest_path(username), form).await
    }

    /// List the user's uploaded files.
    #[instrument(skip(self))]
    pub async fn list_files(&self, username: &str) -> Result<Vec<UploadedFile>> {
        debug!("Listing uploaded files");
        self.http.get_json(&files_path(username)).await
    }

    /// Delete uploaded files by id. Returns the backend's acknowledgement.
    #[instrument(skip(self, file_ids), fields(count = file_ids.len()))]
    pub async fn delete_files(&self, username: &str, file_ids: &[String]) -> Result<String> {
        debug!("Deleting files");
        let request = DeleteFilesRequest { file_ids };
        let response: MessageResponse = self
            .http
            .post_json(&delete_files_path(username), &request)
            .await?;
        Ok(response.message)
    }

    /// Ask the backend to re-run ingestion for a file.
    #[instrument(skip(self))]
    pub async fn reprocess_file(&self, username: &str, file_id: &str) -> Result<String> {
        debug!("Requesting reprocess");
        let request = ReprocessRequest { file_id };
        let response: MessageResponse = self
            .http
            .post_json(&reprocess_path(username), &request)
            .await?;
        Ok(response.message)
    }

    /// Run a natural-language search over the user's ingested documents.
    #[instrument(skip(self, filters))]
    pub async fn search(
        &self,
        username: &str,
        query: &str,
        filters: Option<&SearchFilters>,
    ) -> Result<SearchResults> {
        debug!(query, "Searching");
        let request = QueryRequest {
            query,
            user_id: username,
            filters,
        };
        self.http.post_json(QUERY, &request).await
    }
}
