//! Shared command context: backend client, session manager, store location.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use nexusmind_client::{NexusClient, SessionManager};
use nexusmind_core::error::AuthError;
use nexusmind_core::{ApiUrl, SessionState};
use nexusmind_store::FileCredentialStore;

/// Default backend for development setups.
const DEFAULT_API: &str = "http://localhost:8001";

/// Everything a command needs to talk to the backend.
pub struct CliContext {
    pub client: NexusClient,
    pub session: SessionManager,
}

impl CliContext {
    /// Build the context from the `--api` flag, the `NEXUS_API` environment
    /// variable, or the default, with the credential store in the platform
    /// data directory.
    pub fn init(api: Option<String>) -> Result<Self> {
        let api = api
            .or_else(|| std::env::var("NEXUS_API").ok())
            .unwrap_or_else(|| DEFAULT_API.to_string());
        let api = ApiUrl::new(&api).context("Invalid API URL")?;

        let store = Arc::new(FileCredentialStore::new(data_dir()?));
        let client = NexusClient::new(api, store.clone());
        let session = SessionManager::new(client.clone(), store);

        Ok(Self { client, session })
    }

    /// Verify the stored session and return the confirmed username.
    ///
    /// Fails with a hint to log in when no valid session exists.
    pub async fn require_login(&self) -> Result<String> {
        let state = self
            .session
            .verify()
            .await
            .context("Failed to verify session")?;

        match state {
            SessionState::Authenticated { username } => Ok(username),
            _ => Err(AuthError::NotAuthenticated)
                .context("Not logged in. Run 'nexus login' first."),
        }
    }
}

/// Get the credential store directory.
fn data_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "nexus").context("Could not determine config directory")?;
    Ok(dirs.data_dir().to_path_buf())
}
