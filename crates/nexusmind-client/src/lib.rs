//! nexusmind-client - HTTP client and session management for the NexusMind
//! document ingestion and retrieval backend.
//!
//! The crate has two layers. [`NexusClient`] is a typed HTTP client: it
//! attaches the stored bearer token to every request and raises a
//! process-wide authentication-lost signal when the backend rejects that
//! token. [`SessionManager`] owns the client-side session state machine
//! (`Unknown -> Verifying -> Authenticated | Unauthenticated`), drives
//! login/logout/verification, and consumes the authentication-lost signal so
//! the session always converges to `Unauthenticated` when the token dies.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use nexusmind_client::{NexusClient, SessionManager};
//! use nexusmind_core::ApiUrl;
//! use nexusmind_store::MemoryCredentialStore;
//!
//! # async fn example() -> nexusmind_core::Result<()> {
//! let api = ApiUrl::new("http://localhost:8001").unwrap();
//! let store = Arc::new(MemoryCredentialStore::new());
//! let client = NexusClient::new(api, store.clone());
//! let session = SessionManager::new(client.clone(), store);
//!
//! let user = session.login("alice", "hunter2").await?;
//! let files = client.list_files(&user.username).await?;
//! println!("{} files ingested", files.len());
//! # Ok(())
//! # }
//! ```

mod api;
mod http;
mod session;
mod wire;

pub use api::NexusClient;
pub use http::AuthLost;
pub use session::SessionManager;
