//! nexusmind-core - Core types and traits for the NexusMind client toolkit.

pub mod credentials;
pub mod error;
pub mod ingest;
pub mod search;
pub mod session;
pub mod store;
pub mod tokens;
pub mod types;

pub use credentials::Credentials;
pub use error::Error;
pub use ingest::{FileStatus, UploadOutput, UploadedFile};
pub use search::{DateRange, SearchFilters, SearchHit, SearchResults, SortBy};
pub use session::{SessionState, User};
pub use store::{Credential, CredentialStore};
pub use tokens::AccessToken;
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
