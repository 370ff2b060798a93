//! Credential persistence contract.

use chrono::{DateTime, Duration, Utc};

use crate::tokens::AccessToken;
use crate::Result;

/// How long a stored credential stays usable before it is treated as absent.
/// Matches the backend's token lifetime of seven days.
const CREDENTIAL_TTL_DAYS: i64 = 7;

/// The persisted pair of bearer token and username.
///
/// The token and username are always stored together; a store never exposes
/// one without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// The bearer token presented on authenticated requests.
    pub token: AccessToken,
    /// The username the token was issued for.
    pub username: String,
    /// When the credential was saved.
    pub saved_at: DateTime<Utc>,
}

impl Credential {
    /// Create a credential stamped with the current time.
    pub fn new(token: AccessToken, username: impl Into<String>) -> Self {
        Self {
            token,
            username: username.into(),
            saved_at: Utc::now(),
        }
    }

    /// Returns true if the credential is past its useful lifetime.
    pub fn is_expired(&self) -> bool {
        let expiry = self.saved_at + Duration::days(CREDENTIAL_TTL_DAYS);
        Utc::now() > expiry
    }
}

/// Persistence for the session credential.
///
/// Implementations must make `save` atomic from the caller's perspective (a
/// concurrent `load` sees either the old pair or the new pair, never half of
/// one) and `clear` idempotent. Operations fail only when the underlying
/// storage is unavailable; clearing an empty store is a no-op.
pub trait CredentialStore: Send + Sync {
    /// Persist the credential, replacing any previous one.
    fn save(&self, credential: &Credential) -> Result<()>;

    /// Return the stored credential, or `None` if never set, cleared, or
    /// expired.
    fn load(&self) -> Result<Option<Credential>>;

    /// Remove the stored credential. Clearing an empty store succeeds.
    fn clear(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_credential_is_not_expired() {
        let cred = Credential::new(AccessToken::new("t"), "alice");
        assert!(!cred.is_expired());
    }

    #[test]
    fn old_credential_is_expired() {
        let mut cred = Credential::new(AccessToken::new("t"), "alice");
        cred.saved_at = Utc::now() - Duration::days(CREDENTIAL_TTL_DAYS + 1);
        assert!(cred.is_expired());
    }
}
