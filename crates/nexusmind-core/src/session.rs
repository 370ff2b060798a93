//! Session state and user identity types.

use serde::Deserialize;

/// The client-side authentication status.
///
/// The state is owned by the session manager and mutated only through its
/// transition methods; consumers observe it read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Initial state, before the first verification attempt.
    Unknown,
    /// A verification exchange is in flight.
    Verifying,
    /// A credential is stored and the backend has confirmed the identity.
    Authenticated {
        /// The confirmed username.
        username: String,
    },
    /// No valid credential is available.
    Unauthenticated {
        /// Why the session ended, when known (expiry, explicit logout).
        reason: Option<String>,
    },
}

impl SessionState {
    /// Returns true if the session is authenticated.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }

    /// Returns the authenticated username, if any.
    pub fn username(&self) -> Option<&str> {
        match self {
            SessionState::Authenticated { username } => Some(username),
            _ => None,
        }
    }
}

/// The current user's identity, as reported by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// The login name.
    pub username: String,
    /// Display name, if the account has one.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Contact address, if the account has one.
    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_exposes_username() {
        let state = SessionState::Authenticated {
            username: "alice".to_string(),
        };
        assert!(state.is_authenticated());
        assert_eq!(state.username(), Some("alice"));
    }

    #[test]
    fn other_states_have_no_username() {
        assert_eq!(SessionState::Unknown.username(), None);
        assert_eq!(SessionState::Verifying.username(), None);
        assert_eq!(
            SessionState::Unauthenticated { reason: None }.username(),
            None
        );
    }

    #[test]
    fn user_deserializes_without_optional_fields() {
        let user: User = serde_json::from_str(r#"{"username": "alice"}"#).unwrap();
        assert_eq!(user.username, "alice");
        assert!(user.full_name.is_none());
        assert!(user.email.is_none());
    }
}
