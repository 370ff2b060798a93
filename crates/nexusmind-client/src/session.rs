//! Session state machine.
//!
//! The manager owns all writes to the session state and to the credential
//! store. Transitions are serialized by a single mutex held across each
//! whole exchange, so a logout issued while a login is in flight is applied
//! after the login completes and wins. The authentication-lost signal from
//! the HTTP layer is consumed by exactly one listener task here; the forced
//! transition it produces is idempotent, so repeated signals from concurrent
//! failed requests make no observable difference after the first.

use std::sync::{Arc, Weak};

use tokio::sync::{Mutex, broadcast, watch};
use tracing::{debug, info, instrument, warn};

use nexusmind_core::{Credential, Credentials, CredentialStore, Error, Result, SessionState, User};

use crate::api::NexusClient;

/// Owns the client-side authentication lifecycle.
///
/// Created in [`SessionState::Unknown`]; call [`verify`](Self::verify) at
/// startup to settle into `Authenticated` or `Unauthenticated` from the
/// persisted credential. Must be created within a Tokio runtime (it spawns
/// the signal listener task). Clone is cheap and clones share state.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<Inner>,
}

struct Inner {
    client: NexusClient,
    store: Arc<dyn CredentialStore>,
    state: watch::Sender<SessionState>,
    // Serializes all transitions; held across the network exchange.
    transition: Mutex<()>,
}

impl SessionManager {
    /// Create a session manager over the given client and credential store.
    ///
    /// The store must be the same one the client reads tokens from.
    pub fn new(client: NexusClient, store: Arc<dyn CredentialStore>) -> Self {
        let (state, _) = watch::channel(SessionState::Unknown);
        let signals = client.subscribe_auth_lost();

        let inner = Arc::new(Inner {
            client,
            store,
            state,
            transition: Mutex::new(()),
        });

        spawn_auth_lost_listener(Arc::downgrade(&inner), signals);

        Self { inner }
    }

    /// Subscribe to session state changes.
    ///
    /// The receiver is read-only; all transitions go through this manager.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Returns a snapshot of the current session state.
    pub fn current(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Exchange credentials for a token, persist it, and enter
    /// `Authenticated`.
    ///
    /// On any failure the state is left unchanged and the store untouched.
    /// Calling this while already authenticated replaces the stored
    /// credential.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let _guard = self.inner.transition.lock().await;

        let credentials = Credentials::new(username, password);
        let (token, user) = self.inner.client.login_exchange(&credentials).await?;

        // Persist before publishing: Authenticated is only observable once
        // the credential is stored.
        let credential = Credential::new(token, user.username.clone());
        self.inner.store.save(&credential)?;

        self.inner.state.send_replace(SessionState::Authenticated {
            username: user.username.clone(),
        });
        info!(username = %user.username, "Logged in");

        Ok(user)
    }

    /// Clear the credential and enter `Unauthenticated`.
    ///
    /// Idempotent; logging out while already unauthenticated re-clears the
    /// store and changes nothing else.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        let _guard = self.inner.transition.lock().await;
        info!("Logging out");
        self.inner.enter_unauthenticated(None);
    }

    /// Check the persisted credential against the backend and settle into
    /// `Authenticated` or `Unauthenticated`.
    ///
    /// With no stored credential this settles locally without any network
    /// call. A store failure degrades to "no credential". A rejected
    /// credential clears the store and settles `Unauthenticated`; network
    /// and server failures also settle `Unauthenticated` but are surfaced
    /// to the caller as well.
    #[instrument(skip(self))]
    pub async fn verify(&self) -> Result<SessionState> {
        let _guard = self.inner.transition.lock().await;
        self.inner.state.send_replace(SessionState::Verifying);

        let credential = match self.inner.store.load() {
            Ok(credential) => credential,
            Err(e) => {
                warn!(error = %e, "Credential store unavailable, treating as empty");
                None
            }
        };

        if credential.is_none() {
            debug!("No stored credential");
            return Ok(self.inner.enter_unauthenticated(None));
        }

        match self.inner.client.current_user().await {
            Ok(user) => {
                let state = SessionState::Authenticated {
                    username: user.username,
                };
                self.inner.state.send_replace(state.clone());
                Ok(state)
            }
            Err(Error::Auth(e)) => {
                debug!(error = %e, "Stored credential rejected");
                Ok(self
                    .inner
                    .enter_unauthenticated(Some("session expired".to_string())))
            }
            Err(e) => {
                self.inner.enter_unauthenticated(Some(e.to_string()));
                Err(e)
            }
        }
    }
}

impl Inner {
    /// Clear the store and publish `Unauthenticated`.
    ///
    /// Idempotent: when the state is already `Unauthenticated` the existing
    /// variant (and its reason) is kept, so repeated calls are observably
    /// no-ops beyond re-clearing the already-empty store.
    fn enter_unauthenticated(&self, reason: Option<String>) -> SessionState {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear credential store");
        }

        let already = matches!(*self.state.borrow(), SessionState::Unauthenticated { .. });
        if !already {
            self.state
                .send_replace(SessionState::Unauthenticated { reason });
        }
        self.state.borrow().clone()
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &*self.inner.state.borrow())
            .finish()
    }
}

/// Consume the authentication-lost signal and force the session to
/// `Unauthenticated`. The task holds only a weak reference so it exits once
/// the manager is gone.
fn spawn_auth_lost_listener(
    inner: Weak<Inner>,
    mut signals: broadcast::Receiver<crate::http::AuthLost>,
) {
    tokio::spawn(async move {
        loop {
            match signals.recv().await {
                Ok(_) => {
                    let Some(inner) = inner.upgrade() else { break };
                    let _guard = inner.transition.lock().await;
                    debug!("Authentication lost, forcing logout");
                    inner.enter_unauthenticated(Some("authentication lost".to_string()));
                }
                // Collapsed signals; the forced transition is idempotent.
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexusmind_core::{AccessToken, ApiUrl};
    use nexusmind_store::MemoryCredentialStore;

    fn manager() -> (SessionManager, Arc<MemoryCredentialStore>) {
        let store = Arc::new(MemoryCredentialStore::new());
        let api = ApiUrl::new("http://localhost:1").unwrap();
        let client = NexusClient::new(api, store.clone());
        (SessionManager::new(client, store.clone()), store)
    }

    #[tokio::test]
    async fn starts_unknown() {
        let (manager, _store) = manager();
        assert_eq!(manager.current(), SessionState::Unknown);
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let (manager, store) = manager();
        store
            .save(&Credential::new(AccessToken::new("T1"), "alice"))
            .unwrap();

        manager.logout().await;
        let after_first = manager.current();
        manager.logout().await;

        assert_eq!(manager.current(), after_first);
        assert!(matches!(
            after_first,
            SessionState::Unauthenticated { .. }
        ));
        assert!(store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn verify_without_credential_settles_locally() {
        // Port 1 is unreachable; verify must not attempt the network when
        // the store is empty.
        let (manager, _store) = manager();
        let state = manager.verify().await.unwrap();
        assert!(matches!(state, SessionState::Unauthenticated { .. }));
    }

    #[tokio::test]
    async fn state_watch_sees_transitions() {
        let (manager, _store) = manager();
        let rx = manager.subscribe();
        manager.logout().await;
        assert!(matches!(
            *rx.borrow(),
            SessionState::Unauthenticated { .. }
        ));
    }
}
