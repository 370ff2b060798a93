//! In-memory credential store.

use std::sync::RwLock;

use nexusmind_core::{Credential, CredentialStore, Result};

/// A credential store held in process memory.
///
/// Useful for tests and for embedding consumers that manage persistence
/// themselves. Nothing survives process exit.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<Option<Credential>>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn save(&self, credential: &Credential) -> Result<()> {
        *self.inner.write().unwrap() = Some(credential.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<Credential>> {
        let guard = self.inner.read().unwrap();
        Ok(guard.clone().filter(|c| !c.is_expired()))
    }

    fn clear(&self) -> Result<()> {
        *self.inner.write().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexusmind_core::AccessToken;

    #[test]
    fn save_load_clear_cycle() {
        let store = MemoryCredentialStore::new();
        assert!(store.load().unwrap().is_none());

        store
            .save(&Credential::new(AccessToken::new("T1"), "alice"))
            .unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.username, "alice");

        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
