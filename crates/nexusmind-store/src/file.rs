//! File-backed credential store.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use nexusmind_core::{AccessToken, Credential, CredentialStore, Result};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Session file name in the store directory.
const SESSION_FILE: &str = "session.json";

/// Lock file guarding cross-process access to the session file.
const LOCK_FILE: &str = "session.lock";

/// On-disk credential format.
#[derive(Debug, Serialize, Deserialize)]
struct StoredCredential {
    token: String,
    username: String,
    saved_at: DateTime<Utc>,
}

/// A credential store backed by a JSON file.
///
/// The token and username are written together in a single file, staged
/// through a temporary file and renamed into place, so a concurrent `load`
/// never observes a half-written pair. The session file is created with
/// `0o600` permissions on Unix.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    root: PathBuf,
}

impl FileCredentialStore {
    /// Create a store rooted at the given directory.
    ///
    /// The directory is created lazily on the first `save`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Path of the session file.
    pub fn session_path(&self) -> PathBuf {
        self.root.join(SESSION_FILE)
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join(LOCK_FILE)
    }

    fn acquire_lock(&self) -> io::Result<File> {
        let lock = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())?;
        lock.lock_exclusive()?;
        Ok(lock)
    }
}

impl CredentialStore for FileCredentialStore {
    fn save(&self, credential: &Credential) -> Result<()> {
        fs::create_dir_all(&self.root)?;

        let stored = StoredCredential {
            token: credential.token.as_str().to_string(),
            username: credential.username.clone(),
            saved_at: credential.saved_at,
        };
        let json = serde_json::to_string_pretty(&stored).map_err(io::Error::other)?;

        let lock = self.acquire_lock()?;

        // Stage into a temporary file and rename so load never sees a
        // partial write.
        let path = self.session_path();
        let tmp = self.root.join(format!("{}.tmp", SESSION_FILE));
        fs::write(&tmp, &json)?;

        #[cfg(unix)]
        {
            let mut perms = fs::metadata(&tmp)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&tmp, perms)?;
        }

        fs::rename(&tmp, &path)?;
        let _ = fs2::FileExt::unlock(&lock);

        debug!(path = %path.display(), "Credential saved");
        Ok(())
    }

    fn load(&self) -> Result<Option<Credential>> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(None);
        }

        let lock = self.acquire_lock()?;
        let result = fs::read_to_string(&path);
        let _ = fs2::FileExt::unlock(&lock);

        let json = match result {
            Ok(json) => json,
            // A concurrent clear removed the file after the existence check.
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let stored: StoredCredential = match serde_json::from_str(&json) {
            Ok(stored) => stored,
            Err(e) => {
                // Unreadable session files are treated as absent rather than
                // fatal; the next login rewrites the file.
                warn!(error = %e, path = %path.display(), "Ignoring corrupt session file");
                return Ok(None);
            }
        };

        let credential = Credential {
            token: AccessToken::new(stored.token),
            username: stored.username,
            saved_at: stored.saved_at,
        };

        if credential.is_expired() {
            debug!("Stored credential has expired, treating as absent");
            return Ok(None);
        }

        Ok(Some(credential))
    }

    fn clear(&self) -> Result<()> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(());
        }

        let lock = self.acquire_lock()?;
        let result = fs::remove_file(&path);
        let _ = fs2::FileExt::unlock(&lock);

        match result {
            Ok(()) => Ok(()),
            // A concurrent clear already removed it; clearing is idempotent.
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    fn store() -> (TempDir, FileCredentialStore) {
        let dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_dir, store) = store();
        let cred = Credential::new(AccessToken::new("T1"), "alice");
        store.save(&cred).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.token.as_str(), "T1");
        assert_eq!(loaded.username, "alice");
    }

    #[test]
    fn load_without_save_is_absent() {
        let (_dir, store) = store();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let (_dir, store) = store();
        store.clear().unwrap();

        let cred = Credential::new(AccessToken::new("T1"), "alice");
        store.save(&cred).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_replaces_previous_credential() {
        let (_dir, store) = store();
        store
            .save(&Credential::new(AccessToken::new("T1"), "alice"))
            .unwrap();
        store
            .save(&Credential::new(AccessToken::new("T2"), "alice"))
            .unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.token.as_str(), "T2");
    }

    #[test]
    fn expired_credential_loads_as_absent() {
        let (_dir, store) = store();
        let mut cred = Credential::new(AccessToken::new("T1"), "alice");
        cred.saved_at = Utc::now() - Duration::days(30);
        store.save(&cred).unwrap();

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn load_racing_a_clear_is_absent_not_an_error() {
        let (_dir, store) = store();

        for _ in 0..50 {
            store
                .save(&Credential::new(AccessToken::new("T1"), "alice"))
                .unwrap();

            let loader = {
                let store = store.clone();
                std::thread::spawn(move || store.load())
            };
            store.clear().unwrap();

            // Whatever the interleave, load sees a credential or nothing,
            // never an error.
            loader.join().unwrap().unwrap();
        }
    }

    #[test]
    fn corrupt_session_file_loads_as_absent() {
        let (_dir, store) = store();
        fs::create_dir_all(store.root.clone()).unwrap();
        fs::write(store.session_path(), "not json").unwrap();

        assert!(store.load().unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_owner_only() {
        let (_dir, store) = store();
        store
            .save(&Credential::new(AccessToken::new("T1"), "alice"))
            .unwrap();

        let mode = fs::metadata(store.session_path())
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
