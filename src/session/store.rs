//! Credential storage backends.
//!
//! The session layer never talks to storage directly; it goes through the
//! [`SessionStore`] trait so tests can run against an in-memory store while
//! applications pick a file-backed or OS-keychain store.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use keyring::Entry;

/// Name under which the credential is stored (file name for [`FileStore`],
/// entry name for [`KeyringStore`]).
const TOKEN_KEY: &str = "token";

/// Storage for the single session credential.
pub trait SessionStore {
    /// Read the stored credential, if any.
    fn token(&self) -> Result<Option<String>>;

    /// Persist a credential, replacing any existing one.
    fn store(&self, token: &str) -> Result<()>;

    /// Delete the stored credential. Clearing an empty store is not an error.
    fn clear(&self) -> Result<()>;
}

/// In-process store with no persistence. Used in tests and by hosts that
/// manage persistence themselves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    token: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a credential.
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }

    fn slot(&self) -> Result<MutexGuard<'_, Option<String>>> {
        self.token
            .lock()
            .map_err(|_| anyhow::anyhow!("Session store mutex poisoned"))
    }
}

impl SessionStore for MemoryStore {
    fn token(&self) -> Result<Option<String>> {
        Ok(self.slot()?.clone())
    }

    fn store(&self, token: &str) -> Result<()> {
        *self.slot()? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot()? = None;
        Ok(())
    }
}

/// Store backed by a single `token` file in a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Store under the platform cache directory, namespaced by application
    /// name.
    pub fn for_app(app_name: &str) -> Result<Self> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(Self {
            dir: cache_dir.join(app_name),
        })
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_KEY)
    }
}

impl SessionStore for FileStore {
    fn token(&self) -> Result<Option<String>> {
        let path = self.token_path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)
            .context("Failed to read token file")?;
        Ok(Some(contents))
    }

    fn store(&self, token: &str) -> Result<()> {
        let path = self.token_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, token).context("Failed to write token file")?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let path = self.token_path();
        if path.exists() {
            std::fs::remove_file(&path).context("Failed to delete token file")?;
        }
        Ok(())
    }
}

/// Store backed by the OS keychain.
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    pub fn new(service: &str) -> Self {
        Self {
            service: service.to_string(),
        }
    }

    fn entry(&self) -> Result<Entry> {
        Entry::new(&self.service, TOKEN_KEY).context("Failed to create keyring entry")
    }
}

impl SessionStore for KeyringStore {
    fn token(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(err).context("Failed to read token from keychain"),
        }
    }

    fn store(&self, token: &str) -> Result<()> {
        self.entry()?
            .set_password(token)
            .context("Failed to store token in keychain")?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(err).context("Failed to delete token from keychain"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> FileStore {
        let dir = std::env::temp_dir().join(format!(
            "gatepost-test-{}-{}",
            std::process::id(),
            name
        ));
        FileStore::new(dir)
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.token().unwrap(), None);

        store.store("abc.def.ghi").unwrap();
        assert_eq!(store.token().unwrap(), Some("abc.def.ghi".to_string()));

        store.clear().unwrap();
        assert_eq!(store.token().unwrap(), None);
    }

    #[test]
    fn test_memory_store_clear_when_empty() {
        let store = MemoryStore::new();
        assert!(store.clear().is_ok());
    }

    #[test]
    fn test_memory_store_with_token() {
        let store = MemoryStore::with_token("tok");
        assert_eq!(store.token().unwrap(), Some("tok".to_string()));
    }

    #[test]
    fn test_file_store_roundtrip() {
        let store = temp_store("roundtrip");
        assert_eq!(store.token().unwrap(), None);

        store.store("abc.def.ghi").unwrap();
        assert_eq!(store.token().unwrap(), Some("abc.def.ghi".to_string()));

        store.clear().unwrap();
        assert_eq!(store.token().unwrap(), None);

        let _ = std::fs::remove_dir_all(&store.dir);
    }

    #[test]
    fn test_file_store_clear_when_empty() {
        let store = temp_store("clear-empty");
        assert!(store.clear().is_ok());
    }
}
