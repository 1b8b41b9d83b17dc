//! Session validation over a pluggable credential store.
//!
//! This module provides:
//! - `Session`: fail-closed validity check plus logout
//! - `SessionStore`: the storage abstraction (memory, file, OS keychain)
//! - `Navigator`: host hook for the hard post-logout redirect
//!
//! Credentials that fail to decode or have expired are deleted on sight, so
//! the next check starts from a clean slate.

pub mod claims;
pub mod store;

pub use claims::{decode, Claims, DecodeError};
pub use store::{FileStore, KeyringStore, MemoryStore, SessionStore};

use anyhow::Result;
use chrono::Utc;
use tracing::{debug, warn};

use crate::router::LANDING_PATH;

/// Host hook for hard navigations: a full reload that discards all in-app
/// state, as opposed to an in-router transition.
pub trait Navigator {
    fn assign(&self, path: &str);
}

pub struct Session<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store, e.g. for a login flow to write a freshly
    /// issued credential.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Check whether a valid, unexpired credential is stored.
    ///
    /// Fails closed: a missing, unreadable, malformed, or expired credential
    /// all report `false`. Malformed and expired credentials are deleted.
    pub fn is_authenticated(&self) -> bool {
        let raw = match self.store.token() {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(err) => {
                warn!("Failed to read stored credential: {}", err);
                return false;
            }
        };

        match claims::decode(&raw) {
            Ok(claims) => {
                if claims.is_expired_at(now_secs()) {
                    debug!("Stored credential has expired, deleting");
                    self.discard();
                    false
                } else {
                    true
                }
            }
            Err(err) => {
                debug!("Stored credential is corrupt ({}), deleting", err);
                self.discard();
                false
            }
        }
    }

    /// Delete the credential unconditionally, then hand the navigator the
    /// landing path for a full reload.
    pub fn logout<N: Navigator>(&self, navigator: &N) -> Result<()> {
        self.store.clear()?;
        navigator.assign(LANDING_PATH);
        Ok(())
    }

    fn discard(&self) {
        if let Err(err) = self.store.clear() {
            warn!("Failed to delete invalid credential: {}", err);
        }
    }
}

/// Current time in seconds since epoch, fractional part preserved.
fn now_secs() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}
