//! Pre-navigation auth guard.

use tracing::debug;

use crate::session::{Session, SessionStore};

use super::{Route, LANDING_PATH};

/// Guard verdict for one navigation attempt. Exactly one variant is produced
/// per attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Continue to the requested route.
    Allow,
    /// Abort the attempt and redirect to the given path.
    RedirectTo(String),
}

/// Decide whether a navigation may proceed.
///
/// Unprotected routes are allowed without consulting the session at all.
/// Protected routes require a valid, unexpired credential; anything less
/// redirects to the landing route. Synchronous, no retries.
pub fn check<C, S: SessionStore>(session: &Session<S>, to: &Route<C>) -> GuardDecision {
    if !to.requires_auth {
        return GuardDecision::Allow;
    }

    if session.is_authenticated() {
        GuardDecision::Allow
    } else {
        debug!("Unauthenticated navigation to {}", to.path);
        GuardDecision::RedirectTo(LANDING_PATH.to_string())
    }
}
